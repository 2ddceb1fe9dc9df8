use crate::config::LayoutConfig;
use crate::graph::GraphModel;
use crate::types::{ArtifactType, Node, Position, PositionMap};

/// Nodes grouped by artifact type, in display order
pub fn categories<'a>(model: &'a GraphModel, priority: &[ArtifactType]) -> Vec<(ArtifactType, Vec<&'a Node>)> {
    let mut groups: Vec<(ArtifactType, Vec<&Node>)> =
        priority.iter().map(|kind| (*kind, Vec::new())).collect();

    for node in model.nodes() {
        match groups.iter_mut().find(|(kind, _)| *kind == node.artifact_type) {
            Some((_, members)) => members.push(node),
            // Types missing from the priority list follow in first-seen order
            None => groups.push((node.artifact_type, vec![node])),
        }
    }

    groups.retain(|(_, members)| !members.is_empty());
    groups
}

/// Columns for a block of `count` nodes
pub fn columns_for(count: usize, max_columns: usize) -> usize {
    ((count as f64).sqrt().ceil() as usize).clamp(1, max_columns.max(1))
}

pub(super) fn layout(model: &GraphModel, focus: Option<&str>, config: &LayoutConfig) -> PositionMap {
    let g = &config.grid;
    let mut positions = PositionMap::with_capacity(model.node_count());
    let mut block_top = g.margin_top;

    for (kind, members) in categories(model, &g.category_priority) {
        let columns = columns_for(members.len(), g.max_columns);
        let rows = members.len().div_ceil(columns);
        let block_width = (columns - 1) as f64 * g.column_spacing;
        let left = (config.width - block_width) / 2.0;

        log::debug!(
            "Grid block {}: {} nodes in {}x{}",
            kind.as_str(),
            members.len(),
            columns,
            rows
        );

        for (i, node) in members.into_iter().enumerate() {
            let mut x = left + (i % columns) as f64 * g.column_spacing;
            let mut y = block_top + (i / columns) as f64 * g.row_spacing;
            if focus == Some(node.id.as_str()) {
                x += g.focus_offset.0;
                y += g.focus_offset.1;
            }
            positions.insert(node.id.clone(), Position::new(node.id.clone(), x, y));
        }

        block_top += rows as f64 * g.row_spacing + g.category_gap;
    }

    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AnalysisResult;

    fn model(nodes: &[(&str, ArtifactType)]) -> GraphModel {
        let nodes = nodes.iter().map(|(id, kind)| Node::new(*id, *kind)).collect();
        GraphModel::new(AnalysisResult::new(nodes, vec![])).unwrap()
    }

    #[test]
    fn test_columns_for() {
        assert_eq!(columns_for(1, 6), 1);
        assert_eq!(columns_for(4, 6), 2);
        assert_eq!(columns_for(5, 6), 3);
        assert_eq!(columns_for(100, 6), 6);
        assert_eq!(columns_for(0, 6), 1);
    }

    #[test]
    fn test_categories_follow_priority() {
        let m = model(&[
            ("r:t1", ArtifactType::Test),
            ("r:c1", ArtifactType::PrimaryUnit),
            ("r:u1", ArtifactType::UiComponent),
            ("r:c2", ArtifactType::PrimaryUnit),
        ]);
        let groups = categories(&m, &LayoutConfig::default().grid.category_priority);

        let kinds: Vec<_> = groups.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![ArtifactType::PrimaryUnit, ArtifactType::UiComponent, ArtifactType::Test]
        );
        assert_eq!(groups[0].1.len(), 2);
    }

    #[test]
    fn test_unlisted_types_come_last() {
        let m = model(&[("r:o", ArtifactType::Other), ("r:c", ArtifactType::PrimaryUnit)]);
        let groups = categories(&m, &[ArtifactType::PrimaryUnit]);

        let kinds: Vec<_> = groups.iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, vec![ArtifactType::PrimaryUnit, ArtifactType::Other]);
    }

    #[test]
    fn test_blocks_are_centered_and_stacked() {
        let mut nodes: Vec<(String, ArtifactType)> = (0..7)
            .map(|i| (format!("r:c{i}"), ArtifactType::PrimaryUnit))
            .collect();
        nodes.push(("r:t0".to_string(), ArtifactType::Test));
        let refs: Vec<(&str, ArtifactType)> = nodes.iter().map(|(id, k)| (id.as_str(), *k)).collect();
        let m = model(&refs);

        let config = LayoutConfig::default();
        let positions = layout(&m, None, &config);

        // 7 nodes -> 3 columns, 3 rows
        let g = &config.grid;
        assert_eq!(positions["r:c0"].x, config.width / 2.0 - g.column_spacing);
        assert_eq!(positions["r:c2"].x, config.width / 2.0 + g.column_spacing);
        assert_eq!(positions["r:c6"].y, g.margin_top + 2.0 * g.row_spacing);

        // Single test node centered below the class block
        assert_eq!(positions["r:t0"].x, config.width / 2.0);
        assert_eq!(
            positions["r:t0"].y,
            g.margin_top + 3.0 * g.row_spacing + g.category_gap
        );
    }

    #[test]
    fn test_focus_gets_offset() {
        let m = model(&[("r:a", ArtifactType::PrimaryUnit), ("r:b", ArtifactType::PrimaryUnit)]);
        let config = LayoutConfig::default();
        let plain = layout(&m, None, &config);
        let focused = layout(&m, Some("r:a"), &config);

        assert_eq!(focused["r:a"].x - plain["r:a"].x, config.grid.focus_offset.0);
        assert_eq!(focused["r:a"].y - plain["r:a"].y, config.grid.focus_offset.1);
        assert_eq!(focused["r:b"], plain["r:b"]);
    }
}
