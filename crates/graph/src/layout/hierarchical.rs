//! Topological leveling around the focus node.
//!
//! Upstream nodes (sources of links into the focus) stack above it,
//! downstream nodes (targets of links out of it) below. Levels that end up
//! empty are dropped and the rows below move up; this compaction avoids
//! blank rows and is part of the layout policy.

use super::Jitter;
use crate::config::LayoutConfig;
use crate::graph::GraphModel;
use crate::relation::RelationIndex;
use crate::types::{NodeId, Position, PositionMap};
use std::collections::HashSet;

/// Rank of the row holding everything not reachable within two hops
pub const REMAINDER_RANK: i32 = i32::MAX;

/// One row of the hierarchical layout
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    /// -2, -1, 0, +1, +2, or [`REMAINDER_RANK`]
    pub rank: i32,
    pub nodes: Vec<NodeId>,
}

/// Compute non-empty levels, top to bottom.
pub fn levels(model: &GraphModel, index: &RelationIndex, focus: Option<&str>) -> Vec<Level> {
    let mut placed: HashSet<&str> = HashSet::new();
    let focus = focus.filter(|id| model.contains(id));

    let (mut up1, mut up2, mut down1, mut down2) = (vec![], vec![], vec![], vec![]);
    if let Some(f) = focus {
        placed.insert(f);
        up1 = claim(&mut placed, index.sources_of(f));
        up2 = claim(
            &mut placed,
            up1.iter().flat_map(|id| index.sources_of(id)).collect(),
        );
        down1 = claim(&mut placed, index.targets_of(f));
        down2 = claim(
            &mut placed,
            down1.iter().flat_map(|id| index.targets_of(id)).collect(),
        );
    }

    let remainder: Vec<&str> = model
        .nodes()
        .iter()
        .map(|node| node.id.as_str())
        .filter(|id| !placed.contains(id))
        .collect();

    let rows = [
        (-2, up2),
        (-1, up1),
        (0, focus.into_iter().collect()),
        (1, down1),
        (2, down2),
        (REMAINDER_RANK, remainder),
    ];

    rows.into_iter()
        .filter(|(_, ids)| !ids.is_empty())
        .map(|(rank, ids)| Level {
            rank,
            nodes: ids.into_iter().map(str::to_string).collect(),
        })
        .collect()
}

/// Keep the candidates not yet placed, marking them placed.
fn claim<'a>(placed: &mut HashSet<&'a str>, candidates: Vec<&'a str>) -> Vec<&'a str> {
    candidates
        .into_iter()
        .filter(|id| placed.insert(*id))
        .collect()
}

pub(super) fn layout(
    model: &GraphModel,
    index: &RelationIndex,
    focus: Option<&str>,
    config: &LayoutConfig,
    jitter: &mut Jitter,
) -> PositionMap {
    let h = &config.hierarchical;
    let mut positions = PositionMap::with_capacity(model.node_count());

    for (row, level) in levels(model, index, focus).into_iter().enumerate() {
        let y = h.margin_top + row as f64 * h.row_height;
        let xs = row_positions(level.nodes.len(), config.width, h.min_spacing);

        for (id, x) in level.nodes.into_iter().zip(xs) {
            let x = x + jitter.offset(h.jitter_x);
            let y = y + jitter.offset(h.jitter_y);
            positions.insert(id.clone(), Position::new(id, x, y));
        }
    }

    positions
}

/// Evenly spread `count` x coordinates centered on the canvas.
fn row_positions(count: usize, width: f64, min_spacing: f64) -> Vec<f64> {
    match count {
        0 => vec![],
        1 => vec![width / 2.0],
        n => {
            let spacing = (width / (n as f64 + 1.0)).max(min_spacing);
            let start = (width - spacing * (n as f64 - 1.0)) / 2.0;
            (0..n).map(|i| start + i as f64 * spacing).collect()
        }
    }
}
