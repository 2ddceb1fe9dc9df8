//! Layout strategies mapping nodes to 2-D coordinates.

pub mod circular;
pub mod grid;
pub mod hierarchical;
mod jitter;
pub mod radial;

pub use jitter::{Jitter, MAX_JITTER_BOUND};

use crate::config::LayoutConfig;
use crate::graph::GraphModel;
use crate::relation::RelationIndex;
use crate::types::{Position, PositionMap};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Layout strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutStrategy {
    /// Rows of upstream / focus / downstream nodes
    Hierarchical,

    /// Blocks per artifact type
    Grid,

    /// Concentric rings around the focus
    Circular,

    /// Direct relations on opposite arcs, everything else on an outer ring
    Radial,
}

impl LayoutStrategy {
    pub const ALL: [LayoutStrategy; 4] = [
        LayoutStrategy::Hierarchical,
        LayoutStrategy::Grid,
        LayoutStrategy::Circular,
        LayoutStrategy::Radial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutStrategy::Hierarchical => "hierarchical",
            LayoutStrategy::Grid => "grid",
            LayoutStrategy::Circular => "circular",
            LayoutStrategy::Radial => "radial",
        }
    }
}

impl fmt::Display for LayoutStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hierarchical" | "tree" => Ok(Self::Hierarchical),
            "grid" => Ok(Self::Grid),
            "circular" | "circle" => Ok(Self::Circular),
            "radial" | "force" => Ok(Self::Radial),
            other => Err(format!("unknown layout strategy: {other}")),
        }
    }
}

/// Entry point for all strategies
pub struct LayoutEngine;

impl LayoutEngine {
    /// Compute one position per node.
    ///
    /// Never fails: an unknown or missing focus degrades to "no node
    /// centered", an empty graph yields an empty map, and any node a
    /// strategy leaves unplaced sits at `(0, 0)`.
    pub fn layout(
        strategy: LayoutStrategy,
        model: &GraphModel,
        index: &RelationIndex,
        focus: Option<&str>,
        config: &LayoutConfig,
        jitter: &mut Jitter,
    ) -> PositionMap {
        if model.is_empty() {
            return PositionMap::new();
        }

        let focus = match focus {
            Some(id) if !model.contains(id) => {
                log::warn!("Focus {id} is not part of the graph, laying out without focus");
                None
            }
            other => other,
        };

        let mut positions = match strategy {
            LayoutStrategy::Hierarchical => hierarchical::layout(model, index, focus, config, jitter),
            LayoutStrategy::Grid => grid::layout(model, focus, config),
            LayoutStrategy::Circular => circular::layout(model, focus, config, jitter),
            LayoutStrategy::Radial => radial::layout(model, index, focus, config),
        };

        for node in model.nodes() {
            if !positions.contains_key(&node.id) {
                log::debug!("{strategy} layout left {} unplaced", node.id);
                positions.insert(node.id.clone(), Position::origin(node.id.clone()));
            }
        }

        log::debug!("{strategy} layout placed {} nodes", positions.len());
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AnalysisResult, ArtifactType, Link, LinkKind, Node};

    fn sample() -> (GraphModel, RelationIndex) {
        let kinds = [
            ArtifactType::PrimaryUnit,
            ArtifactType::Test,
            ArtifactType::UiComponent,
            ArtifactType::Trigger,
            ArtifactType::Other,
        ];
        let nodes: Vec<Node> = (0..23)
            .map(|i| Node::new(format!("r{}:n{i}", i % 2), kinds[i % kinds.len()]))
            .collect();
        let mut links: Vec<Link> = (1..23)
            .map(|i| Link::new(nodes[i].id.clone(), nodes[(i * 7) % 23].id.clone(), LinkKind::Import))
            .collect();
        links.push(Link::new("r0:n0", "ghost:node", LinkKind::References));
        let model = GraphModel::new(AnalysisResult::new(nodes, links)).unwrap();
        let index = RelationIndex::from_model(&model);
        (model, index)
    }

    #[test]
    fn test_every_strategy_places_every_node() {
        let (model, index) = sample();
        let config = LayoutConfig::default();

        for strategy in LayoutStrategy::ALL {
            for focus in [Some("r0:n0"), Some("nope"), None] {
                let positions =
                    LayoutEngine::layout(strategy, &model, &index, focus, &config, &mut Jitter::seeded(1));
                assert_eq!(positions.len(), model.node_count(), "{strategy} focus={focus:?}");
                for node in model.nodes() {
                    assert_eq!(positions[&node.id].node_id, node.id);
                }
            }
        }
    }

    #[test]
    fn test_empty_graph_yields_empty_map() {
        let model = GraphModel::new(AnalysisResult::default()).unwrap();
        let index = RelationIndex::from_model(&model);

        for strategy in LayoutStrategy::ALL {
            let positions = LayoutEngine::layout(
                strategy,
                &model,
                &index,
                None,
                &LayoutConfig::default(),
                &mut Jitter::from_entropy(),
            );
            assert!(positions.is_empty());
        }
    }

    #[test]
    fn test_disabled_jitter_is_deterministic() {
        let (model, index) = sample();
        let config = LayoutConfig::default();

        for strategy in LayoutStrategy::ALL {
            let a = LayoutEngine::layout(strategy, &model, &index, Some("r0:n0"), &config, &mut Jitter::disabled());
            let b = LayoutEngine::layout(strategy, &model, &index, Some("r0:n0"), &config, &mut Jitter::disabled());
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_seeded_jitter_is_reproducible() {
        let (model, index) = sample();
        let config = LayoutConfig::default();

        let a = LayoutEngine::layout(LayoutStrategy::Circular, &model, &index, None, &config, &mut Jitter::seeded(9));
        let b = LayoutEngine::layout(LayoutStrategy::Circular, &model, &index, None, &config, &mut Jitter::seeded(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("Grid".parse::<LayoutStrategy>(), Ok(LayoutStrategy::Grid));
        assert_eq!("force".parse::<LayoutStrategy>(), Ok(LayoutStrategy::Radial));
        assert!("spiral".parse::<LayoutStrategy>().is_err());
        for strategy in LayoutStrategy::ALL {
            assert_eq!(strategy.to_string().parse::<LayoutStrategy>(), Ok(strategy));
        }
    }
}
