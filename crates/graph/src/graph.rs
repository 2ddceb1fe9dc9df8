use crate::error::{GraphError, Result};
use crate::types::{AnalysisResult, Link, Node};
use petgraph::algo::{connected_components, is_cyclic_directed};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Validated, immutable view over one analysis result
///
/// Nodes keep their input order. Links are kept verbatim (dangling ones
/// included) for raw statistics; the petgraph mirror only carries
/// resolved links.
#[derive(Debug, Clone)]
pub struct GraphModel {
    result: AnalysisResult,

    /// Directed graph: node position -> link position
    graph: DiGraph<usize, usize>,

    /// Node id -> NodeIndex mapping for fast lookup
    id_index: HashMap<String, NodeIndex>,
}

impl GraphModel {
    /// Validate `result` and build lookup structures.
    ///
    /// Fails only for structurally invalid input: an empty node id or a
    /// duplicated one.
    pub fn new(result: AnalysisResult) -> Result<Self> {
        let mut graph = DiGraph::with_capacity(result.nodes.len(), result.links.len());
        let mut id_index = HashMap::with_capacity(result.nodes.len());

        for (position, node) in result.nodes.iter().enumerate() {
            if node.id.trim().is_empty() {
                return Err(GraphError::invalid_node(position, "empty id"));
            }
            if id_index.contains_key(&node.id) {
                return Err(GraphError::DuplicateNode(node.id.clone()));
            }
            let idx = graph.add_node(position);
            id_index.insert(node.id.clone(), idx);
        }

        let mut dangling = 0usize;
        for (position, link) in result.links.iter().enumerate() {
            match (id_index.get(&link.source), id_index.get(&link.target)) {
                (Some(&from), Some(&to)) => {
                    graph.add_edge(from, to, position);
                }
                _ => {
                    dangling += 1;
                    log::debug!("Dangling link {} -> {} excluded", link.source, link.target);
                }
            }
        }

        log::info!(
            "Built graph model: {} nodes, {} links ({} dangling)",
            graph.node_count(),
            graph.edge_count(),
            dangling
        );

        Ok(Self {
            result,
            graph,
            id_index,
        })
    }

    /// Underlying analysis result
    pub fn result(&self) -> &AnalysisResult {
        &self.result
    }

    /// Nodes in input order
    pub fn nodes(&self) -> &[Node] {
        &self.result.nodes
    }

    /// All links as reported, dangling ones included
    pub fn links(&self) -> &[Link] {
        &self.result.links
    }

    /// Links whose endpoints are both present, in input order
    pub fn resolved_links(&self) -> impl Iterator<Item = &Link> {
        self.result
            .links
            .iter()
            .filter(move |link| self.contains(&link.source) && self.contains(&link.target))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.id_index.contains_key(id)
    }

    /// Find node by id
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.id_index
            .get(id)
            .and_then(|&idx| self.graph.node_weight(idx))
            .and_then(|&position| self.result.nodes.get(position))
    }

    pub fn node_count(&self) -> usize {
        self.result.nodes.len()
    }

    /// Number of links with both endpoints present
    pub fn resolved_link_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.result.nodes.is_empty()
    }

    /// Number of weakly connected components
    pub fn component_count(&self) -> usize {
        connected_components(&self.graph)
    }

    /// True when resolved links form at least one directed cycle
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }
}
