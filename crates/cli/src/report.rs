use depgraph_core::{
    FilterQuery, GraphView, LayoutStrategy, LinkClassification, Position, PositionMap, ViewMode,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReport {
    pub focus: Option<String>,
    pub strategy: LayoutStrategy,
    pub positions: Vec<Position>,
}

impl LayoutReport {
    /// Positions in input node order
    pub fn new(view: &GraphView, strategy: LayoutStrategy, mut positions: PositionMap) -> Self {
        let positions = view
            .model()
            .nodes()
            .iter()
            .filter_map(|node| positions.remove(&node.id))
            .collect();

        Self {
            focus: view.focus().map(str::to_string),
            strategy,
            positions,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterReport {
    pub focus: Option<String>,
    pub mode: ViewMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub nodes: Vec<String>,
}

impl FilterReport {
    pub fn new(view: &GraphView, query: &FilterQuery) -> Self {
        Self {
            focus: view.focus().map(str::to_string),
            mode: query.mode,
            search: query.search.clone(),
            nodes: view
                .filter(query)
                .into_iter()
                .map(|node| node.id.clone())
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyReport {
    pub focus: Option<String>,
    pub links: Vec<LinkClassification>,
}

impl ClassifyReport {
    pub fn new(view: &GraphView) -> Self {
        Self {
            focus: view.focus().map(str::to_string),
            links: view.classify_links(),
        }
    }
}
