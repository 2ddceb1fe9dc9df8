use crate::config::LayoutConfig;
use crate::error::Result;
use crate::filter::{FilterQuery, RelationFilter};
use crate::graph::GraphModel;
use crate::layout::{Jitter, LayoutEngine, LayoutStrategy};
use crate::relation::{GraphStats, LinkClassification, RelationIndex};
use crate::target::TargetResolver;
use crate::types::{AnalysisResult, Node, NodeId, PositionMap};

/// One analysis, ready to be laid out and filtered
///
/// Builds the model, resolves the focus once and indexes relations; every
/// query afterwards is a pure function of that snapshot.
#[derive(Debug, Clone)]
pub struct GraphView {
    model: GraphModel,
    index: RelationIndex,
    focus: Option<NodeId>,
}

impl GraphView {
    pub fn new(result: AnalysisResult) -> Result<Self> {
        let focus = TargetResolver::resolve(&result);
        let model = GraphModel::new(result)?;
        let index = RelationIndex::from_model(&model);

        match &focus {
            Some(id) => log::debug!("Focus node: {id}"),
            None => log::debug!("Empty analysis, no focus node"),
        }

        Ok(Self {
            model,
            index,
            focus,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::new(AnalysisResult::from_json_str(json)?)
    }

    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    pub fn model(&self) -> &GraphModel {
        &self.model
    }

    pub fn index(&self) -> &RelationIndex {
        &self.index
    }

    pub fn layout(&self, strategy: LayoutStrategy, config: &LayoutConfig, jitter: &mut Jitter) -> PositionMap {
        LayoutEngine::layout(strategy, &self.model, &self.index, self.focus(), config, jitter)
    }

    pub fn filter(&self, query: &FilterQuery) -> Vec<&Node> {
        RelationFilter::filter(&self.model, &self.index, self.focus(), query)
    }

    pub fn classify_links(&self) -> Vec<LinkClassification> {
        self.index.classify(&self.model, self.focus())
    }

    pub fn stats(&self) -> GraphStats {
        self.index.stats(&self.model, self.focus())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::ViewMode;
    use crate::relation::LinkRole;

    const DOC: &str = r#"{
        "nodes": [
            {"id": "core:src/Service.cls", "name": "Service", "path": "src/Service.cls", "repositoryId": "core", "type": "class"},
            {"id": "core:src/Repo.cls", "name": "Repo", "path": "src/Repo.cls", "repositoryId": "core", "type": "class"},
            {"id": "ui:cmp/panel", "name": "panel", "path": "cmp/panel", "repositoryId": "ui", "type": "ui-component"},
            {"id": "core:test/ServiceTest.cls", "name": "ServiceTest", "path": "test/ServiceTest.cls", "repositoryId": "core", "type": "test"}
        ],
        "links": [
            {"source": "core:src/Service.cls", "target": "core:src/Repo.cls", "type": "data-access"},
            {"source": "ui:cmp/panel", "target": "core:src/Service.cls", "type": "method-call"},
            {"source": "core:test/ServiceTest.cls", "target": "core:src/Service.cls", "type": "tests"}
        ],
        "metadata": {"repositories": ["core", "ui"], "analyzedFile": "src/Service.cls", "analysisDepth": 1}
    }"#;

    #[test]
    fn test_view_wires_components() {
        let view = GraphView::from_json_str(DOC).unwrap();
        assert_eq!(view.focus(), Some("core:src/Service.cls"));

        let deps = view.filter(&FilterQuery::new(ViewMode::Dependencies));
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].id, "core:src/Repo.cls");

        let dependents = view.filter(&FilterQuery::new(ViewMode::Dependents));
        assert_eq!(dependents.len(), 2);

        let classes = view.classify_links();
        assert_eq!(classes[0].role, LinkRole::Dependency);
        assert_eq!(classes[1].role, LinkRole::Dependent);
        assert!(classes[1].cross_repository);

        let stats = view.stats();
        assert_eq!(stats.focus_incoming, 2);
        assert_eq!(stats.focus_outgoing, 1);

        let positions = view.layout(LayoutStrategy::Radial, &LayoutConfig::default(), &mut Jitter::disabled());
        assert_eq!(positions.len(), 4);
    }

    #[test]
    fn test_invalid_document_is_an_error() {
        assert!(GraphView::from_json_str("{ not json").is_err());
        assert!(GraphView::from_json_str(r#"{"nodes": [{"id": "a:x"}, {"id": "a:x"}]}"#).is_err());
    }
}
