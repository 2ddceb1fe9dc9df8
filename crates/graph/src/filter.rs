use crate::graph::GraphModel;
use crate::relation::RelationIndex;
use crate::types::Node;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// Which relation subset a view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    /// Every node
    #[default]
    All,

    /// Targets of links leaving the focus
    Dependencies,

    /// Sources of links entering the focus
    Dependents,

    /// Nodes outside the reference repository
    CrossRepo,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "dependencies" | "deps" => Ok(Self::Dependencies),
            "dependents" => Ok(Self::Dependents),
            "cross-repo" | "cross_repo" | "crossrepo" => Ok(Self::CrossRepo),
            other => Err(format!("unknown view mode: {other}")),
        }
    }
}

/// Filter request for one view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    pub mode: ViewMode,

    /// Case-insensitive substring over name, path and repository
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// Primary repository for [`ViewMode::CrossRepo`]; defaults to the first
    /// repository listed in the analysis metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_repository: Option<String>,
}

impl FilterQuery {
    pub fn new(mode: ViewMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn reference_repository(mut self, repository: impl Into<String>) -> Self {
        self.reference_repository = Some(repository.into());
        self
    }
}

/// Produces the visible node subset for a view
pub struct RelationFilter;

impl RelationFilter {
    /// Nodes visible under `query`, in input order, each at most once.
    ///
    /// Relation modes return nothing when `focus` is unresolved.
    pub fn filter<'a>(
        model: &'a GraphModel,
        index: &RelationIndex,
        focus: Option<&str>,
        query: &FilterQuery,
    ) -> Vec<&'a Node> {
        let needle = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase);

        let scope: Option<HashSet<&str>> = match query.mode {
            ViewMode::All | ViewMode::CrossRepo => None,
            ViewMode::Dependencies => Some(
                focus
                    .map(|f| index.targets_of(f).into_iter().collect())
                    .unwrap_or_default(),
            ),
            ViewMode::Dependents => Some(
                focus
                    .map(|f| index.sources_of(f).into_iter().collect())
                    .unwrap_or_default(),
            ),
        };

        let reference = match query.mode {
            ViewMode::CrossRepo => {
                let reference = query
                    .reference_repository
                    .as_deref()
                    .or_else(|| model.result().metadata.repositories.first().map(String::as_str));
                if reference.is_none() {
                    log::debug!("Cross-repo view without a reference repository shows nothing");
                    return Vec::new();
                }
                reference
            }
            _ => None,
        };

        model
            .nodes()
            .iter()
            .filter(|node| scope.as_ref().map_or(true, |ids| ids.contains(node.id.as_str())))
            .filter(|node| reference.map_or(true, |repo| node.repository() != repo))
            .filter(|node| needle.as_deref().map_or(true, |term| matches_search(node, term)))
            .collect()
    }
}

/// `term` must already be lowercase
fn matches_search(node: &Node, term: &str) -> bool {
    [node.name.as_str(), node.path.as_str(), node.repository()]
        .iter()
        .any(|field| field.to_lowercase().contains(term))
}
