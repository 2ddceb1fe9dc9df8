use crate::graph::GraphModel;
use crate::types::{Link, LinkKind, Node, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Role of a link relative to the focus node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkRole {
    /// Focus -> other: the focus depends on the target
    Dependency,

    /// Other -> focus: the source depends on the focus
    Dependent,

    /// Link not touching the focus
    Indirect,
}

/// Classification of one resolved link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkClassification {
    pub source: NodeId,
    pub target: NodeId,
    pub kind: LinkKind,
    pub role: LinkRole,
    pub cross_repository: bool,
}

/// Summary counts for one analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub node_count: usize,

    /// Links as reported, dangling ones included
    pub raw_link_count: usize,
    pub resolved_link_count: usize,
    pub dangling_link_count: usize,
    pub cross_repo_link_count: usize,

    pub links_by_kind: BTreeMap<LinkKind, usize>,
    pub nodes_by_repository: BTreeMap<String, usize>,

    pub component_count: usize,
    pub has_cycles: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<NodeId>,
    pub focus_incoming: usize,
    pub focus_outgoing: usize,
}

/// Incoming/outgoing adjacency over resolved links
///
/// Rebuilt from scratch for every analysis; there are no incremental
/// updates.
#[derive(Debug, Clone, Default)]
pub struct RelationIndex {
    incoming: HashMap<NodeId, Vec<Link>>,
    outgoing: HashMap<NodeId, Vec<Link>>,
    cross_repo_links: Vec<Link>,
    raw_link_count: usize,
}

impl RelationIndex {
    /// Index `links` against `nodes`, skipping dangling links.
    pub fn build(nodes: &[Node], links: &[Link]) -> Self {
        let known: HashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();
        let mut index = Self {
            raw_link_count: links.len(),
            ..Default::default()
        };

        for link in links {
            if !known.contains(link.source.as_str()) || !known.contains(link.target.as_str()) {
                continue;
            }

            index
                .outgoing
                .entry(link.source.clone())
                .or_default()
                .push(link.clone());
            index
                .incoming
                .entry(link.target.clone())
                .or_default()
                .push(link.clone());

            if link.is_cross_repository() {
                index.cross_repo_links.push(link.clone());
            }
        }

        log::debug!(
            "Relation index: {} resolved of {} links, {} cross-repository",
            index.resolved_link_count(),
            index.raw_link_count,
            index.cross_repo_links.len()
        );

        index
    }

    /// Shorthand for building from a validated model
    pub fn from_model(model: &GraphModel) -> Self {
        Self::build(model.nodes(), model.links())
    }

    /// Links whose target is `id`
    pub fn incoming(&self, id: &str) -> &[Link] {
        self.incoming.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Links whose source is `id`
    pub fn outgoing(&self, id: &str) -> &[Link] {
        self.outgoing.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Distinct sources of links into `id`, in link order
    pub fn sources_of(&self, id: &str) -> Vec<&str> {
        dedup(self.incoming(id).iter().map(|link| link.source.as_str()))
    }

    /// Distinct targets of links out of `id`, in link order
    pub fn targets_of(&self, id: &str) -> Vec<&str> {
        dedup(self.outgoing(id).iter().map(|link| link.target.as_str()))
    }

    pub fn cross_repo_links(&self) -> &[Link] {
        &self.cross_repo_links
    }

    pub fn raw_link_count(&self) -> usize {
        self.raw_link_count
    }

    pub fn resolved_link_count(&self) -> usize {
        self.outgoing.values().map(Vec::len).sum()
    }

    pub fn dangling_link_count(&self) -> usize {
        self.raw_link_count - self.resolved_link_count()
    }

    /// Classify every resolved link relative to `focus`.
    ///
    /// Without a focus every link is [`LinkRole::Indirect`].
    pub fn classify(&self, model: &GraphModel, focus: Option<&str>) -> Vec<LinkClassification> {
        model
            .resolved_links()
            .map(|link| {
                let role = match focus {
                    Some(f) if link.source == f => LinkRole::Dependency,
                    Some(f) if link.target == f => LinkRole::Dependent,
                    _ => LinkRole::Indirect,
                };
                LinkClassification {
                    source: link.source.clone(),
                    target: link.target.clone(),
                    kind: link.kind,
                    role,
                    cross_repository: link.is_cross_repository(),
                }
            })
            .collect()
    }

    /// Summary statistics for `model`
    pub fn stats(&self, model: &GraphModel, focus: Option<&str>) -> GraphStats {
        let mut links_by_kind = BTreeMap::new();
        for link in model.resolved_links() {
            *links_by_kind.entry(link.kind).or_insert(0) += 1;
        }

        let mut nodes_by_repository = BTreeMap::new();
        for node in model.nodes() {
            *nodes_by_repository
                .entry(node.repository().to_string())
                .or_insert(0) += 1;
        }

        GraphStats {
            node_count: model.node_count(),
            raw_link_count: self.raw_link_count,
            resolved_link_count: self.resolved_link_count(),
            dangling_link_count: self.dangling_link_count(),
            cross_repo_link_count: self.cross_repo_links.len(),
            links_by_kind,
            nodes_by_repository,
            component_count: model.component_count(),
            has_cycles: model.has_cycles(),
            focus: focus.map(str::to_string),
            focus_incoming: focus.map(|f| self.incoming(f).len()).unwrap_or(0),
            focus_outgoing: focus.map(|f| self.outgoing(f).len()).unwrap_or(0),
        }
    }
}

fn dedup<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}
