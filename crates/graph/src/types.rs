use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Node identifier, formatted as `<repository>:<path>`
pub type NodeId = String;

/// Repository component of a node id (everything before the first `:`).
///
/// Ids without a separator have no repository and yield an empty string.
pub fn repository_of(id: &str) -> &str {
    id.split_once(':').map(|(repo, _)| repo).unwrap_or("")
}

/// Kind of code artifact a node represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactType {
    /// Primary language unit (class, module, source file)
    #[serde(alias = "class", alias = "primary-language-unit")]
    PrimaryUnit,

    /// Trigger-like unit bound to data events
    Trigger,

    /// UI component
    #[serde(alias = "component", alias = "lwc", alias = "aura")]
    UiComponent,

    /// Test class or test file
    Test,

    /// Anything else
    #[serde(other)]
    Other,
}

impl ArtifactType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactType::PrimaryUnit => "primary-unit",
            ArtifactType::Trigger => "trigger",
            ArtifactType::UiComponent => "ui-component",
            ArtifactType::Test => "test",
            ArtifactType::Other => "other",
        }
    }
}

impl Default for ArtifactType {
    fn default() -> Self {
        Self::Other
    }
}

/// Type of relationship a link expresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkKind {
    /// A imports B
    Import,

    /// A extends B
    Extends,

    /// A implements interface B
    Implements,

    /// A mentions B by name
    References,

    /// A is a test exercising B
    Tests,

    /// A calls a method of B
    MethodCall,

    /// A reads or writes data owned by B
    DataAccess,

    /// A constructs B
    Instantiates,

    /// A uses B as a type
    TypeReference,

    /// A accesses a field of B
    FieldAccess,

    /// A publishes an event consumed by B
    EventPublish,

    /// A subscribes to events of B
    EventSubscribe,

    /// A embeds UI component B
    ComponentUsage,

    /// A fires on changes to B
    Trigger,

    /// A is annotated with B
    Annotation,

    /// A is configured by B
    Configuration,

    /// Relationship the analyzer reported but this model does not know
    #[serde(other)]
    Unknown,
}

fn default_strength() -> f64 {
    1.0
}

/// One analyzable code artifact in one repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique id (`<repository>:<path>`)
    pub id: NodeId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub path: String,

    #[serde(default)]
    pub repository_id: String,

    #[serde(default, alias = "type")]
    pub artifact_type: ArtifactType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methods: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_interface: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_abstract: Option<bool>,
}

impl Node {
    pub fn new(id: impl Into<String>, artifact_type: ArtifactType) -> Self {
        let id = id.into();
        let path = id
            .split_once(':')
            .map(|(_, path)| path.to_string())
            .unwrap_or_default();
        let name = path.rsplit('/').next().unwrap_or_default().to_string();

        Self {
            repository_id: repository_of(&id).to_string(),
            id,
            name,
            path,
            artifact_type,
            size_bytes: None,
            methods: None,
            is_interface: None,
            is_abstract: None,
        }
    }

    /// Repository this node belongs to.
    ///
    /// Falls back to the id prefix when the analyzer left `repositoryId` empty.
    pub fn repository(&self) -> &str {
        if self.repository_id.is_empty() {
            repository_of(&self.id)
        } else {
            &self.repository_id
        }
    }
}

/// Directed, typed dependency between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub source: NodeId,

    pub target: NodeId,

    #[serde(alias = "type")]
    pub kind: LinkKind,

    /// Relative weight reported by the analyzer
    #[serde(default = "default_strength")]
    pub strength: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_method: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_method: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_snippet: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_lines: Option<Vec<String>>,
}

impl Link {
    pub fn new(source: impl Into<String>, target: impl Into<String>, kind: LinkKind) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind,
            strength: default_strength(),
            source_method: None,
            target_method: None,
            line_number: None,
            code_snippet: None,
            context_lines: None,
        }
    }

    /// Source and target live in different (known) repositories
    pub fn is_cross_repository(&self) -> bool {
        let source_repo = repository_of(&self.source);
        let target_repo = repository_of(&self.target);
        !source_repo.is_empty() && !target_repo.is_empty() && source_repo != target_repo
    }
}

/// Metadata the discovery service attaches to an analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    #[serde(default)]
    pub repositories: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzed_file: Option<String>,

    #[serde(default)]
    pub analysis_depth: u32,

    /// Fields this engine does not interpret, kept verbatim
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Immutable input unit: one analysis result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub nodes: Vec<Node>,

    #[serde(default)]
    pub links: Vec<Link>,

    #[serde(default)]
    pub metadata: AnalysisMetadata,
}

impl AnalysisResult {
    pub fn new(nodes: Vec<Node>, links: Vec<Link>) -> Self {
        Self {
            nodes,
            links,
            metadata: AnalysisMetadata::default(),
        }
    }

    /// Set the analyzed file used for focus resolution
    pub fn analyzed_file(mut self, path: impl Into<String>) -> Self {
        self.metadata.analyzed_file = Some(path.into());
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Computed coordinates for one node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub node_id: NodeId,
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(node_id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            node_id: node_id.into(),
            x,
            y,
        }
    }

    /// Fallback for nodes a strategy could not place
    pub fn origin(node_id: impl Into<String>) -> Self {
        Self::new(node_id, 0.0, 0.0)
    }
}

/// Node id -> position, one entry per node
pub type PositionMap = HashMap<NodeId, Position>;
