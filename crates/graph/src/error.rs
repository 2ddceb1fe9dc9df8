use thiserror::Error;

/// Result type for graph operations
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors raised for structurally invalid input.
///
/// Degraded-but-valid input (missing focus, dangling links, empty graphs)
/// never produces an error; see the individual components.
#[derive(Error, Debug)]
pub enum GraphError {
    /// Node is missing a usable identifier
    #[error("Invalid node at position {position}: {reason}")]
    InvalidNode { position: usize, reason: String },

    /// Two nodes share the same identifier
    #[error("Duplicate node id: {0}")]
    DuplicateNode(String),

    /// Layout configuration violates an invariant
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Analysis document could not be decoded
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration file could not be decoded
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    /// Create an invalid node error
    pub fn invalid_node(position: usize, reason: impl Into<String>) -> Self {
        Self::InvalidNode {
            position,
            reason: reason.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
