//! # Depgraph Core
//!
//! Relationship analysis and layout for code dependency graphs.
//!
//! ## Features
//!
//! - **Focus resolution** - pick the node a view is centered on
//! - **Relation indexing** - incoming/outgoing adjacency, cross-repository links
//! - **Layout strategies** - hierarchical, grid, circular and radial coordinates
//! - **View filtering** - dependencies, dependents, cross-repo and text search
//!
//! ## Architecture
//!
//! ```text
//! AnalysisResult (from the discovery service)
//!     │
//!     ├──> GraphModel (validated, petgraph mirror)
//!     │
//!     ├──> TargetResolver ──> focus node id
//!     │
//!     ├──> RelationIndex
//!     │      ├─ incoming / outgoing links per node
//!     │      ├─ cross-repository links
//!     │      └─ link classification + statistics
//!     │
//!     ├──> LayoutEngine (strategy + LayoutConfig + Jitter)
//!     │      └─ NodeId -> Position
//!     │
//!     └──> RelationFilter (view mode + search)
//!            └─ visible nodes
//! ```
//!
//! ## Example
//!
//! ```rust
//! use depgraph_core::{FilterQuery, GraphView, Jitter, LayoutConfig, LayoutStrategy, ViewMode};
//!
//! let json = r#"{
//!     "nodes": [
//!         {"id": "core:Service.cls", "path": "Service.cls", "type": "class"},
//!         {"id": "core:Repo.cls", "path": "Repo.cls", "type": "class"}
//!     ],
//!     "links": [{"source": "core:Service.cls", "target": "core:Repo.cls", "type": "data-access"}],
//!     "metadata": {"analyzedFile": "Service.cls"}
//! }"#;
//!
//! let view = GraphView::from_json_str(json).unwrap();
//! assert_eq!(view.focus(), Some("core:Service.cls"));
//!
//! let positions = view.layout(LayoutStrategy::Hierarchical, &LayoutConfig::default(), &mut Jitter::disabled());
//! assert!(positions["core:Service.cls"].y < positions["core:Repo.cls"].y);
//!
//! let deps = view.filter(&FilterQuery::new(ViewMode::Dependencies));
//! assert_eq!(deps[0].id, "core:Repo.cls");
//! ```

mod cache;
mod config;
mod error;
mod filter;
mod graph;
pub mod layout;
mod relation;
mod target;
mod types;
mod view;

pub use cache::{AnalysisCache, CacheKey};
pub use config::{CircularConfig, GridConfig, HierarchicalConfig, LayoutConfig, RadialConfig};
pub use error::{GraphError, Result};
pub use filter::{FilterQuery, RelationFilter, ViewMode};
pub use graph::GraphModel;
pub use layout::{Jitter, LayoutEngine, LayoutStrategy};
pub use relation::{GraphStats, LinkClassification, LinkRole, RelationIndex};
pub use target::TargetResolver;
pub use types::{
    repository_of, AnalysisMetadata, AnalysisResult, ArtifactType, Link, LinkKind, Node, NodeId,
    Position, PositionMap,
};
pub use view::GraphView;
