//! # Graph Model and Rendering Module
//!
//! This module owns the variable dependency graph and the ways of getting it
//! in and out of the process.
//!
//! ## Components
//!
//! ### Graph Model
//! - **GraphModel**: Directed multigraph of variables, built by ingesting
//!   edge records
//! - **VariableNode**: A named value with its first definition site
//! - **DependencyEdge**: One occurrence of a dependent requiring a dependency
//!
//! ### Export and Rendering
//! - **GraphExport**: Stable JSON document of nodes and edges that round-trips
//!   back into a model
//! - **GraphRenderer**: Renders graphs as DOT or Mermaid, optionally
//!   highlighting cycles
//!
//! ## Example
//!
//! ```
//! use petgraph::Direction;
//! use tangle::core::{Location, RelationKind};
//! use tangle::detector::CycleDetector;
//! use tangle::graph::{GraphModel, GraphRenderer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut model = GraphModel::new();
//! model.add_edge("total", "price", Location::new("shop.py", 3), RelationKind::Simple)?;
//! model.add_edge("total", "tax", Location::new("shop.py", 3), RelationKind::Simple)?;
//!
//! assert_eq!(model.neighbors("total", Direction::Outgoing)?, vec!["price", "tax"]);
//!
//! let mut detector = CycleDetector::new();
//! detector.detect_cycles(&model)?;
//!
//! let renderer = GraphRenderer::new(true, false);
//! let mut output = Vec::new();
//! renderer.render_dot(&model, detector.cycles(), &mut output)?;
//!
//! let dot_output = String::from_utf8(output)?;
//! assert!(dot_output.contains("digraph"));
//! assert!(dot_output.contains(r#""total" -> "price""#));
//! # Ok(())
//! # }
//! ```
//!
//! ## Output Formats
//!
//! - **JSON**: Export document for other tools
//! - **DOT**: Graphviz format for detailed visualization
//! - **Mermaid**: Markdown-compatible diagrams for documentation

mod export;
mod model;
mod renderer;
mod types;

pub use export::{ExportEdge, ExportNode, GraphExport};
pub use model::{GraphModel, IngestSummary, RejectedRecord};
pub use renderer::GraphRenderer;
pub use types::{DependencyEdge, DependencyEdgeBuilder, VariableNode};
