//! # Tangle - Analyze Variable Dependency Graphs
//!
//! Tangle takes the variable dependency edges a source scanner emits (`total
//! = price * qty` gives `total -> price` and `total -> qty`) and answers
//! questions about them: which variables are mutually dependent, what a
//! variable transitively needs, what a change would affect, how two
//! variables are connected, and which variables nothing uses.
//!
//! ## Main Components
//!
//! - **Graph**: The [`graph::GraphModel`] built from edge records, plus JSON
//!   export and DOT / Mermaid rendering
//! - **Detector**: Cycle detection with Tarjan's strongly connected components
//! - **Analyzer**: Reachability, path enumeration, metrics, critical path and
//!   unused variables behind [`analyzer::DependencyAnalyzer`]
//! - **Loader** / **Store**: Getting edges in from files or a persistent store
//! - **Reports**: Human, JSON and GitHub Actions output
//!
//! ## Usage
//!
//! ### Example: Loading Scanner Output
//!
//! ```no_run
//! use std::path::PathBuf;
//!
//! use tangle::analyzer::DependencyAnalyzer;
//! use tangle::graph::GraphModel;
//! use tangle::loader::EdgeLoader;
//! use tangle::reports::{HumanReportGenerator, ReportGenerator};
//!
//! # fn main() -> miette::Result<()> {
//! // Step 1: Load every *.json / *.jsonl edge file under scan/
//! let mut model = GraphModel::new();
//! let summary = EdgeLoader::new().load(&[PathBuf::from("scan/")], &mut model, None)?;
//!
//! println!(
//!     "Loaded {} edges, skipped {} malformed records",
//!     summary.accepted,
//!     summary.rejected.len()
//! );
//!
//! // Step 2: Ask questions
//! let analyzer = DependencyAnalyzer::new(&model);
//! let impact = analyzer.find_impact("tax_rate")?;
//! println!("Changing tax_rate affects {} variables", impact.len());
//!
//! // Step 3: Report cycles
//! let mut detector = tangle::detector::CycleDetector::new();
//! detector.detect_cycles(&model)?;
//! println!("{}", HumanReportGenerator::new(Some(5)).generate_report(&detector)?);
//! # Ok(())
//! # }
//! ```
//!
//! ### Example: Building a Graph by Hand
//!
//! ```
//! use tangle::analyzer::{DependencyAnalyzer, PathLimits};
//! use tangle::core::{Location, RelationKind};
//! use tangle::graph::GraphModel;
//!
//! # fn main() -> Result<(), tangle::error::TangleError> {
//! let mut model = GraphModel::new();
//! model.add_edge("total", "subtotal", Location::new("cart.py", 10), RelationKind::Simple)?;
//! model.add_edge("total", "tax", Location::new("cart.py", 10), RelationKind::Simple)?;
//! model.add_edge("tax", "subtotal", Location::new("cart.py", 9), RelationKind::Simple)?;
//!
//! let analyzer = DependencyAnalyzer::new(&model);
//!
//! let paths: Vec<_> = analyzer
//!     .find_paths_with("total", "subtotal", PathLimits::unbounded().with_max_paths(10))?
//!     .collect();
//! assert_eq!(paths.len(), 2);
//!
//! assert!(analyzer.detect_cycles()?.is_empty());
//! assert_eq!(analyzer.get_critical_path()?.variables(), vec!["total", "tax", "subtotal"]);
//! # Ok(())
//! # }
//! ```

// Private modules
mod constants;
mod utils;

// Public modules
pub mod analyzer;
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod core;
pub mod detector;
pub mod error;
pub mod executors;
pub mod graph;
pub mod loader;
pub mod progress;
pub mod project_config;
pub mod reports;
pub mod store;

/// Install the stderr log subscriber
///
/// `TANGLE_LOG` takes an `EnvFilter` directive; otherwise each `-v` raises
/// the level from `warn`.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("TANGLE_LOG")
                .unwrap_or_else(|_| EnvFilter::new(format!("tangle={level}"))),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

// Main entry point for the library
pub fn run() -> miette::Result<()> {
    use clap::Parser;

    use crate::cli::Cli;
    use crate::commands::execute_command;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    execute_command(cli.command)
}
