//! Command implementations for the tangle CLI
//!
//! Each command turns its `Commands` variant into a typed config and hands
//! it to the matching executor:
//! - cycles: circular dependency groups
//! - deps / impact: transitive reachability in either direction
//! - paths: simple paths between two variables
//! - metrics / critical-path / summary: whole-graph reports
//! - unused: variables nothing depends on
//! - export: JSON, DOT or Mermaid rendering of the graph

pub mod cycles;
pub mod export;
pub mod metrics;
pub mod paths;
pub mod reach;
pub mod unused;

use miette::Result;

use crate::cli::Commands;

/// Execute a command based on CLI input
pub fn execute_command(command: Commands) -> Result<()> {
    match &command {
        Commands::Cycles { .. } => cycles::execute_cycles_command(command),
        Commands::Deps { .. } | Commands::Impact { .. } => reach::execute_reach_command(command),
        Commands::Paths { .. } => paths::execute_paths_command(command),
        Commands::Metrics { .. } | Commands::CriticalPath { .. } | Commands::Summary { .. } => {
            metrics::execute_metrics_command(command)
        }
        Commands::Unused { .. } => unused::execute_unused_command(command),
        Commands::Export { .. } => export::execute_export_command(command),
    }
}
