//! Deps and impact command executor

use console::style;
use miette::{Result, WrapErr};

use crate::analyzer::{DependencyAnalyzer, TraversalDirection};
use crate::config::ReachConfig;
use crate::executors::{CommandExecutor, load_graph};
use crate::reports::generator_for;

pub struct ReachExecutor;

impl CommandExecutor for ReachExecutor {
    type Config = ReachConfig;

    fn execute(config: Self::Config) -> Result<()> {
        let heading = match config.direction {
            TraversalDirection::Dependencies => "Tracing what",
            TraversalDirection::Impact => "Tracing what a change to",
        };
        let tail = match config.direction {
            TraversalDirection::Dependencies => "depends on",
            TraversalDirection::Impact => "would affect",
        };
        eprintln!(
            "{} {} {} {}...\n",
            style("🔍").cyan(),
            heading,
            style(&config.variable).bold(),
            tail
        );

        let loaded = load_graph(&config.input)?;
        let analyzer = DependencyAnalyzer::new(&loaded.model);

        let reach = match config.direction {
            TraversalDirection::Dependencies => analyzer.find_dependencies(&config.variable),
            TraversalDirection::Impact => analyzer.find_impact(&config.variable),
        }
        .wrap_err_with(|| format!("Failed to trace {} of '{}'", config.direction, config.variable))?;

        let report = generator_for(config.format, None)
            .reach_report(&reach)
            .wrap_err("Failed to generate report")?;
        print!("{report}");

        Ok(())
    }
}
