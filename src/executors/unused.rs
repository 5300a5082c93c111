//! Unused command executor

use console::style;
use miette::{Result, WrapErr};

use crate::analyzer::{DependencyAnalyzer, UnusedPolicy};
use crate::config::UnusedConfig;
use crate::executors::{CommandExecutor, load_graph};
use crate::reports::{UnusedReport, generator_for};

pub struct UnusedExecutor;

impl CommandExecutor for UnusedExecutor {
    type Config = UnusedConfig;

    fn execute(config: Self::Config) -> Result<()> {
        eprintln!(
            "{} Looking for variables nothing depends on...\n",
            style("🧹").cyan()
        );

        let loaded = load_graph(&config.input)?;

        // Outputs named in tangle.toml and on the command line both count
        let policy = UnusedPolicy::new()
            .with_outputs(loaded.project.unused.outputs.iter().cloned())
            .with_outputs(config.outputs);

        let candidates = DependencyAnalyzer::new(&loaded.model).find_unused_variables(&policy);
        let report = UnusedReport {
            candidates,
            outputs: policy.designated_outputs.iter().cloned().collect(),
        };

        let output = generator_for(config.format, None)
            .unused_report(&report)
            .wrap_err("Failed to generate report")?;
        print!("{output}");

        Ok(())
    }
}
