//! Paths command executor

use console::style;
use miette::{Result, WrapErr};
use tracing::debug;

use crate::analyzer::{DependencyAnalyzer, PathLimits};
use crate::config::PathsConfig;
use crate::constants::paths::DEFAULT_MAX_PATHS;
use crate::executors::{CommandExecutor, load_graph};
use crate::reports::{PathsReport, generator_for};

pub struct PathsExecutor;

impl CommandExecutor for PathsExecutor {
    type Config = PathsConfig;

    fn execute(config: Self::Config) -> Result<()> {
        eprintln!(
            "{} Enumerating dependency paths from {} to {}...\n",
            style("🧵").cyan(),
            style(&config.from).bold(),
            style(&config.to).bold()
        );

        let loaded = load_graph(&config.input)?;

        let max_paths = config
            .max_paths
            .or(loaded.project.paths.max_paths)
            .unwrap_or(DEFAULT_MAX_PATHS);
        let max_depth = config.max_depth.or(loaded.project.paths.max_depth);

        // One extra path tells us whether the listing was cut short
        let mut limits = PathLimits::unbounded().with_max_paths(max_paths.saturating_add(1));
        if let Some(depth) = max_depth {
            limits = limits.with_max_depth(depth);
        }
        debug!(max_paths, ?max_depth, "path enumeration limits");

        let mut paths: Vec<_> = DependencyAnalyzer::new(&loaded.model)
            .find_paths_with(&config.from, &config.to, limits)
            .wrap_err_with(|| {
                format!(
                    "Failed to find paths from '{}' to '{}'",
                    config.from, config.to
                )
            })?
            .collect();

        let truncated = paths.len() > max_paths;
        paths.truncate(max_paths);

        let report = PathsReport {
            from: config.from,
            to: config.to,
            paths,
            limit: Some(max_paths),
            truncated,
        };

        let output = generator_for(config.format, None)
            .paths_report(&report)
            .wrap_err("Failed to generate report")?;
        print!("{output}");

        Ok(())
    }
}
