//! Command executors that handle the actual logic for each command

pub mod cycles;
pub mod export;
pub mod metrics;
pub mod paths;
pub mod reach;
pub mod unused;

use console::style;
use miette::{Result, WrapErr};
use tracing::info;

use crate::config::InputConfig;
use crate::graph::GraphModel;
use crate::loader::{EdgeLoader, LoadSummary};
use crate::progress::ProgressReporter;
use crate::project_config::ProjectConfig;
use crate::utils::string::pluralize;

/// Trait for command executors
pub trait CommandExecutor {
    type Config;

    /// Execute the command with the given configuration
    fn execute(config: Self::Config) -> Result<()>;
}

/// A freshly loaded graph together with the settings it was loaded under
pub struct LoadedGraph {
    pub model: GraphModel,
    pub project: ProjectConfig,
    pub summary: LoadSummary,
    /// Present when stderr is an interactive terminal
    pub progress: Option<ProgressReporter>,
}

/// Read `tangle.toml`, then discover and ingest every edge file
///
/// Command line patterns replace the file's patterns; with neither, the
/// built-in defaults apply. Rejected records are listed on stderr and do not
/// fail the load.
pub fn load_graph(input: &InputConfig) -> Result<LoadedGraph> {
    let project = ProjectConfig::discover(input.config_file.as_deref(), &input.config_dir)
        .wrap_err("Failed to read project configuration")?;

    let patterns = if input.patterns.is_empty() {
        &project.input.patterns
    } else {
        &input.patterns
    };
    let loader =
        EdgeLoader::with_patterns(patterns.as_slice()).wrap_err("Invalid input file pattern")?;

    // Create progress reporter if we're in an interactive terminal
    let mut progress = if console::Term::stderr().is_term() {
        Some(ProgressReporter::new())
    } else {
        None
    };

    if let Some(p) = progress.as_mut() {
        p.start_discovery();
    }
    let files = loader
        .discover(&input.paths, progress.as_ref())
        .wrap_err("Failed to discover edge files")?;
    if let Some(p) = progress.as_mut() {
        p.finish_discovery(files.len());
        p.start_parsing(files.len());
    }

    let mut model = GraphModel::new();
    let summary = loader
        .load_files(&files, &mut model, progress.as_ref())
        .wrap_err("Failed to load edge files")?;

    match progress.as_mut() {
        Some(p) => p.finish_parsing(summary.accepted, summary.rejected.len()),
        None => eprintln!(
            "{} Loaded {} {} from {} {}",
            style("✓").green(),
            style(summary.accepted).yellow().bold(),
            pluralize("edge", summary.accepted),
            summary.files,
            pluralize("file", summary.files)
        ),
    }

    for rejection in &summary.rejected {
        eprintln!("  {} {}", style("⚠").yellow(), style(rejection).dim());
    }

    if model.is_empty() {
        eprintln!("{} No variables found in the input", style("ℹ").blue());
    }

    info!(
        variables = model.variable_count(),
        edges = model.edge_count(),
        rejected = summary.rejected.len(),
        "graph ready"
    );

    Ok(LoadedGraph {
        model,
        project,
        summary,
        progress,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;
    use crate::common::ConfigBuilder;

    fn input_for(dir: &TempDir, patterns: Vec<String>) -> InputConfig {
        InputConfig::builder()
            .with_paths(vec![dir.path().to_path_buf()])
            .with_config_dir(dir.path().to_path_buf())
            .with_patterns(patterns)
            .build()
            .unwrap()
    }

    #[test]
    fn test_project_patterns_apply_without_cli_patterns() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("tangle.toml"),
            "[input]\npatterns = [\"*.edges\"]\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("scan.edges"),
            r#"[{"dependent":"a","dependency":"b","file":"m.py","line":1,"kind":"simple"}]"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("ignored.json"),
            r#"[{"dependent":"c","dependency":"d","file":"m.py","line":2,"kind":"simple"}]"#,
        )
        .unwrap();

        let loaded = load_graph(&input_for(&dir, vec![])).unwrap();

        assert!(loaded.model.contains("a"));
        assert!(!loaded.model.contains("c"));
        assert_eq!(loaded.summary.files, 1);
    }

    #[test]
    fn test_cli_patterns_override_project_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("tangle.toml"),
            "[input]\npatterns = [\"*.edges\"]\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("scan.json"),
            r#"[{"dependent":"a","dependency":"b","file":"m.py","line":1,"kind":"simple"}]"#,
        )
        .unwrap();

        let loaded = load_graph(&input_for(&dir, vec!["*.json".to_string()])).unwrap();
        assert_eq!(loaded.model.edge_count(), 1);
    }

    #[test]
    fn test_rejected_records_do_not_fail_the_load() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("scan.jsonl"),
            concat!(
                r#"{"dependent":"a","dependency":"b","file":"m.py","line":1,"kind":"simple"}"#,
                "\n",
                r#"{"dependent":"","dependency":"b","file":"m.py","line":2,"kind":"simple"}"#,
                "\n",
            ),
        )
        .unwrap();

        let loaded = load_graph(&input_for(&dir, vec![])).unwrap();
        assert_eq!(loaded.summary.accepted, 1);
        assert_eq!(loaded.summary.rejected.len(), 1);
    }

    #[test]
    fn test_missing_input_path_is_error() {
        let dir = TempDir::new().unwrap();
        let input = InputConfig::builder()
            .with_paths(vec![PathBuf::from("/definitely/not/here.json")])
            .with_config_dir(dir.path().to_path_buf())
            .build()
            .unwrap();

        assert!(load_graph(&input).is_err());
    }
}
