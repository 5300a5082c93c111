//! Metrics, critical-path and summary command executor

use console::style;
use miette::{Result, WrapErr};

use crate::analyzer::DependencyAnalyzer;
use crate::config::{MetricsConfig, MetricsView};
use crate::executors::{CommandExecutor, load_graph};
use crate::reports::{SummaryReport, generator_for};

pub struct MetricsExecutor;

impl CommandExecutor for MetricsExecutor {
    type Config = MetricsConfig;

    fn execute(config: Self::Config) -> Result<()> {
        let heading = match config.view {
            MetricsView::Metrics => "Computing graph metrics",
            MetricsView::CriticalPath => "Searching for the longest dependency chain",
            MetricsView::Summary => "Summarizing variable dependencies",
        };
        eprintln!("{} {}...\n", style("📊").cyan(), heading);

        let loaded = load_graph(&config.input)?;
        let analyzer = DependencyAnalyzer::new(&loaded.model);
        let generator = generator_for(config.format, config.top);

        let report = match config.view {
            MetricsView::Metrics => {
                let metrics = analyzer
                    .get_metrics()
                    .wrap_err("Failed to compute graph metrics")?;
                generator.metrics_report(&metrics)
            }
            MetricsView::CriticalPath => {
                let path = analyzer
                    .get_critical_path()
                    .wrap_err("Failed to compute the critical path")?;
                generator.critical_path_report(&path)
            }
            MetricsView::Summary => {
                let summary = SummaryReport {
                    metrics: analyzer
                        .get_metrics()
                        .wrap_err("Failed to compute graph metrics")?,
                    cycles: analyzer
                        .detect_cycles()
                        .wrap_err("Failed to detect dependency cycles")?,
                    critical_path: analyzer
                        .get_critical_path()
                        .wrap_err("Failed to compute the critical path")?,
                };
                generator.summary_report(&summary)
            }
        }
        .wrap_err("Failed to generate report")?;

        print!("{report}");
        Ok(())
    }
}
