//! Metrics, critical-path and summary command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::{InputConfig, MetricsConfig, MetricsView};
use crate::error::TangleError;

impl FromCommand for MetricsConfig {
    fn from_command(command: Commands) -> Result<Self, TangleError> {
        match command {
            Commands::Metrics {
                common,
                format,
                top,
            } => MetricsConfig::builder()
                .with_input(InputConfig::from_args(&common)?)
                .with_view(MetricsView::Metrics)
                .with_format(format.format)
                .with_top(top)
                .build(),
            Commands::CriticalPath { common, format } => MetricsConfig::builder()
                .with_input(InputConfig::from_args(&common)?)
                .with_view(MetricsView::CriticalPath)
                .with_format(format.format)
                .build(),
            Commands::Summary { common, format } => MetricsConfig::builder()
                .with_input(InputConfig::from_args(&common)?)
                .with_view(MetricsView::Summary)
                .with_format(format.format)
                .build(),
            _ => Err(TangleError::ConfigurationError {
                message: "Invalid command type for MetricsConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(MetricsConfig);

/// Execute one of the whole-graph report commands
pub fn execute_metrics_command(command: Commands) -> Result<()> {
    let config = MetricsConfig::from_command(command)
        .wrap_err("Failed to parse metrics command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::metrics::MetricsExecutor;
    MetricsExecutor::execute(config)
}
