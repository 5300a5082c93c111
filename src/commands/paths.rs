//! Paths command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::{InputConfig, PathsConfig};
use crate::error::TangleError;

impl FromCommand for PathsConfig {
    fn from_command(command: Commands) -> Result<Self, TangleError> {
        match command {
            Commands::Paths {
                from,
                to,
                common,
                format,
                max_paths,
                max_depth,
            } => PathsConfig::builder()
                .with_input(InputConfig::from_args(&common)?)
                .with_from(from)
                .with_to(to)
                .with_format(format.format)
                .with_max_paths(max_paths)
                .with_max_depth(max_depth)
                .build(),
            _ => Err(TangleError::ConfigurationError {
                message: "Invalid command type for PathsConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(PathsConfig);

/// Execute the paths command
pub fn execute_paths_command(command: Commands) -> Result<()> {
    let config = PathsConfig::from_command(command)
        .wrap_err("Failed to parse paths command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::paths::PathsExecutor;
    PathsExecutor::execute(config)
}
