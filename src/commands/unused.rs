//! Unused command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::{InputConfig, UnusedConfig};
use crate::error::TangleError;

impl FromCommand for UnusedConfig {
    fn from_command(command: Commands) -> Result<Self, TangleError> {
        match command {
            Commands::Unused {
                common,
                format,
                outputs,
            } => UnusedConfig::builder()
                .with_input(InputConfig::from_args(&common)?)
                .with_format(format.format)
                .with_outputs(outputs)
                .build(),
            _ => Err(TangleError::ConfigurationError {
                message: "Invalid command type for UnusedConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(UnusedConfig);

/// Execute the unused command
pub fn execute_unused_command(command: Commands) -> Result<()> {
    let config = UnusedConfig::from_command(command)
        .wrap_err("Failed to parse unused command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::unused::UnusedExecutor;
    UnusedExecutor::execute(config)
}
