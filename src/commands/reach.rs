//! Deps and impact command implementation

use miette::{Result, WrapErr};

use crate::analyzer::TraversalDirection;
use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::{InputConfig, ReachConfig};
use crate::error::TangleError;

impl FromCommand for ReachConfig {
    fn from_command(command: Commands) -> Result<Self, TangleError> {
        let (variable, common, format, direction) = match command {
            Commands::Deps {
                variable,
                common,
                format,
            } => (variable, common, format, TraversalDirection::Dependencies),
            Commands::Impact {
                variable,
                common,
                format,
            } => (variable, common, format, TraversalDirection::Impact),
            _ => {
                return Err(TangleError::ConfigurationError {
                    message: "Invalid command type for ReachConfig".to_string(),
                });
            }
        };

        ReachConfig::builder()
            .with_input(InputConfig::from_args(&common)?)
            .with_variable(variable)
            .with_direction(direction)
            .with_format(format.format)
            .build()
    }
}

crate::impl_try_from_command!(ReachConfig);

/// Execute the deps or impact command
pub fn execute_reach_command(command: Commands) -> Result<()> {
    let config = ReachConfig::from_command(command)
        .wrap_err("Failed to parse reachability command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::reach::ReachExecutor;
    ReachExecutor::execute(config)
}
