//! Cycles command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::{CyclesConfig, InputConfig};
use crate::error::TangleError;

impl FromCommand for CyclesConfig {
    fn from_command(command: Commands) -> Result<Self, TangleError> {
        match command {
            Commands::Cycles {
                common,
                format,
                cycle_display,
                error_on_cycles,
            } => CyclesConfig::builder()
                .with_input(InputConfig::from_args(&common)?)
                .with_format(format.format)
                .with_error_on_cycles(error_on_cycles)
                .with_max_cycles(cycle_display.max_cycles)
                .build(),
            _ => Err(TangleError::ConfigurationError {
                message: "Invalid command type for CyclesConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(CyclesConfig);

/// Execute the cycles command for detecting circular dependencies
pub fn execute_cycles_command(command: Commands) -> Result<()> {
    let config = CyclesConfig::from_command(command)
        .wrap_err("Failed to parse cycles command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::cycles::CyclesExecutor;
    CyclesExecutor::execute(config)
}
