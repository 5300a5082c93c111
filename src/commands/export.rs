//! Export command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::{ExportOptions, InputConfig};
use crate::error::TangleError;

impl FromCommand for ExportOptions {
    fn from_command(command: Commands) -> Result<Self, TangleError> {
        match command {
            Commands::Export {
                common,
                format,
                output,
                highlight_cycles,
                show_locations,
            } => ExportOptions::builder()
                .with_input(InputConfig::from_args(&common)?)
                .with_format(format)
                .with_output(output)
                .with_highlight_cycles(highlight_cycles)
                .with_show_locations(show_locations)
                .build(),
            _ => Err(TangleError::ConfigurationError {
                message: "Invalid command type for ExportOptions".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(ExportOptions);

/// Execute the export command
pub fn execute_export_command(command: Commands) -> Result<()> {
    let options = ExportOptions::from_command(command)
        .wrap_err("Failed to parse export command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::export::ExportExecutor;
    ExportExecutor::execute(options)
}
