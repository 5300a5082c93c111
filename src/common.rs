//! Common functionality shared across commands

use std::path::PathBuf;

use clap::Args;

use crate::error::TangleError;

/// Input arguments shared by every command
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Edge files or directories to load (defaults to current directory)
    #[arg(value_name = "PATH", env = "TANGLE_PATHS", value_delimiter = ',')]
    pub paths: Vec<PathBuf>,

    /// Project configuration file (defaults to ./tangle.toml when present)
    #[arg(long, value_name = "FILE", env = "TANGLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// File-name glob used when walking directories (repeatable)
    #[arg(long = "pattern", value_name = "GLOB", env = "TANGLE_PATTERN")]
    pub patterns: Vec<String>,
}

/// Common output format arguments
#[derive(Args, Debug, Clone)]
pub struct FormatArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = crate::constants::output::DEFAULT_FORMAT, env = "TANGLE_FORMAT")]
    pub format: crate::cli::OutputFormat,
}

/// Common cycle display arguments
#[derive(Args, Debug, Clone)]
pub struct CycleDisplayArgs {
    /// Maximum number of cycles to display (shows all by default)
    #[arg(long, env = "TANGLE_MAX_CYCLES")]
    pub max_cycles: Option<usize>,
}

impl CommonArgs {
    /// Get paths, using current directory if none provided
    pub fn get_paths(&self) -> Vec<PathBuf> {
        if self.paths.is_empty() {
            vec![std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))]
        } else {
            self.paths.clone()
        }
    }

    /// Directory searched for `tangle.toml` when `--config` is absent
    pub fn config_dir(&self) -> PathBuf {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }
}

/// Generic builder trait for configuration objects
pub trait ConfigBuilder: Sized {
    type Config;

    /// Build the configuration, returning an error if validation fails
    fn build(self) -> Result<Self::Config, TangleError>;
}

/// Trait for configurations that can be created from CLI commands
pub trait FromCommand: Sized {
    fn from_command(command: crate::cli::Commands) -> Result<Self, TangleError>;
}

/// Macro to implement `TryFrom<Commands>` using [`FromCommand`] trait
#[macro_export]
macro_rules! impl_try_from_command {
    ($config:ty) => {
        impl std::convert::TryFrom<$crate::cli::Commands> for $config {
            type Error = $crate::error::TangleError;

            fn try_from(command: $crate::cli::Commands) -> Result<Self, Self::Error> {
                <$config as $crate::common::FromCommand>::from_command(command)
            }
        }
    };
}

/// Shorthand for the error every builder returns on an unset field
pub(crate) fn missing(field: &str) -> TangleError {
    TangleError::ConfigurationError {
        message: format!("Missing required field: {field}"),
    }
}
