//! # Configuration Module
//!
//! Typed configuration for every tangle command. Each command has a config
//! struct with a validating builder; values come from the command line and
//! are merged with `tangle.toml` by the executors.
//!
//! ## Command Configurations
//!
//! - **CyclesConfig**: `cycles`
//! - **ReachConfig**: `deps` and `impact`
//! - **PathsConfig**: `paths`
//! - **MetricsConfig**: `metrics`, `critical-path` and `summary`
//! - **UnusedConfig**: `unused`
//! - **ExportOptions**: `export`
//!
//! ## Example
//!
//! ```
//! use std::path::PathBuf;
//!
//! use tangle::cli::OutputFormat;
//! use tangle::common::ConfigBuilder;
//! use tangle::config::{CyclesConfig, InputConfig};
//!
//! let input = InputConfig::builder()
//!     .with_paths(vec![PathBuf::from("scan/")])
//!     .build()
//!     .unwrap();
//!
//! let config = CyclesConfig::builder()
//!     .with_input(input)
//!     .with_format(OutputFormat::Json)
//!     .with_error_on_cycles(true)
//!     .with_max_cycles(None)
//!     .build()
//!     .unwrap();
//!
//! assert!(config.error_on_cycles);
//! ```

pub mod common;
pub mod cycles;
pub mod export;
pub mod metrics;
pub mod paths;
pub mod reach;
pub mod unused;

pub use common::InputConfig;
pub use cycles::CyclesConfig;
pub use export::ExportOptions;
pub use metrics::{MetricsConfig, MetricsView};
pub use paths::PathsConfig;
pub use reach::ReachConfig;
pub use unused::UnusedConfig;
