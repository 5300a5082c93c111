//! Configuration constants for tangle
//!
//! This module contains all configurable constants used throughout the
//! application. These values can be overridden through command line flags,
//! environment variables or `tangle.toml`.

use std::time::Duration;

/// Progress bar configuration
pub mod progress {
    use super::*;

    /// Duration between progress bar updates
    pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

    /// Spinner frames for the yarn-ball animation
    pub const SPINNER_FRAMES: &[&str] = &[
        "🧶 ", // Standard yarn ball
        "🧶⊙", // With center dot
        "🧶◐", // Quarter filled
        "🧶◓", // Half filled
        "🧶◑", // Three quarters
        "🧶◒", // Another quarter
        "🧶○", // Empty circle
        "🧶●", // Full circle
    ];
}

/// Output formatting configuration
pub mod output {
    /// Default output format when not specified
    pub const DEFAULT_FORMAT: &str = "human";

    /// Default number of entries in each metrics ranking
    pub const DEFAULT_TOP: usize = 10;
}

/// Edge file discovery
pub mod input {
    /// Glob patterns matched against file names when walking directories
    pub const DEFAULT_PATTERNS: &[&str] = &["*.json", "*.jsonl"];

    /// Directory names never descended into
    pub const SKIPPED_DIRS: &[&str] = &["target", "node_modules", "__pycache__"];
}

/// Path enumeration bounds used by the command line
pub mod paths {
    /// Paths listed by `tangle paths` unless overridden
    pub const DEFAULT_MAX_PATHS: usize = 20;
}

/// Project configuration file
pub mod config {
    /// File looked up in the current directory when `--config` is absent
    pub const FILE_NAME: &str = "tangle.toml";
}
