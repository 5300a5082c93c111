//! Input configuration shared by every command

use std::path::PathBuf;

use crate::common::{CommonArgs, ConfigBuilder, missing};
use crate::error::TangleError;

/// Where edges come from and how `tangle.toml` is found
#[derive(Debug, Clone)]
pub struct InputConfig {
    /// Edge files or directories
    pub paths: Vec<PathBuf>,
    /// Explicit `--config` file
    pub config_file: Option<PathBuf>,
    /// Directory searched for `tangle.toml` otherwise
    pub config_dir: PathBuf,
    /// Command line globs; empty means "use the file or the defaults"
    pub patterns: Vec<String>,
}

impl InputConfig {
    pub fn builder() -> InputConfigBuilder {
        InputConfigBuilder::default()
    }

    pub fn from_args(args: &CommonArgs) -> Result<Self, TangleError> {
        Self::builder()
            .with_paths(args.get_paths())
            .with_config_file(args.config.clone())
            .with_config_dir(args.config_dir())
            .with_patterns(args.patterns.clone())
            .build()
    }
}

#[derive(Default)]
pub struct InputConfigBuilder {
    paths: Option<Vec<PathBuf>>,
    config_file: Option<PathBuf>,
    config_dir: Option<PathBuf>,
    patterns: Vec<String>,
}

impl InputConfigBuilder {
    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = Some(paths);
        self
    }

    pub fn with_config_file(mut self, config_file: Option<PathBuf>) -> Self {
        self.config_file = config_file;
        self
    }

    pub fn with_config_dir(mut self, config_dir: PathBuf) -> Self {
        self.config_dir = Some(config_dir);
        self
    }

    pub fn with_patterns(mut self, patterns: Vec<String>) -> Self {
        self.patterns = patterns;
        self
    }
}

impl ConfigBuilder for InputConfigBuilder {
    type Config = InputConfig;

    fn build(self) -> Result<Self::Config, TangleError> {
        let paths = self.paths.ok_or_else(|| missing("paths"))?;
        if paths.is_empty() {
            return Err(TangleError::ConfigurationError {
                message: "At least one input path is required".to_string(),
            });
        }

        Ok(InputConfig {
            paths,
            config_file: self.config_file,
            config_dir: self.config_dir.unwrap_or_else(|| PathBuf::from(".")),
            patterns: self.patterns,
        })
    }
}
