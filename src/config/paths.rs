//! Paths command configuration

use crate::cli::OutputFormat;
use crate::common::{ConfigBuilder, missing};
use crate::config::InputConfig;
use crate::error::TangleError;

/// Configuration for the paths command
///
/// The limits stay optional here; `tangle.toml` and the built-in default
/// fill them in once the project file has been read.
#[derive(Debug, Clone)]
pub struct PathsConfig {
    pub input: InputConfig,
    pub from: String,
    pub to: String,
    pub format: OutputFormat,
    pub max_paths: Option<usize>,
    pub max_depth: Option<usize>,
}

impl PathsConfig {
    pub fn builder() -> PathsConfigBuilder {
        PathsConfigBuilder::default()
    }
}

#[derive(Default)]
pub struct PathsConfigBuilder {
    input: Option<InputConfig>,
    from: Option<String>,
    to: Option<String>,
    format: Option<OutputFormat>,
    max_paths: Option<Option<usize>>,
    max_depth: Option<Option<usize>>,
}

impl PathsConfigBuilder {
    pub fn with_input(mut self, input: InputConfig) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_from(mut self, from: String) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_to(mut self, to: String) -> Self {
        self.to = Some(to);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_max_paths(mut self, max_paths: Option<usize>) -> Self {
        self.max_paths = Some(max_paths);
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

impl ConfigBuilder for PathsConfigBuilder {
    type Config = PathsConfig;

    fn build(self) -> Result<Self::Config, TangleError> {
        let max_paths = self.max_paths.ok_or_else(|| missing("max_paths"))?;
        if max_paths == Some(0) {
            return Err(TangleError::ConfigurationError {
                message: "--max-paths must be at least 1".to_string(),
            });
        }

        Ok(PathsConfig {
            input: self.input.ok_or_else(|| missing("input"))?,
            from: self.from.ok_or_else(|| missing("from"))?,
            to: self.to.ok_or_else(|| missing("to"))?,
            format: self.format.ok_or_else(|| missing("format"))?,
            max_paths,
            max_depth: self.max_depth.ok_or_else(|| missing("max_depth"))?,
        })
    }
}
