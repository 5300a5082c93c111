//! Unused command configuration

use crate::cli::OutputFormat;
use crate::common::{ConfigBuilder, missing};
use crate::config::InputConfig;
use crate::error::TangleError;

#[derive(Debug, Clone)]
pub struct UnusedConfig {
    pub input: InputConfig,
    pub format: OutputFormat,
    /// Designated outputs from the command line, merged with `tangle.toml`
    pub outputs: Vec<String>,
}

impl UnusedConfig {
    pub fn builder() -> UnusedConfigBuilder {
        UnusedConfigBuilder::default()
    }
}

#[derive(Default)]
pub struct UnusedConfigBuilder {
    input: Option<InputConfig>,
    format: Option<OutputFormat>,
    outputs: Vec<String>,
}

impl UnusedConfigBuilder {
    pub fn with_input(mut self, input: InputConfig) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<String>) -> Self {
        self.outputs = outputs;
        self
    }
}

impl ConfigBuilder for UnusedConfigBuilder {
    type Config = UnusedConfig;

    fn build(self) -> Result<Self::Config, TangleError> {
        Ok(UnusedConfig {
            input: self.input.ok_or_else(|| missing("input"))?,
            format: self.format.ok_or_else(|| missing("format"))?,
            outputs: self
                .outputs
                .into_iter()
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
        })
    }
}
