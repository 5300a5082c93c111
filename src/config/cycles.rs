//! Cycles command configuration

use crate::cli::OutputFormat;
use crate::common::{ConfigBuilder, missing};
use crate::config::InputConfig;
use crate::error::TangleError;

/// Configuration for the cycles command
#[derive(Debug, Clone)]
pub struct CyclesConfig {
    pub input: InputConfig,
    /// Output format for the report
    pub format: OutputFormat,
    /// Whether to exit with error code if cycles are found
    pub error_on_cycles: bool,
    /// Maximum number of cycles to report (None = all)
    pub max_cycles: Option<usize>,
}

impl CyclesConfig {
    pub fn builder() -> CyclesConfigBuilder {
        CyclesConfigBuilder::new()
    }
}

#[derive(Default)]
pub struct CyclesConfigBuilder {
    input: Option<InputConfig>,
    format: Option<OutputFormat>,
    error_on_cycles: Option<bool>,
    max_cycles: Option<Option<usize>>,
}

impl CyclesConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, input: InputConfig) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_error_on_cycles(mut self, error_on_cycles: bool) -> Self {
        self.error_on_cycles = Some(error_on_cycles);
        self
    }

    pub fn with_max_cycles(mut self, max_cycles: Option<usize>) -> Self {
        self.max_cycles = Some(max_cycles);
        self
    }
}

impl ConfigBuilder for CyclesConfigBuilder {
    type Config = CyclesConfig;

    fn build(self) -> Result<Self::Config, TangleError> {
        Ok(CyclesConfig {
            input: self.input.ok_or_else(|| missing("input"))?,
            format: self.format.ok_or_else(|| missing("format"))?,
            error_on_cycles: self
                .error_on_cycles
                .ok_or_else(|| missing("error_on_cycles"))?,
            max_cycles: self.max_cycles.ok_or_else(|| missing("max_cycles"))?,
        })
    }
}
