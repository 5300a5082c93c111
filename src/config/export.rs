//! Export command configuration

use std::path::PathBuf;

use crate::cli::ExportFormat;
use crate::common::{ConfigBuilder, missing};
use crate::config::InputConfig;
use crate::error::TangleError;

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub input: InputConfig,
    pub format: ExportFormat,
    pub output: Option<PathBuf>,
    pub highlight_cycles: bool,
    pub show_locations: bool,
}

impl ExportOptions {
    pub fn builder() -> ExportOptionsBuilder {
        ExportOptionsBuilder::new()
    }
}

#[derive(Default)]
pub struct ExportOptionsBuilder {
    input: Option<InputConfig>,
    format: Option<ExportFormat>,
    output: Option<Option<PathBuf>>,
    highlight_cycles: Option<bool>,
    show_locations: Option<bool>,
}

impl ExportOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, input: InputConfig) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_highlight_cycles(mut self, highlight_cycles: bool) -> Self {
        self.highlight_cycles = Some(highlight_cycles);
        self
    }

    pub fn with_show_locations(mut self, show_locations: bool) -> Self {
        self.show_locations = Some(show_locations);
        self
    }
}

impl ConfigBuilder for ExportOptionsBuilder {
    type Config = ExportOptions;

    fn build(self) -> Result<Self::Config, TangleError> {
        Ok(ExportOptions {
            input: self.input.ok_or_else(|| missing("input"))?,
            format: self.format.ok_or_else(|| missing("format"))?,
            output: self.output.ok_or_else(|| missing("output"))?,
            highlight_cycles: self
                .highlight_cycles
                .ok_or_else(|| missing("highlight_cycles"))?,
            show_locations: self
                .show_locations
                .ok_or_else(|| missing("show_locations"))?,
        })
    }
}
