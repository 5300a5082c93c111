//! Metrics, critical-path and summary command configuration

use crate::cli::OutputFormat;
use crate::common::{ConfigBuilder, missing};
use crate::config::InputConfig;
use crate::error::TangleError;

/// Which whole-graph report to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricsView {
    Metrics,
    CriticalPath,
    Summary,
}

#[derive(Debug, Clone)]
pub struct MetricsConfig {
    pub input: InputConfig,
    pub view: MetricsView,
    pub format: OutputFormat,
    /// Rows per ranking in human output (None = all)
    pub top: Option<usize>,
}

impl MetricsConfig {
    pub fn builder() -> MetricsConfigBuilder {
        MetricsConfigBuilder::default()
    }
}

#[derive(Default)]
pub struct MetricsConfigBuilder {
    input: Option<InputConfig>,
    view: Option<MetricsView>,
    format: Option<OutputFormat>,
    top: Option<usize>,
}

impl MetricsConfigBuilder {
    pub fn with_input(mut self, input: InputConfig) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_view(mut self, view: MetricsView) -> Self {
        self.view = Some(view);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_top(mut self, top: usize) -> Self {
        self.top = Some(top);
        self
    }
}

impl ConfigBuilder for MetricsConfigBuilder {
    type Config = MetricsConfig;

    fn build(self) -> Result<Self::Config, TangleError> {
        Ok(MetricsConfig {
            input: self.input.ok_or_else(|| missing("input"))?,
            view: self.view.ok_or_else(|| missing("view"))?,
            format: self.format.ok_or_else(|| missing("format"))?,
            top: self.top,
        })
    }
}
