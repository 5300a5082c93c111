//! Deps and impact command configuration

use crate::analyzer::TraversalDirection;
use crate::cli::OutputFormat;
use crate::common::{ConfigBuilder, missing};
use crate::config::InputConfig;
use crate::error::TangleError;

/// Configuration for the deps and impact commands
///
/// Both walk the graph from one variable; only the direction differs.
#[derive(Debug, Clone)]
pub struct ReachConfig {
    pub input: InputConfig,
    pub variable: String,
    pub direction: TraversalDirection,
    pub format: OutputFormat,
}

impl ReachConfig {
    pub fn builder() -> ReachConfigBuilder {
        ReachConfigBuilder::default()
    }
}

#[derive(Default)]
pub struct ReachConfigBuilder {
    input: Option<InputConfig>,
    variable: Option<String>,
    direction: Option<TraversalDirection>,
    format: Option<OutputFormat>,
}

impl ReachConfigBuilder {
    pub fn with_input(mut self, input: InputConfig) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_variable(mut self, variable: String) -> Self {
        self.variable = Some(variable);
        self
    }

    pub fn with_direction(mut self, direction: TraversalDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }
}

impl ConfigBuilder for ReachConfigBuilder {
    type Config = ReachConfig;

    fn build(self) -> Result<Self::Config, TangleError> {
        let variable = self.variable.ok_or_else(|| missing("variable"))?;
        if variable.trim().is_empty() {
            return Err(TangleError::ConfigurationError {
                message: "Variable name must not be empty".to_string(),
            });
        }

        Ok(ReachConfig {
            input: self.input.ok_or_else(|| missing("input"))?,
            variable,
            direction: self.direction.ok_or_else(|| missing("direction"))?,
            format: self.format.ok_or_else(|| missing("format"))?,
        })
    }
}
