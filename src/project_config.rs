//! `tangle.toml` project settings
//!
//! ```toml
//! [input]
//! patterns = ["*.edges.json"]
//!
//! [unused]
//! outputs = ["result", "report"]
//!
//! [paths]
//! max_paths = 50
//! max_depth = 8
//! ```
//!
//! Every section is optional. Command line flags win over the file.

use std::path::{Path, PathBuf};

use miette::{NamedSource, Result, SourceSpan};
use serde::Deserialize;
use tracing::debug;

use crate::constants::config::FILE_NAME;
use crate::error::TangleError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    pub input: InputSection,
    pub unused: UnusedSection,
    pub paths: PathsSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputSection {
    /// File-name globs used when walking directories
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UnusedSection {
    /// Final outputs never reported as unused
    pub outputs: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsSection {
    pub max_paths: Option<usize>,
    pub max_depth: Option<usize>,
}

impl ProjectConfig {
    pub fn parse_str(content: &str, file: &str) -> Result<Self, TangleError> {
        toml::from_str(content).map_err(|e| {
            let span = e
                .span()
                .map(|span| SourceSpan::new(span.start.into(), span.end - span.start));

            TangleError::TomlParseError(Box::new(crate::error::TomlParseError {
                file: file.to_string(),
                source_code: NamedSource::new(file, content.to_string()),
                span,
                source: e,
            }))
        })
    }

    pub fn parse_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TangleError::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(Self::parse_str(&content, &path.display().to_string())?)
    }

    /// Load `explicit` if given, else `tangle.toml` from `dir` if present
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        let path: PathBuf = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = dir.join(FILE_NAME);
                if !candidate.is_file() {
                    return Ok(Self::default());
                }
                candidate
            }
        };

        debug!(path = %path.display(), "reading project configuration");
        Self::parse_file(&path)
    }
}
