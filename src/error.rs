use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid TOML syntax in '{file}'")]
#[diagnostic(
    code(tangle::toml_parse_error),
    help("Check the TOML syntax near the highlighted position")
)]
pub struct TomlParseError {
    pub file: String,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("syntax error here")]
    pub span: Option<SourceSpan>,
    #[source]
    pub source: toml::de::Error,
}

#[derive(Error, Debug, Diagnostic)]
pub enum TangleError {
    #[error("Unknown variable '{name}'")]
    #[diagnostic(
        code(tangle::unknown_variable),
        help("Variable names are case-sensitive; run `tangle metrics` to list what was loaded")
    )]
    UnknownVariable { name: String },

    #[error("Malformed edge record: {reason}")]
    #[diagnostic(
        code(tangle::malformed_edge),
        help(
            "Every edge record needs non-empty `dependent`, `dependency` and `file` fields, a \
             positive `line` and a `kind` of simple, augmented or unpack"
        )
    )]
    MalformedEdge { field: &'static str, reason: String },

    #[error(
        "Graph store changed while reading (read revision {read_revision}, now {current_revision})"
    )]
    #[diagnostic(
        code(tangle::snapshot_inconsistent),
        help("Retry once writers have finished, or use a store with snapshot-isolated reads")
    )]
    SnapshotInconsistent {
        read_revision: u64,
        current_revision: u64,
    },

    #[error("Failed to read file '{path}'")]
    #[diagnostic(
        code(tangle::io_error),
        help("Check if the file exists and you have read permissions")
    )]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse edge file '{path}'")]
    #[diagnostic(
        code(tangle::edge_file_parse_error),
        help("Edge files must be a JSON array of edge records, JSON lines, or an exported graph")
    )]
    EdgeFileParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    TomlParseError(Box<TomlParseError>),

    #[error("JSON serialization error")]
    #[diagnostic(
        code(tangle::json_error),
        help("This is likely an internal error - please report it")
    )]
    Json(#[from] serde_json::Error),

    #[error("String formatting error")]
    #[diagnostic(
        code(tangle::fmt_error),
        help("This is likely an internal error - please report it")
    )]
    Fmt(#[from] std::fmt::Error),

    #[error("IO error")]
    #[diagnostic(
        code(tangle::io_error),
        help("Check file permissions and disk space")
    )]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(tangle::config_error),
        help("Check your command arguments and configuration")
    )]
    ConfigurationError { message: String },

    #[error("Graph error: {message}")]
    #[diagnostic(
        code(tangle::graph_error),
        help("This may be an internal error with graph processing")
    )]
    GraphError { message: String },
}

impl TangleError {
    pub(crate) fn unknown_variable(name: &str) -> Self {
        Self::UnknownVariable {
            name: name.to_string(),
        }
    }

    pub(crate) fn missing_field(field: &'static str) -> Self {
        Self::MalformedEdge {
            field,
            reason: format!("missing required field `{field}`"),
        }
    }
}
