//! Core type definitions
//!
//! This module contains the basic data structures exchanged with the scanner
//! collaborator, with minimal logic - focusing on data representation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TangleError;

/// Source position of an assignment that produced a dependency edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
}

impl Location {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Syntactic form of the assignment an edge came from
///
/// Carried for display only; no analysis looks at it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    /// `a = b`
    #[default]
    Simple,
    /// `a += b` (also records `a -> a`)
    Augmented,
    /// `a, b = x, y`
    Unpack,
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationKind::Simple => write!(f, "simple"),
            RelationKind::Augmented => write!(f, "augmented"),
            RelationKind::Unpack => write!(f, "unpack"),
        }
    }
}

impl FromStr for RelationKind {
    type Err = TangleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" | "assign" => Ok(RelationKind::Simple),
            "augmented" | "augassign" => Ok(RelationKind::Augmented),
            "unpack" | "tuple" => Ok(RelationKind::Unpack),
            other => Err(TangleError::MalformedEdge {
                field: "kind",
                reason: format!("unknown relation kind '{other}'"),
            }),
        }
    }
}

/// An edge record exactly as the scanner emitted it
///
/// Every field is optional here so that a bad record can be rejected with a
/// precise reason instead of failing the whole batch at deserialization.
/// Exported graph edges (`source` / `target`) read as the same record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEdgeRecord {
    #[serde(default, alias = "source", skip_serializing_if = "Option::is_none")]
    pub dependent: Option<String>,
    #[serde(default, alias = "target", skip_serializing_if = "Option::is_none")]
    pub dependency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl RawEdgeRecord {
    pub fn new(
        dependent: &str,
        dependency: &str,
        file: &str,
        line: i64,
        kind: RelationKind,
    ) -> Self {
        Self {
            dependent: Some(dependent.to_string()),
            dependency: Some(dependency.to_string()),
            file: Some(file.to_string()),
            line: Some(line),
            kind: Some(kind.to_string()),
        }
    }
}
