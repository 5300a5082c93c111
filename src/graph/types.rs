//! Core graph types
//!
//! This module contains the fundamental data structures stored in the
//! dependency graph.

use serde::{Deserialize, Serialize};

use crate::common::ConfigBuilder;
use crate::core::{Location, RawEdgeRecord, RelationKind};
use crate::error::TangleError;

/// A named value in the dependency graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableNode {
    pub name: String,
    /// Where the variable was first assigned, if that was ever observed
    pub defined_at: Option<Location>,
}

impl VariableNode {
    pub fn new(name: impl Into<String>, defined_at: Option<Location>) -> Self {
        Self {
            name: name.into(),
            defined_at,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn defined_at(&self) -> Option<&Location> {
        self.defined_at.as_ref()
    }
}

/// One occurrence of "`dependent` requires the value of `dependency`"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub dependent: String,
    pub dependency: String,
    pub location: Location,
    pub kind: RelationKind,
}

impl DependencyEdge {
    pub fn builder() -> DependencyEdgeBuilder {
        DependencyEdgeBuilder::new()
    }

    pub fn dependent(&self) -> &str {
        &self.dependent
    }

    pub fn dependency(&self) -> &str {
        &self.dependency
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    pub fn is_self_loop(&self) -> bool {
        self.dependent == self.dependency
    }
}

pub struct DependencyEdgeBuilder {
    dependent: Option<String>,
    dependency: Option<String>,
    file: Option<String>,
    line: Option<i64>,
    kind: Option<RelationKind>,
}

impl Default for DependencyEdgeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyEdgeBuilder {
    pub fn new() -> Self {
        Self {
            dependent: None,
            dependency: None,
            file: None,
            line: None,
            kind: None,
        }
    }

    pub fn with_dependent(mut self, dependent: &str) -> Self {
        self.dependent = Some(dependent.to_string());
        self
    }

    pub fn with_dependency(mut self, dependency: &str) -> Self {
        self.dependency = Some(dependency.to_string());
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.file = Some(location.file);
        self.line = Some(i64::from(location.line));
        self
    }

    pub fn with_kind(mut self, kind: RelationKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Populate the builder from a scanner record, validating its `kind`
    pub fn from_raw(raw: RawEdgeRecord) -> Result<Self, TangleError> {
        let kind = raw.kind.as_deref().map(str::parse).transpose()?;

        Ok(Self {
            dependent: raw.dependent,
            dependency: raw.dependency,
            file: raw.file,
            line: raw.line,
            kind,
        })
    }
}

fn required_name(value: Option<String>, field: &'static str) -> Result<String, TangleError> {
    let value = value.ok_or_else(|| TangleError::missing_field(field))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TangleError::MalformedEdge {
            field,
            reason: format!("field `{field}` must not be empty"),
        });
    }
    Ok(trimmed.to_string())
}

impl ConfigBuilder for DependencyEdgeBuilder {
    type Config = DependencyEdge;

    fn build(self) -> Result<Self::Config, TangleError> {
        let dependent = required_name(self.dependent, "dependent")?;
        let dependency = required_name(self.dependency, "dependency")?;
        let file = required_name(self.file, "file")?;

        let line = self.line.ok_or_else(|| TangleError::missing_field("line"))?;
        let line = u32::try_from(line)
            .ok()
            .filter(|line| *line > 0)
            .ok_or_else(|| TangleError::MalformedEdge {
                field: "line",
                reason: format!("line number {line} is not a positive 32-bit integer"),
            })?;

        let kind = self.kind.ok_or_else(|| TangleError::missing_field("kind"))?;

        Ok(DependencyEdge {
            dependent,
            dependency,
            location: Location { file, line },
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(line: i64) -> RawEdgeRecord {
        RawEdgeRecord::new("total", "sub_total", "calc.py", line, RelationKind::Simple)
    }

    #[test]
    fn test_builder_accepts_complete_record() {
        let edge = DependencyEdgeBuilder::from_raw(raw(7))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(edge.dependent(), "total");
        assert_eq!(edge.dependency(), "sub_total");
        assert_eq!(edge.location(), &Location::new("calc.py", 7));
        assert_eq!(edge.kind(), RelationKind::Simple);
        assert!(!edge.is_self_loop());
    }

    #[test]
    fn test_builder_rejects_missing_dependency() {
        let mut record = raw(1);
        record.dependency = None;

        let err = DependencyEdgeBuilder::from_raw(record)
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TangleError::MalformedEdge {
                field: "dependency",
                ..
            }
        ));
    }

    #[test]
    fn test_builder_rejects_blank_names() {
        let mut record = raw(1);
        record.dependent = Some("   ".to_string());

        let err = DependencyEdgeBuilder::from_raw(record)
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TangleError::MalformedEdge {
                field: "dependent",
                ..
            }
        ));
    }

    #[test]
    fn test_builder_rejects_non_positive_line() {
        for line in [0, -4] {
            let err = DependencyEdgeBuilder::from_raw(raw(line))
                .unwrap()
                .build()
                .unwrap_err();
            assert!(matches!(
                err,
                TangleError::MalformedEdge { field: "line", .. }
            ));
        }
    }

    #[test]
    fn test_builder_rejects_missing_kind() {
        let mut record = raw(3);
        record.kind = None;

        let err = DependencyEdgeBuilder::from_raw(record)
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TangleError::MalformedEdge { field: "kind", .. }
        ));
    }

    #[test]
    fn test_augmented_self_loop() {
        let edge = DependencyEdge::builder()
            .with_dependent("counter")
            .with_dependency("counter")
            .with_location(Location::new("calc.py", 26))
            .with_kind(RelationKind::Augmented)
            .build()
            .unwrap();

        assert!(edge.is_self_loop());
    }
}
