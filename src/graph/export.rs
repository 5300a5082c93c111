//! Stable JSON export of the dependency graph
//!
//! The document holds every variable with its computed degree attributes and
//! every edge occurrence with its source location. Re-ingesting it through
//! [`GraphModel::from_export`] reproduces the same collapsed graph, isolated
//! variables included.

use petgraph::Direction;
use serde::{Deserialize, Serialize};

use super::model::GraphModel;
use crate::core::{RawEdgeRecord, RelationKind};
use crate::error::TangleError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportNode {
    pub id: String,
    pub in_degree: usize,
    pub out_degree: usize,
    pub is_root: bool,
    pub is_leaf: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEdge {
    pub source: String,
    pub target: String,
    pub file: String,
    pub line: u32,
    #[serde(default)]
    pub kind: RelationKind,
}

impl ExportEdge {
    pub fn to_raw(&self) -> RawEdgeRecord {
        RawEdgeRecord::new(
            &self.source,
            &self.target,
            &self.file,
            i64::from(self.line),
            self.kind,
        )
    }
}

/// Serializable snapshot of a [`GraphModel`]
///
/// Nodes are sorted by id, edges keep ingestion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<ExportNode>,
    pub edges: Vec<ExportEdge>,
}

impl GraphExport {
    pub fn from_model(model: &GraphModel) -> Self {
        let graph = model.graph();

        let mut nodes: Vec<ExportNode> = graph
            .node_indices()
            .map(|idx| {
                let in_degree = model.collapsed(idx, Direction::Incoming).len();
                let out_degree = model.collapsed(idx, Direction::Outgoing).len();
                ExportNode {
                    id: model.name_of(idx).to_string(),
                    in_degree,
                    out_degree,
                    is_root: out_degree == 0,
                    is_leaf: in_degree == 0,
                }
            })
            .collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));

        let edges = model
            .edges()
            .map(|edge| ExportEdge {
                source: edge.dependent.clone(),
                target: edge.dependency.clone(),
                file: edge.location.file.clone(),
                line: edge.location.line,
                kind: edge.kind,
            })
            .collect();

        Self { nodes, edges }
    }

    pub fn to_json(&self) -> Result<String, TangleError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl GraphModel {
    /// Rebuild a model from an exported document
    ///
    /// Fails on the first edge that does not validate.
    pub fn from_export(export: &GraphExport) -> Result<Self, TangleError> {
        let mut model = GraphModel::new();

        for node in &export.nodes {
            model.add_variable(&node.id, None)?;
        }
        for edge in &export.edges {
            model.ingest(edge.to_raw())?;
        }

        Ok(model)
    }
}
