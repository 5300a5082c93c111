use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use tracing::{debug, trace, warn};

use super::types::{DependencyEdge, DependencyEdgeBuilder, VariableNode};
use crate::common::ConfigBuilder;
use crate::core::{Location, RawEdgeRecord, RelationKind};
use crate::error::TangleError;

/// In-memory directed multigraph of variable dependencies
///
/// Nodes are variables, edges point from the dependent to the dependency.
/// Every occurrence of a dependency is kept as its own edge so that line
/// numbers survive, while the structural queries work on the collapsed
/// adjacency of distinct ordered pairs.
#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    graph: DiGraph<VariableNode, DependencyEdge>,
    indices: HashMap<String, NodeIndex>,
}

/// A record rejected by [`GraphModel::ingest_all`]
#[derive(Debug)]
pub struct RejectedRecord {
    /// Zero-based position of the record in the ingested batch
    pub index: usize,
    pub error: TangleError,
}

/// Outcome of a bulk ingestion
#[derive(Debug, Default)]
pub struct IngestSummary {
    pub accepted: usize,
    pub rejected: Vec<RejectedRecord>,
}

impl IngestSummary {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `dependent` requiring `dependency`
    ///
    /// Missing endpoints are created. Recording the same pair again adds a
    /// second occurrence rather than replacing the first.
    pub fn add_edge(
        &mut self,
        dependent: &str,
        dependency: &str,
        location: Location,
        kind: RelationKind,
    ) -> Result<EdgeIndex, TangleError> {
        let edge = DependencyEdge::builder()
            .with_dependent(dependent)
            .with_dependency(dependency)
            .with_location(location)
            .with_kind(kind)
            .build()?;

        Ok(self.insert_edge(edge))
    }

    /// Validate a raw scanner record and append it
    ///
    /// A rejected record leaves the graph untouched.
    pub fn ingest(&mut self, record: RawEdgeRecord) -> Result<EdgeIndex, TangleError> {
        let edge = DependencyEdgeBuilder::from_raw(record)?.build()?;
        Ok(self.insert_edge(edge))
    }

    /// Ingest every record, accepting or rejecting each one on its own
    pub fn ingest_all<I>(&mut self, records: I) -> IngestSummary
    where
        I: IntoIterator<Item = RawEdgeRecord>,
    {
        let mut summary = IngestSummary::default();

        for (index, record) in records.into_iter().enumerate() {
            match self.ingest(record) {
                Ok(_) => summary.accepted += 1,
                Err(error) => {
                    warn!(index, %error, "rejected edge record");
                    summary.rejected.push(RejectedRecord { index, error });
                }
            }
        }

        debug!(
            accepted = summary.accepted,
            rejected = summary.rejected.len(),
            "ingested edge records"
        );
        summary
    }

    /// Declare a variable, which may never take part in any edge
    ///
    /// An existing definition location is never overwritten.
    pub fn add_variable(
        &mut self,
        name: &str,
        defined_at: Option<Location>,
    ) -> Result<NodeIndex, TangleError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TangleError::ConfigurationError {
                message: "variable names must not be empty".to_string(),
            });
        }

        let idx = self.ensure_node(name);
        if let Some(location) = defined_at {
            let node = &mut self.graph[idx];
            if node.defined_at.is_none() {
                node.defined_at = Some(location);
            }
        }
        Ok(idx)
    }

    fn insert_edge(&mut self, edge: DependencyEdge) -> EdgeIndex {
        let from = self.ensure_node(&edge.dependent);
        let to = self.ensure_node(&edge.dependency);

        let dependent = &mut self.graph[from];
        if dependent.defined_at.is_none() {
            dependent.defined_at = Some(edge.location.clone());
        }

        trace!(
            dependent = %edge.dependent,
            dependency = %edge.dependency,
            location = %edge.location,
            "adding edge"
        );
        self.graph.add_edge(from, to, edge)
    }

    fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.indices.get(name) {
            return idx;
        }

        let idx = self.graph.add_node(VariableNode::new(name, None));
        self.indices.insert(name.to_string(), idx);
        idx
    }

    pub fn contains(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    pub fn variable(&self, name: &str) -> Result<&VariableNode, TangleError> {
        self.index_of(name).map(|idx| &self.graph[idx])
    }

    /// All variables in the order they were first seen
    pub fn variables(&self) -> impl Iterator<Item = &VariableNode> {
        self.graph.node_weights()
    }

    /// All variable names, sorted
    pub fn variable_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.indices.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Every edge occurrence in ingestion order
    pub fn edges(&self) -> impl Iterator<Item = &DependencyEdge> {
        self.graph.edge_weights()
    }

    /// Directly related variables, collapsed and sorted by name
    ///
    /// `Outgoing` gives the variables `name` depends on, `Incoming` the ones
    /// that depend on it.
    pub fn neighbors(&self, name: &str, direction: Direction) -> Result<Vec<&str>, TangleError> {
        let idx = self.index_of(name)?;
        Ok(self
            .collapsed(idx, direction)
            .into_iter()
            .map(|n| self.graph[n].name.as_str())
            .collect())
    }

    /// Every recorded occurrence of `a` depending on `b`, in ingestion order
    pub fn edges_between(&self, a: &str, b: &str) -> Result<Vec<&DependencyEdge>, TangleError> {
        let from = self.index_of(a)?;
        let to = self.index_of(b)?;

        let mut edges: Vec<_> = self.graph.edges_connecting(from, to).collect();
        edges.sort_by_key(|edge| edge.id());
        Ok(edges.into_iter().map(|edge| edge.weight()).collect())
    }

    pub fn variable_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edge occurrences, counting repeats of the same pair
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of distinct (dependent, dependency) pairs
    pub fn dependency_pair_count(&self) -> usize {
        self.graph
            .node_indices()
            .map(|idx| self.collapsed(idx, Direction::Outgoing).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub(crate) fn graph(&self) -> &DiGraph<VariableNode, DependencyEdge> {
        &self.graph
    }

    pub(crate) fn index_of(&self, name: &str) -> Result<NodeIndex, TangleError> {
        self.indices
            .get(name)
            .copied()
            .ok_or_else(|| TangleError::unknown_variable(name))
    }

    pub(crate) fn name_of(&self, idx: NodeIndex) -> &str {
        &self.graph[idx].name
    }

    /// Distinct neighbors of `idx`, ordered by variable name
    pub(crate) fn collapsed(&self, idx: NodeIndex, direction: Direction) -> Vec<NodeIndex> {
        let mut neighbors: Vec<NodeIndex> = self.graph.neighbors_directed(idx, direction).collect();
        neighbors.sort_by(|a, b| self.graph[*a].name.cmp(&self.graph[*b].name));
        neighbors.dedup();
        neighbors
    }

    pub(crate) fn has_self_loop(&self, idx: NodeIndex) -> bool {
        self.graph.find_edge(idx, idx).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(line: u32) -> Location {
        Location::new("calc.py", line)
    }

    #[test]
    fn test_add_edge_creates_missing_nodes() {
        let mut model = GraphModel::new();
        model
            .add_edge("total", "price", loc(1), RelationKind::Simple)
            .unwrap();

        assert!(model.contains("total"));
        assert!(model.contains("price"));
        assert_eq!(model.variable_count(), 2);
        assert_eq!(model.edge_count(), 1);
    }

    #[test]
    fn test_defined_at_is_first_assignment() {
        let mut model = GraphModel::new();
        model.add_edge("b", "a", loc(4), RelationKind::Simple).unwrap();
        model.add_edge("b", "c", loc(9), RelationKind::Simple).unwrap();

        assert_eq!(model.variable("b").unwrap().defined_at(), Some(&loc(4)));
        assert_eq!(model.variable("a").unwrap().defined_at(), None);
    }

    #[test]
    fn test_multigraph_keeps_every_occurrence() {
        let mut model = GraphModel::new();
        model.add_edge("x", "y", loc(3), RelationKind::Simple).unwrap();
        model.add_edge("x", "y", loc(8), RelationKind::Augmented).unwrap();

        assert_eq!(model.edge_count(), 2);
        assert_eq!(model.dependency_pair_count(), 1);

        let lines: Vec<u32> = model
            .edges_between("x", "y")
            .unwrap()
            .iter()
            .map(|edge| edge.location.line)
            .collect();
        assert_eq!(lines, vec![3, 8]);

        assert_eq!(
            model.neighbors("x", Direction::Outgoing).unwrap(),
            vec!["y"],
            "neighbors must be collapsed"
        );
    }

    #[test]
    fn test_neighbors_sorted_by_name() {
        let mut model = GraphModel::new();
        for (dep, line) in [("zeta", 1), ("alpha", 2), ("mid", 3)] {
            model.add_edge("root", dep, loc(line), RelationKind::Simple).unwrap();
        }

        assert_eq!(
            model.neighbors("root", Direction::Outgoing).unwrap(),
            vec!["alpha", "mid", "zeta"]
        );
        assert_eq!(
            model.neighbors("alpha", Direction::Incoming).unwrap(),
            vec!["root"]
        );
    }

    #[test]
    fn test_unknown_variable_queries_fail() {
        let model = GraphModel::new();

        assert!(matches!(
            model.neighbors("ghost", Direction::Outgoing),
            Err(TangleError::UnknownVariable { .. })
        ));
        assert!(matches!(
            model.variable("ghost"),
            Err(TangleError::UnknownVariable { .. })
        ));
    }

    #[test]
    fn test_ingest_rejects_without_mutation() {
        let mut model = GraphModel::new();
        let mut record = RawEdgeRecord::new("a", "b", "m.py", 1, RelationKind::Simple);
        record.file = None;

        assert!(model.ingest(record).is_err());
        assert!(model.is_empty());
        assert_eq!(model.edge_count(), 0);
    }

    #[test]
    fn test_ingest_all_isolates_failures() {
        let mut model = GraphModel::new();
        let records = vec![
            RawEdgeRecord::new("a", "b", "m.py", 1, RelationKind::Simple),
            RawEdgeRecord::new("b", "c", "m.py", 0, RelationKind::Simple),
            RawEdgeRecord::new("c", "d", "m.py", 3, RelationKind::Unpack),
        ];

        let summary = model.ingest_all(records);

        assert_eq!(summary.accepted, 2);
        assert_eq!(summary.rejected.len(), 1);
        assert_eq!(summary.rejected[0].index, 1);
        assert!(!summary.is_clean());
        assert_eq!(model.edge_count(), 2);
        assert!(model.contains("d"));
        assert_eq!(
            model.neighbors("b", Direction::Outgoing).unwrap(),
            Vec::<&str>::new()
        );
    }

    #[test]
    fn test_add_variable_keeps_existing_location() {
        let mut model = GraphModel::new();
        model.add_edge("a", "b", loc(2), RelationKind::Simple).unwrap();
        model.add_variable("a", Some(loc(40))).unwrap();
        model.add_variable("lonely", None).unwrap();

        assert_eq!(model.variable("a").unwrap().defined_at(), Some(&loc(2)));
        assert!(model.contains("lonely"));
        assert_eq!(model.variable_names(), vec!["a", "b", "lonely"]);
    }

    #[test]
    fn test_self_loop_detection() {
        let mut model = GraphModel::new();
        model
            .add_edge("counter", "counter", loc(1), RelationKind::Augmented)
            .unwrap();
        model.add_edge("total", "counter", loc(2), RelationKind::Simple).unwrap();

        let counter = model.index_of("counter").unwrap();
        let total = model.index_of("total").unwrap();
        assert!(model.has_self_loop(counter));
        assert!(!model.has_self_loop(total));
    }

    #[test]
    fn test_model_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GraphModel>();
    }
}
