//! Persistence contract for dependency graphs
//!
//! The analysis engine never needs a store; it works on a [`GraphModel`]
//! held in memory. A store is only a place to keep a graph between
//! sessions. Backends implement [`GraphStore`], and models move in and out
//! of them through [`GraphModel::persist`] and [`GraphModel::from_store`].
//!
//! # Consistency
//!
//! Every mutation bumps the store's revision. Loading takes one full
//! snapshot and then re-reads the revision; if a writer got in between, the
//! load fails with [`TangleError::SnapshotInconsistent`] instead of building
//! a half-updated model.
//!
//! # Example
//!
//! ```
//! use tangle::core::{Location, RelationKind};
//! use tangle::graph::GraphModel;
//! use tangle::store::{GraphStore, InMemoryStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut model = GraphModel::new();
//! model.add_edge("total", "price", Location::new("shop.py", 3), RelationKind::Simple)?;
//!
//! let mut store = InMemoryStore::new();
//! model.persist(&mut store)?;
//! assert!(store.revision()? > 0);
//!
//! let restored = GraphModel::from_store(&store)?;
//! assert_eq!(restored.edge_count(), 1);
//! # Ok(())
//! # }
//! ```

mod in_memory;

use std::collections::HashMap;

pub use in_memory::InMemoryStore;
use tracing::debug;

use crate::error::TangleError;
use crate::graph::{DependencyEdge, GraphModel, VariableNode};

/// Full contents of a store at one revision
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSnapshot {
    pub revision: u64,
    pub variables: Vec<VariableNode>,
    /// Edge occurrences in the order they were first stored
    pub edges: Vec<DependencyEdge>,
}

/// Backend able to keep a dependency graph
///
/// Implementations must be `Send + Sync`.
pub trait GraphStore: Send + Sync {
    /// Monotonic counter, bumped by every mutation
    fn revision(&self) -> Result<u64, TangleError>;

    /// Insert a variable, keeping any definition location already stored
    fn upsert_variable(&mut self, variable: &VariableNode) -> Result<(), TangleError>;

    /// Insert an edge occurrence
    ///
    /// `occurrence` numbers identical occurrences of `edge` from zero, since
    /// `x = a + a` records `x -> a` twice at one location. The store keeps one
    /// copy per `(edge, occurrence)` key, so writing the same model twice adds
    /// nothing.
    fn upsert_edge(&mut self, edge: &DependencyEdge, occurrence: usize) -> Result<(), TangleError>;

    fn snapshot(&self) -> Result<StoreSnapshot, TangleError>;
}

impl GraphModel {
    /// Build a model from a store snapshot
    pub fn from_store<S: GraphStore + ?Sized>(store: &S) -> Result<Self, TangleError> {
        let snapshot = store.snapshot()?;
        let current_revision = store.revision()?;

        if snapshot.revision != current_revision {
            return Err(TangleError::SnapshotInconsistent {
                read_revision: snapshot.revision,
                current_revision,
            });
        }

        let mut model = GraphModel::new();
        for variable in &snapshot.variables {
            model.add_variable(&variable.name, variable.defined_at.clone())?;
        }
        for edge in snapshot.edges {
            model.add_edge(&edge.dependent, &edge.dependency, edge.location, edge.kind)?;
        }

        debug!(
            revision = snapshot.revision,
            variables = model.variable_count(),
            edges = model.edge_count(),
            "loaded graph from store"
        );
        Ok(model)
    }

    /// Write every variable and edge occurrence into `store`
    pub fn persist<S: GraphStore + ?Sized>(&self, store: &mut S) -> Result<(), TangleError> {
        for variable in self.variables() {
            store.upsert_variable(variable)?;
        }

        let mut seen: HashMap<&DependencyEdge, usize> = HashMap::new();
        for edge in self.edges() {
            let occurrence = seen.entry(edge).or_default();
            store.upsert_edge(edge, *occurrence)?;
            *occurrence += 1;
        }
        Ok(())
    }
}
