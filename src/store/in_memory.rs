//! Reference [`GraphStore`] keeping everything in process memory

use std::collections::{HashMap, HashSet};

use super::{GraphStore, StoreSnapshot};
use crate::error::TangleError;
use crate::graph::{DependencyEdge, VariableNode};

/// Ephemeral store, lost when the process exits
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    revision: u64,
    variables: Vec<VariableNode>,
    positions: HashMap<String, usize>,
    edges: Vec<DependencyEdge>,
    stored: HashSet<(DependencyEdge, usize)>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_variable(&mut self, name: &str) -> usize {
        if let Some(&position) = self.positions.get(name) {
            return position;
        }

        self.variables.push(VariableNode::new(name, None));
        let position = self.variables.len() - 1;
        self.positions.insert(name.to_string(), position);
        position
    }
}

impl GraphStore for InMemoryStore {
    fn revision(&self) -> Result<u64, TangleError> {
        Ok(self.revision)
    }

    fn upsert_variable(&mut self, variable: &VariableNode) -> Result<(), TangleError> {
        let position = self.ensure_variable(&variable.name);
        let stored = &mut self.variables[position];
        if stored.defined_at.is_none() {
            stored.defined_at = variable.defined_at.clone();
        }
        self.revision += 1;
        Ok(())
    }

    fn upsert_edge(
        &mut self,
        edge: &DependencyEdge,
        occurrence: usize,
    ) -> Result<(), TangleError> {
        self.ensure_variable(&edge.dependent);
        self.ensure_variable(&edge.dependency);

        if self.stored.insert((edge.clone(), occurrence)) {
            self.edges.push(edge.clone());
        }
        self.revision += 1;
        Ok(())
    }

    fn snapshot(&self) -> Result<StoreSnapshot, TangleError> {
        Ok(StoreSnapshot {
            revision: self.revision,
            variables: self.variables.clone(),
            edges: self.edges.clone(),
        })
    }
}
