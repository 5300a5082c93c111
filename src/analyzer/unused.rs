//! Unused-variable heuristic
//!
//! A variable nothing depends on is a candidate for dead code. Final outputs
//! of a program look exactly the same, so callers name them in an
//! [`UnusedPolicy`]; everything else with in-degree zero is reported.

use std::collections::BTreeSet;

use petgraph::Direction;
use serde::Serialize;
use tracing::warn;

use crate::core::Location;
use crate::graph::GraphModel;

/// Caller-supplied exclusions for [`find_unused`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnusedPolicy {
    pub designated_outputs: BTreeSet<String>,
}

impl UnusedPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outputs<I, S>(mut self, outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.designated_outputs
            .extend(outputs.into_iter().map(Into::into));
        self
    }

    pub fn is_output(&self, name: &str) -> bool {
        self.designated_outputs.contains(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnusedCandidate {
    pub name: String,
    /// Distinct variables the candidate itself depends on
    pub out_degree: usize,
    pub defined_at: Option<Location>,
}

/// Variables with no dependents, minus designated outputs, sorted by name
pub fn find_unused(model: &GraphModel, policy: &UnusedPolicy) -> Vec<UnusedCandidate> {
    for output in &policy.designated_outputs {
        if !model.contains(output) {
            warn!(output = %output, "designated output is not in the graph, ignoring");
        }
    }

    let mut candidates: Vec<UnusedCandidate> = model
        .graph()
        .node_indices()
        .filter(|&idx| model.collapsed(idx, Direction::Incoming).is_empty())
        .filter(|&idx| !policy.is_output(model.name_of(idx)))
        .map(|idx| {
            let node = &model.graph()[idx];
            UnusedCandidate {
                name: node.name.clone(),
                out_degree: model.collapsed(idx, Direction::Outgoing).len(),
                defined_at: node.defined_at.clone(),
            }
        })
        .collect();

    candidates.sort_by(|a, b| a.name.cmp(&b.name));
    candidates
}
