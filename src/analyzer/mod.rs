//! # Dependency Analysis Module
//!
//! This module answers questions about an ingested [`GraphModel`]: what a
//! variable needs, what a change to it would affect, how two variables are
//! connected, and how the graph is shaped overall.
//!
//! ## Key Components
//!
//! - **DependencyAnalyzer**: Read-only facade over one graph snapshot
//! - **Reachability**: Transitive closure with BFS depths, in either direction
//! - **SimplePaths**: Lazy iterator over the simple paths between two
//!   variables
//! - **GraphMetrics** / **CriticalPath**: Degree rankings, roots and leaves,
//!   and the longest chain over the condensed graph
//! - **UnusedCandidate**: Variables nothing depends on
//!
//! Every query borrows the model immutably, so any number of analyzers can
//! share one snapshot across threads.
//!
//! ## Example
//!
//! ```
//! use tangle::analyzer::DependencyAnalyzer;
//! use tangle::core::{Location, RelationKind};
//! use tangle::graph::GraphModel;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut model = GraphModel::new();
//! model.add_edge("c", "b", Location::new("chain.py", 1), RelationKind::Simple)?;
//! model.add_edge("b", "a", Location::new("chain.py", 2), RelationKind::Simple)?;
//!
//! let analyzer = DependencyAnalyzer::new(&model);
//!
//! let deps = analyzer.find_dependencies("c")?;
//! assert_eq!(deps.direct(), vec!["b"]);
//! assert_eq!(deps.transitive(), vec!["a"]);
//!
//! let impact = analyzer.find_impact("a")?;
//! assert!(impact.contains("c"));
//!
//! let critical = analyzer.get_critical_path()?;
//! assert_eq!(critical.variables(), vec!["c", "b", "a"]);
//! # Ok(())
//! # }
//! ```

mod metrics;
mod path_finder;
mod reachability;
mod unused;

pub use metrics::{CriticalPath, DegreeEntry, GraphMetrics, PathSegment, VariableDegree};
pub use path_finder::{DependencyPath, PathLimits, SimplePaths};
pub use reachability::{Reachability, TraversalDirection};
pub use unused::{UnusedCandidate, UnusedPolicy};

use crate::detector::{CycleDetector, DependencyCycle};
use crate::error::TangleError;
use crate::graph::{GraphExport, GraphModel};

/// Query surface over one immutable graph snapshot
#[derive(Debug, Clone, Copy)]
pub struct DependencyAnalyzer<'g> {
    model: &'g GraphModel,
}

impl<'g> DependencyAnalyzer<'g> {
    pub fn new(model: &'g GraphModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &'g GraphModel {
        self.model
    }

    /// Every circular dependency group, in discovery order
    pub fn detect_cycles(&self) -> Result<Vec<DependencyCycle>, TangleError> {
        let mut detector = CycleDetector::new();
        detector.detect_cycles(self.model)?;
        Ok(detector.into_cycles())
    }

    /// Everything `variable` transitively needs
    pub fn find_dependencies(&self, variable: &str) -> Result<Reachability, TangleError> {
        reachability::reach(self.model, variable, TraversalDirection::Dependencies)
    }

    /// Everything a change to `variable` would affect
    pub fn find_impact(&self, variable: &str) -> Result<Reachability, TangleError> {
        reachability::reach(self.model, variable, TraversalDirection::Impact)
    }

    /// All simple paths from `from` to `to`, without bounds
    pub fn find_paths(&self, from: &str, to: &str) -> Result<SimplePaths<'g>, TangleError> {
        self.find_paths_with(from, to, PathLimits::unbounded())
    }

    pub fn find_paths_with(
        &self,
        from: &str,
        to: &str,
        limits: PathLimits,
    ) -> Result<SimplePaths<'g>, TangleError> {
        path_finder::find_paths(self.model, from, to, limits)
    }

    pub fn get_metrics(&self) -> Result<GraphMetrics, TangleError> {
        metrics::compute_metrics(self.model)
    }

    /// Raw collapsed degrees of every variable, sorted by name
    pub fn degrees(&self) -> Vec<VariableDegree> {
        metrics::degrees(self.model)
    }

    pub fn get_critical_path(&self) -> Result<CriticalPath, TangleError> {
        metrics::critical_path(self.model)
    }

    pub fn find_unused_variables(&self, policy: &UnusedPolicy) -> Vec<UnusedCandidate> {
        unused::find_unused(self.model, policy)
    }

    pub fn export_graph(&self) -> GraphExport {
        GraphExport::from_model(self.model)
    }
}
