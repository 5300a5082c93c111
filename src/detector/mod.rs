//! # Cycle Detection Module
//!
//! This module implements detection of circular dependencies between
//! variables.
//!
//! ## Algorithm
//!
//! We use Tarjan's Strongly Connected Components (SCC) algorithm to find all
//! cycles in the dependency graph. This algorithm has O(V + E) time
//! complexity where V is the number of variables and E is the number of
//! edges. Components with two or more variables are cycles, and so is a
//! single variable with a self-loop (for example `x += 1`).
//!
//! ## Key Components
//!
//! - **CycleDetector**: Main detector that finds cycles using Tarjan's
//!   algorithm
//! - **DependencyCycle**: A detected cycle with its members, one concrete
//!   rotation and every edge occurrence inside it
//! - **CycleEdge**: A dependency edge within a cycle, with its location
//!
//! ## Example
//!
//! ```
//! use tangle::core::{Location, RelationKind};
//! use tangle::detector::CycleDetector;
//! use tangle::graph::GraphModel;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut model = GraphModel::new();
//! model.add_edge("x", "y", Location::new("calc.py", 1), RelationKind::Simple)?;
//! model.add_edge("y", "z", Location::new("calc.py", 2), RelationKind::Simple)?;
//! model.add_edge("z", "x", Location::new("calc.py", 3), RelationKind::Simple)?;
//!
//! let mut detector = CycleDetector::new();
//! detector.detect_cycles(&model)?;
//!
//! assert!(detector.has_cycles());
//! assert_eq!(detector.cycle_count(), 1);
//! assert_eq!(detector.cycles()[0].path(), &["x", "y", "z"]);
//! # Ok(())
//! # }
//! ```

mod detector_impl;

pub use detector_impl::*;
