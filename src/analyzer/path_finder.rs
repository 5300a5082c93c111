//! Lazy enumeration of simple dependency paths

use std::collections::HashSet;
use std::vec;

use petgraph::Direction;
use petgraph::graph::NodeIndex;

use crate::error::TangleError;
use crate::graph::GraphModel;

/// Explicit bounds on path enumeration
///
/// Both bounds are off by default, so an unbounded search enumerates every
/// simple path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathLimits {
    /// Longest path to report, counted in edges
    pub max_depth: Option<usize>,
    /// Stop after this many paths
    pub max_paths: Option<usize>,
}

impl PathLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_max_paths(mut self, max_paths: usize) -> Self {
        self.max_paths = Some(max_paths);
        self
    }
}

/// A chain of variables, each depending on the next
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DependencyPath {
    variables: Vec<String>,
}

impl DependencyPath {
    pub fn new(variables: Vec<String>) -> Self {
        Self { variables }
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Number of edges
    pub fn len(&self) -> usize {
        self.variables.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consecutive (dependent, dependency) pairs
    pub fn steps(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }
}

/// Iterator over the simple paths between two variables
///
/// Depth-first with an explicit stack of neighbor iterators. A variable is
/// on the current path at most once, so cycles cannot trap the search.
/// Nothing is computed until `next` is called, and dropping the iterator
/// abandons the search.
pub struct SimplePaths<'g> {
    model: &'g GraphModel,
    target: NodeIndex,
    limits: PathLimits,
    path: Vec<NodeIndex>,
    on_path: HashSet<NodeIndex>,
    stack: Vec<vec::IntoIter<NodeIndex>>,
    emitted: usize,
}

impl<'g> SimplePaths<'g> {
    fn new(model: &'g GraphModel, source: NodeIndex, target: NodeIndex, limits: PathLimits) -> Self {
        Self {
            model,
            target,
            limits,
            path: vec![source],
            on_path: HashSet::from([source]),
            stack: vec![model.collapsed(source, Direction::Outgoing).into_iter()],
            emitted: 0,
        }
    }

    fn too_deep(&self, edges: usize) -> bool {
        self.limits.max_depth.is_some_and(|max| edges > max)
    }

    fn emit(&mut self) -> DependencyPath {
        self.emitted += 1;
        let variables = self
            .path
            .iter()
            .chain(std::iter::once(&self.target))
            .map(|&idx| self.model.name_of(idx).to_string())
            .collect();
        DependencyPath::new(variables)
    }
}

impl Iterator for SimplePaths<'_> {
    type Item = DependencyPath;

    fn next(&mut self) -> Option<Self::Item> {
        if self.limits.max_paths.is_some_and(|max| self.emitted >= max) {
            return None;
        }

        while let Some(children) = self.stack.last_mut() {
            match children.next() {
                Some(child) if child == self.target => {
                    if !self.too_deep(self.path.len()) {
                        return Some(self.emit());
                    }
                }
                Some(child) => {
                    if self.on_path.contains(&child) || self.too_deep(self.path.len() + 1) {
                        continue;
                    }
                    self.path.push(child);
                    self.on_path.insert(child);
                    self.stack
                        .push(self.model.collapsed(child, Direction::Outgoing).into_iter());
                }
                None => {
                    self.stack.pop();
                    if let Some(done) = self.path.pop() {
                        self.on_path.remove(&done);
                    }
                }
            }
        }

        None
    }
}

/// Start enumerating simple paths from `from` to `to`
///
/// When both ends are the same variable the paths are the cycles through it.
pub fn find_paths<'g>(
    model: &'g GraphModel,
    from: &str,
    to: &str,
    limits: PathLimits,
) -> Result<SimplePaths<'g>, TangleError> {
    let source = model.index_of(from)?;
    let target = model.index_of(to)?;
    Ok(SimplePaths::new(model, source, target, limits))
}
