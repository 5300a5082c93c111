//! Transitive dependency and impact closures

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;

use petgraph::Direction;
use petgraph::graph::NodeIndex;
use tracing::debug;

use crate::error::TangleError;
use crate::graph::GraphModel;

/// Which way a closure follows the edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalDirection {
    /// Follow edges to what a variable needs
    Dependencies,
    /// Follow edges backwards to what a change would affect
    Impact,
}

impl TraversalDirection {
    fn as_petgraph(self) -> Direction {
        match self {
            TraversalDirection::Dependencies => Direction::Outgoing,
            TraversalDirection::Impact => Direction::Incoming,
        }
    }
}

impl fmt::Display for TraversalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraversalDirection::Dependencies => write!(f, "dependencies"),
            TraversalDirection::Impact => write!(f, "impact"),
        }
    }
}

/// Every variable reachable from a start variable, with its BFS depth
///
/// The start variable itself only appears when a cycle leads back to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reachability {
    variable: String,
    direction: TraversalDirection,
    depths: BTreeMap<String, usize>,
}

impl Reachability {
    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn direction(&self) -> TraversalDirection {
        self.direction
    }

    /// Shortest distance from the start variable, if reached
    pub fn depth_of(&self, name: &str) -> Option<usize> {
        self.depths.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.depths.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    /// Whether the start variable reaches itself through a cycle
    pub fn includes_self(&self) -> bool {
        self.depths.contains_key(&self.variable)
    }

    /// Reached names in alphabetical order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.depths.keys().map(String::as_str)
    }

    /// Variables one edge away, sorted by name
    pub fn direct(&self) -> Vec<&str> {
        self.at_depth(|depth| depth == 1)
    }

    /// Variables more than one edge away, sorted by name
    pub fn transitive(&self) -> Vec<&str> {
        self.at_depth(|depth| depth > 1)
    }

    /// Every reached variable ordered by depth, then name
    pub fn all(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self
            .depths
            .iter()
            .map(|(name, depth)| (name.as_str(), *depth))
            .collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    fn at_depth(&self, keep: impl Fn(usize) -> bool) -> Vec<&str> {
        self.depths
            .iter()
            .filter(|(_, depth)| keep(**depth))
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Breadth-first closure of `name` in the given direction
pub fn reach(
    model: &GraphModel,
    name: &str,
    direction: TraversalDirection,
) -> Result<Reachability, TangleError> {
    let start = model.index_of(name)?;
    let edge_direction = direction.as_petgraph();

    let mut depths: HashMap<NodeIndex, usize> = HashMap::new();
    let mut queue = VecDeque::from([(start, 0usize)]);

    while let Some((current, depth)) = queue.pop_front() {
        for next in model.collapsed(current, edge_direction) {
            if depths.contains_key(&next) {
                continue;
            }
            depths.insert(next, depth + 1);
            // the start node was expanded first; reaching it again only marks it
            if next != start {
                queue.push_back((next, depth + 1));
            }
        }
    }

    debug!(variable = name, %direction, reached = depths.len(), "computed closure");

    Ok(Reachability {
        variable: name.to_string(),
        direction,
        depths: depths
            .into_iter()
            .map(|(idx, depth)| (model.name_of(idx).to_string(), depth))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::{Location, RelationKind};

    fn model_from(edges: &[(&str, &str)]) -> GraphModel {
        let mut model = GraphModel::new();
        for (line, (from, to)) in edges.iter().enumerate() {
            model
                .add_edge(
                    from,
                    to,
                    Location::new("test.py", line as u32 + 1),
                    RelationKind::Simple,
                )
                .unwrap();
        }
        model
    }

    #[test]
    fn test_dependencies_of_chain() {
        let model = model_from(&[("c", "b"), ("b", "a")]);
        let deps = reach(&model, "c", TraversalDirection::Dependencies).unwrap();

        assert_eq!(deps.direct(), vec!["b"]);
        assert_eq!(deps.transitive(), vec!["a"]);
        assert_eq!(deps.all(), vec![("b", 1), ("a", 2)]);
        assert!(!deps.includes_self());
    }

    #[test]
    fn test_impact_of_chain() {
        let model = model_from(&[("c", "b"), ("b", "a")]);
        let impact = reach(&model, "a", TraversalDirection::Impact).unwrap();

        assert_eq!(impact.names().collect::<Vec<_>>(), vec!["b", "c"]);
        assert_eq!(impact.depth_of("c"), Some(2));
    }

    #[test]
    fn test_cycle_includes_start() {
        let model = model_from(&[("x", "y"), ("y", "z"), ("z", "x")]);
        let deps = reach(&model, "x", TraversalDirection::Dependencies).unwrap();

        assert!(deps.includes_self());
        assert_eq!(deps.depth_of("x"), Some(3));
        assert_eq!(deps.len(), 3);
    }

    #[test]
    fn test_self_loop_includes_start() {
        let model = model_from(&[("n", "n")]);
        let deps = reach(&model, "n", TraversalDirection::Dependencies).unwrap();

        assert_eq!(deps.all(), vec![("n", 1)]);
    }

    #[test]
    fn test_shortest_depth_wins() {
        // a needs c directly and through b
        let model = model_from(&[("a", "b"), ("b", "c"), ("a", "c")]);
        let deps = reach(&model, "a", TraversalDirection::Dependencies).unwrap();

        assert_eq!(deps.direct(), vec!["b", "c"]);
        assert!(deps.transitive().is_empty());
    }

    #[test]
    fn test_unknown_variable() {
        let model = model_from(&[("a", "b")]);
        let err = reach(&model, "zz", TraversalDirection::Impact).unwrap_err();

        assert!(matches!(err, TangleError::UnknownVariable { name } if name == "zz"));
    }

    #[test]
    fn test_isolated_variable_reaches_nothing() {
        let mut model = GraphModel::new();
        model.add_variable("alone", None).unwrap();

        let deps = reach(&model, "alone", TraversalDirection::Dependencies).unwrap();
        assert!(deps.is_empty());
    }
}
