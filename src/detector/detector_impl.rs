use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use petgraph::Direction;
use petgraph::algo::tarjan_scc;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use tracing::debug;

use crate::core::{Location, RelationKind};
use crate::error::TangleError;
use crate::graph::GraphModel;

/// Detector for circular dependencies between variables
///
/// Uses Tarjan's Strongly Connected Components algorithm to find every
/// group of mutually dependent variables in a single O(V + E) pass.
pub struct CycleDetector {
    cycles: Vec<DependencyCycle>,
}

/// A group of variables that all (transitively) depend on each other
#[derive(Debug, Clone)]
pub struct DependencyCycle {
    variables: Vec<String>,
    path: Vec<String>,
    edges: Vec<CycleEdge>,
    edges_by_direction: HashMap<(String, String), Vec<CycleEdge>>,
}

impl DependencyCycle {
    pub fn builder() -> DependencyCycleBuilder {
        DependencyCycleBuilder::new()
    }

    /// Members of the cycle, sorted by name
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// One concrete rotation of the cycle
    ///
    /// Starts at the smallest member and follows a shortest route back to
    /// it. The closing repeat of the first member is not included.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Every edge occurrence whose endpoints both lie in the cycle
    pub fn edges(&self) -> &[CycleEdge] {
        &self.edges
    }

    pub fn edges_by_direction(&self) -> &HashMap<(String, String), Vec<CycleEdge>> {
        &self.edges_by_direction
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.binary_search_by(|v| v.as_str().cmp(name)).is_ok()
    }

    pub fn is_self_loop(&self) -> bool {
        self.variables.len() == 1
    }
}

pub struct DependencyCycleBuilder {
    variables: BTreeSet<String>,
    path: Vec<String>,
    edges: Vec<CycleEdge>,
    edges_by_direction: HashMap<(String, String), Vec<CycleEdge>>,
}

impl Default for DependencyCycleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyCycleBuilder {
    pub fn new() -> Self {
        Self {
            variables: BTreeSet::new(),
            path: Vec::new(),
            edges: Vec::new(),
            edges_by_direction: HashMap::new(),
        }
    }

    pub fn with_variables(mut self, names: Vec<String>) -> Self {
        self.variables = names.into_iter().collect();
        self
    }

    pub fn with_path(mut self, path: Vec<String>) -> Self {
        self.variables.extend(path.iter().cloned());
        self.path = path;
        self
    }

    fn add_edge(&mut self, edge: CycleEdge) {
        self.variables.insert(edge.dependent.clone());
        self.variables.insert(edge.dependency.clone());

        let direction = (edge.dependent.clone(), edge.dependency.clone());
        self.edges_by_direction
            .entry(direction)
            .or_default()
            .push(edge.clone());

        self.edges.push(edge);
    }

    pub fn build(self) -> DependencyCycle {
        DependencyCycle {
            variables: self.variables.into_iter().collect(),
            path: self.path,
            edges: self.edges,
            edges_by_direction: self.edges_by_direction,
        }
    }
}

/// One recorded occurrence of an edge inside a cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleEdge {
    pub dependent: String,
    pub dependency: String,
    pub location: Location,
    pub kind: RelationKind,
}

impl Default for CycleDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleDetector {
    /// Create a new cycle detector
    pub fn new() -> Self {
        Self { cycles: Vec::new() }
    }

    /// Detect all cycles in the dependency graph
    ///
    /// Components of two or more variables are reported, as is any single
    /// variable that depends on itself. Cycles are appended in the order
    /// Tarjan's algorithm completes their components, which carries no
    /// meaning of its own.
    pub fn detect_cycles(&mut self, model: &GraphModel) -> Result<(), TangleError> {
        let sccs = tarjan_scc(model.graph());

        for scc in sccs {
            let is_cycle = match scc.as_slice() {
                [single] => model.has_self_loop(*single),
                _ => true,
            };

            if is_cycle {
                let cycle = Self::build_cycle(model, &scc)?;
                debug!(size = cycle.len(), path = ?cycle.path(), "found dependency cycle");
                self.cycles.push(cycle);
            }
        }

        Ok(())
    }

    fn build_cycle(model: &GraphModel, scc: &[NodeIndex]) -> Result<DependencyCycle, TangleError> {
        let graph = model.graph();
        let members: HashSet<NodeIndex> = scc.iter().copied().collect();

        let path = shortest_rotation(model, &members)?;
        let mut builder = DependencyCycle::builder()
            .with_variables(scc.iter().map(|&idx| model.name_of(idx).to_string()).collect())
            .with_path(path);

        let mut edges: Vec<_> = scc
            .iter()
            .flat_map(|&from| graph.edges(from))
            .filter(|edge| members.contains(&edge.target()))
            .collect();
        edges.sort_by_key(|edge| edge.id());

        for edge in edges {
            let weight = edge.weight();
            builder.add_edge(CycleEdge {
                dependent: weight.dependent.clone(),
                dependency: weight.dependency.clone(),
                location: weight.location.clone(),
                kind: weight.kind,
            });
        }

        Ok(builder.build())
    }

    /// Get all detected cycles
    pub fn cycles(&self) -> &[DependencyCycle] {
        &self.cycles
    }

    /// Consume the detector, keeping its cycles
    pub fn into_cycles(self) -> Vec<DependencyCycle> {
        self.cycles
    }

    /// Check if any cycles were detected
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    /// Get the number of detected cycles
    pub fn cycle_count(&self) -> usize {
        self.cycles.len()
    }
}

/// Breadth-first search for the shortest way from the smallest member of a
/// component back to itself, staying inside the component
///
/// A self-loop only closes the cycle when the component has one member.
pub(crate) fn shortest_rotation(
    model: &GraphModel,
    members: &HashSet<NodeIndex>,
) -> Result<Vec<String>, TangleError> {
    let start = members
        .iter()
        .copied()
        .min_by(|a, b| model.name_of(*a).cmp(model.name_of(*b)))
        .ok_or_else(|| TangleError::GraphError {
            message: "cannot trace a cycle through an empty component".to_string(),
        })?;

    if members.len() == 1 {
        return Ok(vec![model.name_of(start).to_string()]);
    }

    let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        for next in model.collapsed(current, Direction::Outgoing) {
            if !members.contains(&next) || next == current {
                continue;
            }

            if next == start {
                let mut path = vec![current];
                let mut step = current;
                while step != start {
                    step = *parent.get(&step).ok_or_else(|| TangleError::GraphError {
                        message: "broken parent chain while tracing cycle".to_string(),
                    })?;
                    path.push(step);
                }
                path.reverse();
                return Ok(path
                    .into_iter()
                    .map(|idx| model.name_of(idx).to_string())
                    .collect());
            }

            if let std::collections::hash_map::Entry::Vacant(entry) = parent.entry(next) {
                entry.insert(current);
                queue.push_back(next);
            }
        }
    }

    Err(TangleError::GraphError {
        message: format!(
            "no route back to '{}' inside its strongly connected component",
            model.name_of(start)
        ),
    })
}
