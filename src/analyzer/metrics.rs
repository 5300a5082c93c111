//! Structural metrics and the critical path

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use petgraph::Direction;
use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use tracing::debug;

use crate::detector::{CycleDetector, shortest_rotation};
use crate::error::TangleError;
use crate::graph::GraphModel;

/// Collapsed degrees of a single variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDegree {
    pub name: String,
    /// Distinct variables that depend on this one
    pub in_degree: usize,
    /// Distinct variables this one depends on
    pub out_degree: usize,
}

impl VariableDegree {
    pub fn is_root(&self) -> bool {
        self.out_degree == 0
    }

    pub fn is_leaf(&self) -> bool {
        self.in_degree == 0
    }

    pub fn is_isolated(&self) -> bool {
        self.is_root() && self.is_leaf()
    }
}

/// One row of a degree ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegreeEntry {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphMetrics {
    pub total_variables: usize,
    /// Edge occurrences, repeats of a pair included
    pub total_edges: usize,
    /// Distinct (dependent, dependency) pairs
    pub distinct_dependencies: usize,
    pub circular_dependencies: usize,
    /// Ranked by in-degree, highest first
    pub most_depended_upon: Vec<DegreeEntry>,
    /// Ranked by out-degree, highest first
    pub most_dependencies: Vec<DegreeEntry>,
    /// Variables that depend on nothing
    pub root_variables: Vec<String>,
    /// Variables nothing depends on
    pub leaf_variables: Vec<String>,
    /// Variables with no edges at all
    pub isolated_variables: Vec<String>,
}

impl GraphMetrics {
    /// The variable the most others depend on, if any
    pub fn most_critical(&self) -> Option<&DegreeEntry> {
        self.most_depended_upon.first()
    }
}

/// Degrees of every variable, sorted by name
pub fn degrees(model: &GraphModel) -> Vec<VariableDegree> {
    let mut degrees: Vec<VariableDegree> = model
        .graph()
        .node_indices()
        .map(|idx| VariableDegree {
            name: model.name_of(idx).to_string(),
            in_degree: model.collapsed(idx, Direction::Incoming).len(),
            out_degree: model.collapsed(idx, Direction::Outgoing).len(),
        })
        .collect();
    degrees.sort_by(|a, b| a.name.cmp(&b.name));
    degrees
}

fn ranking(degrees: &[VariableDegree], count: impl Fn(&VariableDegree) -> usize) -> Vec<DegreeEntry> {
    let mut entries: Vec<DegreeEntry> = degrees
        .iter()
        .filter(|d| count(d) > 0)
        .map(|d| DegreeEntry {
            name: d.name.clone(),
            count: count(d),
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    entries
}

pub fn compute_metrics(model: &GraphModel) -> Result<GraphMetrics, TangleError> {
    let degrees = degrees(model);

    let mut detector = CycleDetector::new();
    detector.detect_cycles(model)?;

    let names_where = |keep: fn(&VariableDegree) -> bool| -> Vec<String> {
        degrees
            .iter()
            .filter(|d| keep(d))
            .map(|d| d.name.clone())
            .collect()
    };

    Ok(GraphMetrics {
        total_variables: model.variable_count(),
        total_edges: model.edge_count(),
        distinct_dependencies: model.dependency_pair_count(),
        circular_dependencies: detector.cycle_count(),
        most_depended_upon: ranking(&degrees, |d| d.in_degree),
        most_dependencies: ranking(&degrees, |d| d.out_degree),
        root_variables: names_where(VariableDegree::is_root),
        leaf_variables: names_where(VariableDegree::is_leaf),
        isolated_variables: names_where(VariableDegree::is_isolated),
    })
}

/// A strongly connected component visited by the critical path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathSegment {
    /// Smallest member name
    pub representative: String,
    /// Members in cycle-rotation order, any members off that rotation
    /// following alphabetically
    pub members: Vec<String>,
}

impl PathSegment {
    pub fn is_cycle(&self) -> bool {
        self.members.len() > 1
    }
}

/// Longest chain of dependencies over the condensed graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CriticalPath {
    segments: Vec<PathSegment>,
    length: usize,
}

impl CriticalPath {
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// The chain with every component expanded into its members
    pub fn variables(&self) -> Vec<&str> {
        self.segments
            .iter()
            .flat_map(|segment| segment.members.iter().map(String::as_str))
            .collect()
    }

    /// Number of edges between components along the chain
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

struct Component {
    members: Vec<NodeIndex>,
    representative: String,
    has_edges: bool,
}

pub fn critical_path(model: &GraphModel) -> Result<CriticalPath, TangleError> {
    let graph = model.graph();
    if graph.edge_count() == 0 {
        return Ok(CriticalPath::default());
    }

    let sccs = tarjan_scc(graph);
    let mut component_of: HashMap<NodeIndex, usize> = HashMap::with_capacity(graph.node_count());
    let mut components = Vec::with_capacity(sccs.len());
    let mut condensed: DiGraph<usize, ()> = DiGraph::with_capacity(sccs.len(), 0);

    for (id, scc) in sccs.into_iter().enumerate() {
        let representative = scc
            .iter()
            .map(|&idx| model.name_of(idx))
            .min()
            .unwrap_or_default()
            .to_string();
        for &idx in &scc {
            component_of.insert(idx, id);
        }
        condensed.add_node(id);
        components.push(Component {
            members: scc,
            representative,
            has_edges: false,
        });
    }

    for edge in graph.edge_references() {
        let (from, to) = (component_of[&edge.source()], component_of[&edge.target()]);
        components[from].has_edges = true;
        components[to].has_edges = true;
        if from != to {
            condensed.update_edge(NodeIndex::new(from), NodeIndex::new(to), ());
        }
    }

    let order = toposort(&condensed, None).map_err(|cycle| TangleError::GraphError {
        message: format!(
            "condensed graph still has a cycle through component {}",
            cycle.node_id().index()
        ),
    })?;

    // longest[c] = (edges to the end of the best chain from c, next component)
    let mut longest: Vec<(usize, Option<usize>)> = vec![(0, None); components.len()];
    for node in order.iter().rev() {
        let from = node.index();
        for next in condensed.neighbors(*node) {
            let to = next.index();
            let candidate = longest[to].0 + 1;
            let better = match longest[from] {
                (best, _) if candidate > best => true,
                (best, Some(current)) if candidate == best => {
                    components[to].representative < components[current].representative
                }
                _ => false,
            };
            if better {
                longest[from] = (candidate, Some(to));
            }
        }
    }

    let start = (0..components.len())
        .filter(|&id| components[id].has_edges)
        .max_by(|&a, &b| {
            longest[a].0.cmp(&longest[b].0).then_with(|| {
                // smaller representative wins a tie
                match components[a].representative.cmp(&components[b].representative) {
                    Ordering::Less => Ordering::Greater,
                    Ordering::Greater => Ordering::Less,
                    Ordering::Equal => Ordering::Equal,
                }
            })
        });

    let mut segments = Vec::new();
    let mut cursor = start;
    while let Some(id) = cursor {
        segments.push(expand(model, &components[id])?);
        cursor = longest[id].1;
    }

    let length = start.map(|id| longest[id].0).unwrap_or_default();
    debug!(length, segments = segments.len(), "computed critical path");

    Ok(CriticalPath { segments, length })
}

fn expand(model: &GraphModel, component: &Component) -> Result<PathSegment, TangleError> {
    let member_set: HashSet<NodeIndex> = component.members.iter().copied().collect();
    let mut members = shortest_rotation(model, &member_set)?;

    let mut rest: Vec<String> = component
        .members
        .iter()
        .map(|&idx| model.name_of(idx).to_string())
        .filter(|name| !members.contains(name))
        .collect();
    rest.sort();
    members.extend(rest);

    Ok(PathSegment {
        representative: component.representative.clone(),
        members,
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
    fn test_metrics_on_chain() {
        let model = model_from(&[("c", "b"), ("b", "a")]);
        let metrics = compute_metrics(&model).unwrap();

        assert_eq!(metrics.total_variables, 3);
        assert_eq!(metrics.total_edges, 2);
        assert_eq!(metrics.root_variables, vec!["a"]);
        assert_eq!(metrics.leaf_variables, vec!["c"]);
        assert!(metrics.isolated_variables.is_empty());
        assert_eq!(metrics.circular_dependencies, 0);
    }

    #[test]
    fn test_rankings_break_ties_by_name() {
        let model = model_from(&[
            ("total", "price"),
            ("total", "tax"),
            ("tax", "price"),
            ("report", "tax"),
        ]);
        let metrics = compute_metrics(&model).unwrap();

        assert_eq!(
            metrics.most_depended_upon,
            vec![
                DegreeEntry {
                    name: "price".to_string(),
                    count: 2
                },
                DegreeEntry {
                    name: "tax".to_string(),
                    count: 2
                },
            ]
        );
        assert_eq!(metrics.most_dependencies[0].name, "total");
        assert_eq!(metrics.most_critical().map(|e| e.name.as_str()), Some("price"));
    }

    #[test]
    fn test_repeated_edges_do_not_inflate_degrees() {
        let model = model_from(&[("a", "b"), ("a", "b"), ("a", "b")]);
        let metrics = compute_metrics(&model).unwrap();

        assert_eq!(metrics.total_edges, 3);
        assert_eq!(metrics.distinct_dependencies, 1);
        assert_eq!(metrics.most_depended_upon[0].count, 1);
    }

    #[test]
    fn test_self_loop_counts_both_ways() {
        let model = model_from(&[("n", "n")]);
        let degree = &degrees(&model)[0];

        assert_eq!((degree.in_degree, degree.out_degree), (1, 1));
        assert!(!degree.is_root() && !degree.is_leaf());
    }

    #[test]
    fn test_isolated_is_root_and_leaf() {
        let mut model = model_from(&[("a", "b")]);
        model.add_variable("lonely", None).unwrap();
        let metrics = compute_metrics(&model).unwrap();

        assert_eq!(metrics.isolated_variables, vec!["lonely"]);
        assert!(metrics.root_variables.contains(&"lonely".to_string()));
        assert!(metrics.leaf_variables.contains(&"lonely".to_string()));
    }

    #[test]
    fn test_empty_graph_metrics() {
        let metrics = compute_metrics(&GraphModel::new()).unwrap();

        assert_eq!(metrics, GraphMetrics::default());
        assert!(metrics.most_critical().is_none());
    }

    #[test]
    fn test_critical_path_of_chain() {
        let model = model_from(&[("c", "b"), ("b", "a")]);
        let path = critical_path(&model).unwrap();

        assert_eq!(path.variables(), vec!["c", "b", "a"]);
        assert_eq!(path.length(), 2);
    }

    #[test]
    fn test_critical_path_prefers_longest_branch() {
        let model = model_from(&[("out", "short"), ("out", "m1"), ("m1", "m2"), ("m2", "base")]);
        let path = critical_path(&model).unwrap();

        assert_eq!(path.variables(), vec!["out", "m1", "m2", "base"]);
        assert_eq!(path.length(), 3);
    }

    #[test]
    fn test_critical_path_tie_breaks_by_name() {
        let model = model_from(&[("top", "zed"), ("top", "alpha")]);
        let path = critical_path(&model).unwrap();

        assert_eq!(path.variables(), vec!["top", "alpha"]);
    }

    #[test]
    fn test_critical_path_through_cycle() {
        let model = model_from(&[("out", "x"), ("x", "y"), ("y", "x"), ("y", "base")]);
        let path = critical_path(&model).unwrap();

        assert_eq!(path.length(), 2);
        assert_eq!(path.segments().len(), 3);
        assert!(path.segments()[1].is_cycle());
        assert_eq!(path.variables(), vec!["out", "x", "y", "base"]);
    }

    #[test]
    fn test_cycle_only_graph() {
        let model = model_from(&[("x", "y"), ("y", "z"), ("z", "x")]);
        let path = critical_path(&model).unwrap();

        assert_eq!(path.length(), 0);
        assert_eq!(path.variables(), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_no_edges_gives_empty_path() {
        let mut model = GraphModel::new();
        model.add_variable("a", None).unwrap();

        assert!(critical_path(&model).unwrap().is_empty());
    }
}
