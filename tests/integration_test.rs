//! Integration tests for tangle using the library interface

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use petgraph::Direction;
use pretty_assertions::assert_eq;
use tangle::analyzer::{DependencyAnalyzer, PathLimits, UnusedPolicy};
use tangle::core::{Location, RawEdgeRecord, RelationKind};
use tangle::error::TangleError;
use tangle::graph::{GraphExport, GraphModel};
use tangle::loader::EdgeLoader;
use tangle::store::InMemoryStore;
use tempfile::TempDir;

/// Build a model from (dependent, dependency) pairs, one line per edge
fn model_from(edges: &[(&str, &str)]) -> GraphModel {
    let mut model = GraphModel::new();
    for (line, (from, to)) in edges.iter().enumerate() {
        model
            .add_edge(
                from,
                to,
                Location::new("test_vars.py", line as u32 + 1),
                RelationKind::Simple,
            )
            .unwrap();
    }
    model
}

fn set<'a>(names: impl IntoIterator<Item = &'a str>) -> BTreeSet<String> {
    names.into_iter().map(str::to_string).collect()
}

/// A graph with a cycle, a self-loop, a diamond, a tail and an isolated node
fn mixed_model() -> GraphModel {
    let mut model = model_from(&[
        ("x", "y"),
        ("y", "z"),
        ("z", "x"),
        ("result", "x"),
        ("temp", "y"),
        ("acc", "acc"),
        ("acc", "seed"),
        ("total", "price"),
        ("total", "tax"),
        ("tax", "price"),
        ("price", "base"),
    ]);
    model.add_variable("debug", None).unwrap();
    model
}

#[test]
fn test_three_variable_cycle() {
    let model = model_from(&[("x", "y"), ("y", "z"), ("z", "x")]);
    let analyzer = DependencyAnalyzer::new(&model);

    let cycles = analyzer.detect_cycles().unwrap();
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].variables(), ["x", "y", "z"]);

    let deps = analyzer.find_dependencies("x").unwrap();
    assert_eq!(set(deps.names()), set(["x", "y", "z"]));

    let impact = analyzer.find_impact("x").unwrap();
    assert_eq!(set(impact.names()), set(["x", "y", "z"]));
}

#[test]
fn test_acyclic_chain() {
    let model = model_from(&[("c", "b"), ("b", "a")]);
    let analyzer = DependencyAnalyzer::new(&model);

    assert_eq!(
        set(analyzer.find_dependencies("c").unwrap().names()),
        set(["b", "a"])
    );
    assert_eq!(
        set(analyzer.find_impact("a").unwrap().names()),
        set(["b", "c"])
    );

    let metrics = analyzer.get_metrics().unwrap();
    assert_eq!(metrics.root_variables, vec!["a"]);
    assert_eq!(metrics.leaf_variables, vec!["c"]);

    let critical = analyzer.get_critical_path().unwrap();
    assert_eq!(critical.variables(), vec!["c", "b", "a"]);
    assert_eq!(critical.length(), 2);
}

#[test]
fn test_empty_graph_has_empty_results() {
    let model = GraphModel::new();
    let analyzer = DependencyAnalyzer::new(&model);

    assert!(analyzer.detect_cycles().unwrap().is_empty());
    let metrics = analyzer.get_metrics().unwrap();
    assert_eq!(metrics.total_variables, 0);
    assert_eq!(metrics.total_edges, 0);
    assert!(analyzer.get_critical_path().unwrap().is_empty());
    assert!(analyzer
        .find_unused_variables(&UnusedPolicy::new())
        .is_empty());
    assert!(analyzer.export_graph().edges.is_empty());
}

#[test]
fn test_disjoint_chains_have_no_paths() {
    let model = model_from(&[("a1", "a2"), ("a2", "a3"), ("b1", "b2"), ("b2", "b3")]);
    let analyzer = DependencyAnalyzer::new(&model);

    assert_eq!(analyzer.find_paths("a1", "b3").unwrap().count(), 0);
    assert_eq!(analyzer.find_paths("a1", "a3").unwrap().count(), 1);
}

#[test]
fn test_self_loop() {
    let model = model_from(&[("a", "a")]);
    let analyzer = DependencyAnalyzer::new(&model);

    let cycles = analyzer.detect_cycles().unwrap();
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].variables(), ["a"]);
    assert!(cycles[0].is_self_loop());

    let deps = analyzer.find_dependencies("a").unwrap();
    assert!(deps.contains("a"));
    assert!(deps.includes_self());
}

#[test]
fn test_unknown_variable_is_an_error() {
    let model = model_from(&[("a", "b")]);
    let analyzer = DependencyAnalyzer::new(&model);

    assert!(matches!(
        analyzer.find_dependencies("totl"),
        Err(TangleError::UnknownVariable { name }) if name == "totl"
    ));
    assert!(matches!(
        analyzer.find_impact("nope"),
        Err(TangleError::UnknownVariable { .. })
    ));
    assert!(analyzer.find_paths("a", "missing").is_err());
}

#[test]
fn test_cycles_match_strongly_connected_components() {
    let model = mixed_model();
    let cycles = DependencyAnalyzer::new(&model).detect_cycles().unwrap();

    let mut found: Vec<Vec<String>> = cycles.iter().map(|c| c.variables().to_vec()).collect();
    found.sort();

    assert_eq!(
        found,
        vec![
            vec!["acc".to_string()],
            vec!["x".to_string(), "y".to_string(), "z".to_string()],
        ]
    );
}

#[test]
fn test_reachability_duality() {
    let model = mixed_model();
    let analyzer = DependencyAnalyzer::new(&model);
    let names: Vec<String> = model
        .variable_names()
        .into_iter()
        .map(str::to_string)
        .collect();

    for u in &names {
        let impact = analyzer.find_impact(u).unwrap();
        for v in &names {
            let deps_of_v = analyzer.find_dependencies(v).unwrap();
            assert_eq!(
                impact.contains(v),
                deps_of_v.contains(u),
                "duality broken for u={u}, v={v}"
            );
        }
    }
}

#[test]
fn test_dependency_closure_is_closed() {
    let model = mixed_model();
    let analyzer = DependencyAnalyzer::new(&model);
    let cyclic: BTreeSet<String> = analyzer
        .detect_cycles()
        .unwrap()
        .iter()
        .flat_map(|c| c.variables().to_vec())
        .collect();

    for name in model.variable_names() {
        let deps = analyzer.find_dependencies(name).unwrap();

        for member in deps.names().chain([name]) {
            for direct in model.neighbors(member, Direction::Outgoing).unwrap() {
                assert!(
                    deps.contains(direct),
                    "{direct} is a dependency of {member} but missing from deps({name})"
                );
            }
        }

        assert_eq!(deps.includes_self(), cyclic.contains(name), "self membership of {name}");
    }
}

#[test]
fn test_paths_are_simple_and_contiguous() {
    let model = mixed_model();
    let analyzer = DependencyAnalyzer::new(&model);

    for from in model.variable_names() {
        for to in model.variable_names() {
            let paths: Vec<_> = analyzer.find_paths(from, to).unwrap().collect();
            let reachable = analyzer.find_dependencies(from).unwrap().contains(to);
            assert_eq!(!paths.is_empty(), reachable, "paths {from} -> {to}");

            for path in paths {
                let vars = path.variables();
                assert_eq!(vars.first().map(String::as_str), Some(from));
                assert_eq!(vars.last().map(String::as_str), Some(to));

                // Interior variables never repeat
                let interior: BTreeSet<&String> = vars[..vars.len() - 1].iter().collect();
                assert_eq!(interior.len(), vars.len() - 1);

                for (a, b) in path.steps() {
                    assert!(!model.edges_between(a, b).unwrap().is_empty());
                }
            }
        }
    }
}

#[test]
fn test_path_limits_bound_enumeration() {
    // Layered graph: 3 choices per layer, 3^4 = 81 paths from s to t
    let mut edges = Vec::new();
    let layers: Vec<Vec<String>> = (0..4)
        .map(|l| (0..3).map(|i| format!("l{l}_{i}")).collect())
        .collect();
    for first in &layers[0] {
        edges.push(("s".to_string(), first.clone()));
    }
    for pair in layers.windows(2) {
        for a in &pair[0] {
            for b in &pair[1] {
                edges.push((a.clone(), b.clone()));
            }
        }
    }
    for last in &layers[3] {
        edges.push((last.clone(), "t".to_string()));
    }
    let borrowed: Vec<(&str, &str)> = edges.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
    let model = model_from(&borrowed);
    let analyzer = DependencyAnalyzer::new(&model);

    assert_eq!(analyzer.find_paths("s", "t").unwrap().count(), 81);
    assert_eq!(
        analyzer
            .find_paths_with("s", "t", PathLimits::unbounded().with_max_paths(5))
            .unwrap()
            .count(),
        5
    );
    assert_eq!(
        analyzer
            .find_paths_with("s", "t", PathLimits::unbounded().with_max_depth(4))
            .unwrap()
            .count(),
        0
    );
    assert_eq!(analyzer.find_paths("s", "t").unwrap().take(3).count(), 3);
}

#[test]
fn test_roots_and_leaves_intersect_at_isolated() {
    let model = mixed_model();
    let metrics = DependencyAnalyzer::new(&model).get_metrics().unwrap();

    let roots: BTreeSet<&String> = metrics.root_variables.iter().collect();
    let leaves: BTreeSet<&String> = metrics.leaf_variables.iter().collect();
    let both: Vec<&String> = roots.intersection(&leaves).copied().collect();

    assert_eq!(both, metrics.isolated_variables.iter().collect::<Vec<_>>());
    assert_eq!(metrics.isolated_variables, vec!["debug"]);
}

#[test]
fn test_metrics_rankings() {
    let model = mixed_model();
    let metrics = DependencyAnalyzer::new(&model).get_metrics().unwrap();

    assert_eq!(metrics.total_variables, 12);
    assert_eq!(metrics.total_edges, 11);
    assert_eq!(metrics.circular_dependencies, 2);

    let critical = metrics.most_critical().unwrap();
    assert_eq!(critical.name, "price");
    assert_eq!(critical.count, 2);
}

#[test]
fn test_unused_respects_designated_outputs() {
    let model = mixed_model();
    let analyzer = DependencyAnalyzer::new(&model);

    let names = |policy: &UnusedPolicy| -> Vec<String> {
        analyzer
            .find_unused_variables(policy)
            .into_iter()
            .map(|c| c.name)
            .collect()
    };

    assert_eq!(
        names(&UnusedPolicy::new()),
        vec!["debug", "result", "temp", "total"]
    );
    assert_eq!(
        names(&UnusedPolicy::new().with_outputs(["result", "total"])),
        vec!["debug", "temp"]
    );
}

#[test]
fn test_export_round_trip() {
    let model = mixed_model();
    let export = DependencyAnalyzer::new(&model).export_graph();
    let json = export.to_json().unwrap();

    let parsed: GraphExport = serde_json::from_str(&json).unwrap();
    let rebuilt = GraphModel::from_export(&parsed).unwrap();

    assert_eq!(GraphExport::from_model(&rebuilt), export);
    assert!(rebuilt.contains("debug"));
    assert_eq!(rebuilt.edge_count(), model.edge_count());
}

#[test]
fn test_export_node_attributes() {
    let model = model_from(&[("c", "b"), ("b", "a")]);
    let export = DependencyAnalyzer::new(&model).export_graph();
    let value: serde_json::Value = serde_json::to_value(&export).unwrap();

    let ids: Vec<&str> = value["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["a", "b", "c"]);

    let a = &value["nodes"][0];
    assert_eq!(a["inDegree"], 1);
    assert_eq!(a["outDegree"], 0);
    assert_eq!(a["isRoot"], true);
    assert_eq!(a["isLeaf"], false);

    let first_edge = &value["edges"][0];
    assert_eq!(first_edge["source"], "c");
    assert_eq!(first_edge["target"], "b");
    assert_eq!(first_edge["line"], 1);
}

#[test]
fn test_insertion_order_does_not_change_results() {
    let edges = [
        ("x", "y"),
        ("y", "z"),
        ("z", "x"),
        ("total", "price"),
        ("total", "tax"),
        ("tax", "price"),
        ("acc", "acc"),
    ];
    let mut reversed = edges;
    reversed.reverse();

    let forward = model_from(&edges);
    let backward = model_from(&reversed);
    let fa = DependencyAnalyzer::new(&forward);
    let ba = DependencyAnalyzer::new(&backward);

    let sorted_cycles = |a: &DependencyAnalyzer| {
        let mut cycles: Vec<Vec<String>> = a
            .detect_cycles()
            .unwrap()
            .iter()
            .map(|c| c.variables().to_vec())
            .collect();
        cycles.sort();
        cycles
    };
    assert_eq!(sorted_cycles(&fa), sorted_cycles(&ba));
    assert_eq!(fa.get_metrics().unwrap(), ba.get_metrics().unwrap());
    assert_eq!(
        fa.get_critical_path().unwrap().length(),
        ba.get_critical_path().unwrap().length()
    );

    for name in forward.variable_names() {
        assert_eq!(
            fa.find_dependencies(name).unwrap(),
            ba.find_dependencies(name).unwrap()
        );
        let mut fp: Vec<_> = fa.find_paths(name, "price").unwrap().collect();
        let mut bp: Vec<_> = ba.find_paths(name, "price").unwrap().collect();
        fp.sort();
        bp.sort();
        assert_eq!(fp, bp);
    }
}

#[test]
fn test_malformed_records_are_rejected_individually() {
    let mut model = GraphModel::new();
    let records = vec![
        RawEdgeRecord::new("a", "b", "m.py", 1, RelationKind::Simple),
        RawEdgeRecord {
            dependency: None,
            ..RawEdgeRecord::new("a", "c", "m.py", 2, RelationKind::Simple)
        },
        RawEdgeRecord::new("b", "c", "m.py", 0, RelationKind::Simple),
        RawEdgeRecord {
            kind: Some("walrus".to_string()),
            ..RawEdgeRecord::new("c", "d", "m.py", 4, RelationKind::Simple)
        },
        RawEdgeRecord::new("b", "c", "m.py", 5, RelationKind::Unpack),
    ];

    let summary = model.ingest_all(records);

    assert_eq!(summary.accepted, 2);
    assert_eq!(summary.rejected.len(), 3);
    assert!(!model.contains("d"));
    assert_eq!(model.edge_count(), 2);
}

#[test]
fn test_store_round_trip() {
    let model = mixed_model();
    let mut store = InMemoryStore::new();
    model.persist(&mut store).unwrap();

    let restored = GraphModel::from_store(&store).unwrap();
    assert_eq!(
        GraphExport::from_model(&restored),
        GraphExport::from_model(&model)
    );
}

#[test]
fn test_loader_reads_all_layouts() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("nested")).unwrap();
    fs::create_dir_all(root.join("target")).unwrap();

    fs::write(
        root.join("array.json"),
        r#"[
            {"dependent": "total", "dependency": "price", "file": "cart.py", "line": 3, "kind": "simple"},
            {"dependent": "total", "dependency": "qty", "file": "cart.py", "line": 3, "kind": "simple"}
        ]"#,
    )
    .unwrap();
    fs::write(
        root.join("nested/lines.jsonl"),
        "{\"dependent\": \"price\", \"dependency\": \"base\", \"file\": \"cart.py\", \"line\": 1, \"kind\": \"simple\"}\n\n{\"dependent\": \"\", \"dependency\": \"x\", \"file\": \"cart.py\", \"line\": 2, \"kind\": \"simple\"}\n",
    )
    .unwrap();

    let export = GraphExport::from_model(&{
        let mut m = model_from(&[("acc", "acc")]);
        m.add_variable("unused_flag", None).unwrap();
        m
    });
    fs::write(root.join("export.json"), export.to_json().unwrap()).unwrap();

    // Skipped directory and non-matching file
    fs::write(
        root.join("target/ignored.json"),
        r#"[{"dependent": "ghost", "dependency": "x", "file": "g.py", "line": 1, "kind": "simple"}]"#,
    )
    .unwrap();
    fs::write(root.join("notes.txt"), "not edges").unwrap();

    let mut model = GraphModel::new();
    let summary = EdgeLoader::new()
        .load(&[root.to_path_buf()], &mut model, None)
        .unwrap();

    assert_eq!(summary.files, 3);
    assert_eq!(summary.accepted, 4);
    assert_eq!(summary.rejected.len(), 1);
    assert!(model.contains("unused_flag"));
    assert!(model.contains("base"));
    assert!(!model.contains("ghost"));
}

#[test]
fn test_loader_rejects_unparseable_file() {
    let temp_dir = TempDir::new().unwrap();
    let path: PathBuf = temp_dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    let mut model = GraphModel::new();
    let result = EdgeLoader::new().load(&[path], &mut model, None);

    assert!(matches!(result, Err(TangleError::EdgeFileParse { .. })));
    assert!(model.is_empty());
}
