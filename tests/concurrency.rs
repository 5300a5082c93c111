//! Analyzers sharing one graph across threads

use std::sync::Arc;

use pretty_assertions::assert_eq;
use rayon::prelude::*;
use tangle::analyzer::DependencyAnalyzer;
use tangle::core::{Location, RelationKind};
use tangle::graph::GraphModel;

fn assert_send_sync<T: Send + Sync>() {}

/// 50 chains of 20 variables, each chain closing back on itself every tenth
fn build_model() -> GraphModel {
    let mut model = GraphModel::new();
    for chain in 0..50 {
        for step in 0..20u32 {
            model
                .add_edge(
                    &format!("c{chain}_v{step}"),
                    &format!("c{chain}_v{}", step + 1),
                    Location::new(format!("chain_{chain}.py"), step + 1),
                    RelationKind::Simple,
                )
                .unwrap();
        }
        if chain % 10 == 0 {
            model
                .add_edge(
                    &format!("c{chain}_v20"),
                    &format!("c{chain}_v0"),
                    Location::new(format!("chain_{chain}.py"), 21),
                    RelationKind::Augmented,
                )
                .unwrap();
        }
    }
    model
}

#[test]
fn test_model_is_send_and_sync() {
    assert_send_sync::<GraphModel>();
    assert_send_sync::<DependencyAnalyzer<'static>>();
}

#[test]
fn test_parallel_queries_match_sequential() {
    let model = Arc::new(build_model());
    let names: Vec<String> = model
        .variable_names()
        .into_iter()
        .map(str::to_string)
        .collect();

    let sequential: Vec<(usize, usize)> = {
        let analyzer = DependencyAnalyzer::new(&model);
        names
            .iter()
            .map(|name| {
                (
                    analyzer.find_dependencies(name).unwrap().len(),
                    analyzer.find_impact(name).unwrap().len(),
                )
            })
            .collect()
    };

    let parallel: Vec<(usize, usize)> = names
        .par_iter()
        .map(|name| {
            let model = Arc::clone(&model);
            let analyzer = DependencyAnalyzer::new(&model);
            (
                analyzer.find_dependencies(name).unwrap().len(),
                analyzer.find_impact(name).unwrap().len(),
            )
        })
        .collect();

    assert_eq!(parallel, sequential);
}

#[test]
fn test_parallel_cycle_detection_is_stable() {
    let model = Arc::new(build_model());

    let counts: Vec<usize> = (0..16)
        .into_par_iter()
        .map(|_| {
            DependencyAnalyzer::new(&model)
                .detect_cycles()
                .unwrap()
                .len()
        })
        .collect();

    assert!(counts.iter().all(|&count| count == 5));
}

#[test]
fn test_scoped_threads_share_a_borrowed_model() {
    let model = build_model();
    let analyzer = DependencyAnalyzer::new(&model);

    let (metrics, critical) = std::thread::scope(|scope| {
        let metrics = scope.spawn(|| analyzer.get_metrics().unwrap());
        let critical = scope.spawn(|| analyzer.get_critical_path().unwrap());
        (metrics.join().unwrap(), critical.join().unwrap())
    });

    assert_eq!(metrics.total_variables, 50 * 21);
    assert_eq!(metrics.circular_dependencies, 5);
    assert_eq!(critical.length(), 20);
}
