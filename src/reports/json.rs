//! JSON format report generation

use serde_json::{Value, json};

use super::{PathsReport, ReportGenerator, SummaryReport, UnusedReport};
use crate::analyzer::{CriticalPath, GraphMetrics, Reachability};
use crate::detector::{CycleDetector, DependencyCycle};
use crate::error::TangleError;

pub struct JsonReportGenerator;

impl Default for JsonReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

fn cycle_json(cycle: &DependencyCycle) -> Value {
    let mut edges: Vec<_> = cycle.edges().iter().collect();
    edges.sort_by(|a, b| {
        (&a.dependent, &a.dependency, &a.location).cmp(&(&b.dependent, &b.dependency, &b.location))
    });

    let edges: Vec<Value> = edges
        .into_iter()
        .map(|edge| {
            json!({
                "dependent": edge.dependent,
                "dependency": edge.dependency,
                "file": edge.location.file,
                "line": edge.location.line,
                "kind": edge.kind,
            })
        })
        .collect();

    json!({
        "variables": cycle.variables(),
        "path": cycle.path(),
        "edges": edges,
    })
}

fn critical_path_json(path: &CriticalPath) -> Value {
    json!({
        "length": path.length(),
        "variables": path.variables(),
        "segments": path.segments(),
    })
}

fn pretty(report: &Value) -> Result<String, TangleError> {
    serde_json::to_string_pretty(report).map_err(TangleError::Json)
}

impl ReportGenerator for JsonReportGenerator {
    fn generate_report(&self, detector: &CycleDetector) -> Result<String, TangleError> {
        let mut cycles: Vec<_> = detector.cycles().iter().collect();

        // Sort cycles by their smallest member for consistent ordering
        cycles.sort_by(|a, b| a.variables().first().cmp(&b.variables().first()));

        let report = json!({
            "has_cycles": detector.has_cycles(),
            "cycle_count": detector.cycle_count(),
            "cycles": cycles.into_iter().map(cycle_json).collect::<Vec<_>>(),
        });

        pretty(&report)
    }

    fn reach_report(&self, reach: &Reachability) -> Result<String, TangleError> {
        let all: Vec<Value> = reach
            .all()
            .into_iter()
            .map(|(name, depth)| json!({ "name": name, "depth": depth }))
            .collect();

        let report = json!({
            "variable": reach.variable(),
            "direction": reach.direction().to_string(),
            "count": reach.len(),
            "includes_self": reach.includes_self(),
            "direct": reach.direct(),
            "transitive": reach.transitive(),
            "all": all,
        });

        pretty(&report)
    }

    fn paths_report(&self, report: &PathsReport) -> Result<String, TangleError> {
        let paths: Vec<&[String]> = report.paths.iter().map(|p| p.variables()).collect();

        let report = json!({
            "from": report.from,
            "to": report.to,
            "path_count": report.paths.len(),
            "limit": report.limit,
            "truncated": report.truncated,
            "paths": paths,
        });

        pretty(&report)
    }

    fn metrics_report(&self, metrics: &GraphMetrics) -> Result<String, TangleError> {
        serde_json::to_string_pretty(metrics).map_err(TangleError::Json)
    }

    fn critical_path_report(&self, path: &CriticalPath) -> Result<String, TangleError> {
        pretty(&critical_path_json(path))
    }

    fn unused_report(&self, report: &UnusedReport) -> Result<String, TangleError> {
        let report = json!({
            "count": report.candidates.len(),
            "designated_outputs": report.outputs,
            "unused": report.candidates,
        });

        pretty(&report)
    }

    fn summary_report(&self, report: &SummaryReport) -> Result<String, TangleError> {
        let metrics = &report.metrics;

        let report = json!({
            "total_variables": metrics.total_variables,
            "total_edges": metrics.total_edges,
            "distinct_dependencies": metrics.distinct_dependencies,
            "cycle_count": report.cycles.len(),
            "cycles": report.cycles.iter().map(cycle_json).collect::<Vec<_>>(),
            "root_variables": metrics.root_variables,
            "leaf_variables": metrics.leaf_variables,
            "isolated_variables": metrics.isolated_variables,
            "most_critical": metrics.most_critical(),
            "critical_path": critical_path_json(&report.critical_path),
        });

        pretty(&report)
    }
}
