//! GitHub Actions format report generation
//!
//! Emits workflow commands (`::error`, `::warning`, `::notice`). Edges that
//! take part in a cycle are annotated at their source location so they show
//! up inline on the pull request diff.

use std::fmt::Write;

use super::{PathsReport, ReportGenerator, SummaryReport, UnusedReport};
use crate::analyzer::{CriticalPath, GraphMetrics, Reachability, TraversalDirection};
use crate::detector::CycleDetector;
use crate::error::TangleError;
use crate::utils::string::{arrow_chain, pluralize};

pub struct GitHubReportGenerator;

impl Default for GitHubReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl GitHubReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

/// Workflow command properties must not contain `,` `:` or newlines
fn escape_property(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
        .replace(':', "%3A")
        .replace(',', "%2C")
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

impl ReportGenerator for GitHubReportGenerator {
    fn generate_report(&self, detector: &CycleDetector) -> Result<String, TangleError> {
        let mut output = String::new();

        if !detector.has_cycles() {
            writeln!(
                output,
                "::notice title=Dependency Check::No circular variable dependencies detected! ✅"
            )?;
            return Ok(output);
        }

        writeln!(
            output,
            "::error title=Circular Dependencies::Found {} circular dependency {}",
            detector.cycle_count(),
            pluralize("group", detector.cycle_count())
        )?;

        let mut sorted_cycles: Vec<_> = detector.cycles().iter().collect();
        sorted_cycles.sort_by(|a, b| a.variables().first().cmp(&b.variables().first()));

        for (i, cycle) in sorted_cycles.iter().enumerate() {
            let mut rotation = cycle.path().to_vec();
            if let Some(first) = rotation.first().cloned() {
                rotation.push(first);
            }

            let mut sorted_edges = cycle.edges().to_vec();
            sorted_edges.sort_by(|a, b| a.location.cmp(&b.location));

            for edge in sorted_edges {
                writeln!(
                    output,
                    "::warning file={},line={},title=Cycle {}::{}",
                    escape_property(&edge.location.file),
                    edge.location.line,
                    i + 1,
                    escape_data(&format!(
                        "{} depends on {} ({}), closing {}",
                        edge.dependent,
                        edge.dependency,
                        edge.kind,
                        arrow_chain(&rotation)
                    ))
                )?;
            }
        }

        writeln!(
            output,
            "::notice title=Recommendation::Remove at least one dependency from each cycle."
        )?;

        Ok(output)
    }

    fn reach_report(&self, reach: &Reachability) -> Result<String, TangleError> {
        let mut output = String::new();
        let verb = match reach.direction() {
            TraversalDirection::Dependencies => "depends on",
            TraversalDirection::Impact => "affects",
        };

        writeln!(
            output,
            "::notice title={}::{} {} {} {}: {}",
            escape_property(&format!("{} of {}", reach.direction(), reach.variable())),
            escape_data(reach.variable()),
            verb,
            reach.len(),
            pluralize("variable", reach.len()),
            escape_data(&reach.names().collect::<Vec<_>>().join(", "))
        )?;

        if reach.includes_self() {
            writeln!(
                output,
                "::warning title=Circular Dependency::{} reaches itself",
                escape_data(reach.variable())
            )?;
        }

        Ok(output)
    }

    fn paths_report(&self, report: &PathsReport) -> Result<String, TangleError> {
        let mut output = String::new();

        writeln!(
            output,
            "::notice title=Dependency Paths::{} {} from {} to {}",
            report.paths.len(),
            pluralize("path", report.paths.len()),
            escape_data(&report.from),
            escape_data(&report.to)
        )?;
        for path in &report.paths {
            writeln!(output, "::notice::{}", escape_data(&arrow_chain(path.variables())))?;
        }
        if report.truncated {
            writeln!(
                output,
                "::warning title=Paths Truncated::Stopped after {} paths; more exist",
                report.paths.len()
            )?;
        }

        Ok(output)
    }

    fn metrics_report(&self, metrics: &GraphMetrics) -> Result<String, TangleError> {
        let mut output = String::new();

        writeln!(
            output,
            "::notice title=Graph Metrics::{} variables, {} edges ({} distinct), {} circular \
             dependency {}",
            metrics.total_variables,
            metrics.total_edges,
            metrics.distinct_dependencies,
            metrics.circular_dependencies,
            pluralize("group", metrics.circular_dependencies)
        )?;
        if let Some(critical) = metrics.most_critical() {
            writeln!(
                output,
                "::notice title=Most Critical::{} ({} {})",
                escape_data(&critical.name),
                critical.count,
                pluralize("dependent", critical.count)
            )?;
        }
        if metrics.circular_dependencies > 0 {
            writeln!(
                output,
                "::warning title=Circular Dependencies::Run `tangle cycles` for details"
            )?;
        }

        Ok(output)
    }

    fn critical_path_report(&self, path: &CriticalPath) -> Result<String, TangleError> {
        let mut output = String::new();

        if path.is_empty() {
            writeln!(output, "::notice title=Critical Path::No dependencies")?;
        } else {
            writeln!(
                output,
                "::notice title=Critical Path::{} {}: {}",
                path.length(),
                pluralize("step", path.length()),
                escape_data(&arrow_chain(&path.variables()))
            )?;
        }

        Ok(output)
    }

    fn unused_report(&self, report: &UnusedReport) -> Result<String, TangleError> {
        let mut output = String::new();

        if report.candidates.is_empty() {
            writeln!(
                output,
                "::notice title=Unused Variables::No possibly unused variables"
            )?;
            return Ok(output);
        }

        for candidate in &report.candidates {
            match &candidate.defined_at {
                Some(location) => writeln!(
                    output,
                    "::warning file={},line={},title=Possibly Unused::Nothing depends on {}",
                    escape_property(&location.file),
                    location.line,
                    escape_data(&candidate.name)
                )?,
                None => writeln!(
                    output,
                    "::warning title=Possibly Unused::Nothing depends on {}",
                    escape_data(&candidate.name)
                )?,
            }
        }

        Ok(output)
    }

    fn summary_report(&self, report: &SummaryReport) -> Result<String, TangleError> {
        let mut output = self.metrics_report(&report.metrics)?;
        output.push_str(&self.critical_path_report(&report.critical_path)?);

        for cycle in &report.cycles {
            let mut rotation = cycle.path().to_vec();
            if let Some(first) = rotation.first().cloned() {
                rotation.push(first);
            }
            writeln!(
                output,
                "::error title=Circular Dependency::{}",
                escape_data(&arrow_chain(&rotation))
            )?;
        }

        Ok(output)
    }
}
