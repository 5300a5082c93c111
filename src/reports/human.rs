//! Human-readable console report generation

use std::fmt::Write;

use console::style;

use super::{PathsReport, ReportGenerator, SummaryReport, UnusedReport};
use crate::analyzer::{CriticalPath, DegreeEntry, GraphMetrics, Reachability, TraversalDirection};
use crate::detector::{CycleDetector, CycleEdge, DependencyCycle};
use crate::error::TangleError;
use crate::utils::string::{arrow_chain, pluralize};

pub struct HumanReportGenerator {
    max_entries: Option<usize>,
}

impl HumanReportGenerator {
    pub fn new(max_entries: Option<usize>) -> Self {
        Self { max_entries }
    }

    fn shown(&self, total: usize) -> usize {
        self.max_entries.map_or(total, |limit| limit.min(total))
    }

    fn write_omitted(
        &self,
        output: &mut String,
        total: usize,
        noun: &str,
        flag: &str,
    ) -> Result<(), TangleError> {
        let shown = self.shown(total);
        if shown < total {
            writeln!(
                output,
                "  {} Showing {} of {} {}. Use {} to see more.",
                style("ℹ️").blue(),
                style(shown).yellow(),
                style(total).yellow(),
                pluralize(noun, total),
                flag
            )?;
        }
        Ok(())
    }

    fn write_cycle(
        &self,
        output: &mut String,
        index: usize,
        cycle: &DependencyCycle,
    ) -> Result<(), TangleError> {
        writeln!(
            output,
            "{} Cycle #{} ({} {})",
            style("🔄").yellow(),
            index + 1,
            cycle.len(),
            pluralize("variable", cycle.len())
        )?;
        writeln!(output, "  {} Variables involved:", style("📦").blue())?;
        for name in cycle.variables() {
            writeln!(output, "    {} {}", style("•").dim(), style(name).bold())?;
        }

        let mut rotation = cycle.path().to_vec();
        if let Some(first) = rotation.first().cloned() {
            rotation.push(first);
            writeln!(
                output,
                "\n  {} Rotation: {}",
                style("🧭").cyan(),
                style(arrow_chain(&rotation)).yellow()
            )?;
        }

        writeln!(
            output,
            "\n  {} Dependencies creating this cycle:",
            style("🔗").cyan()
        )?;

        let mut directions: Vec<_> = cycle.edges_by_direction().keys().collect();
        directions.sort();

        for direction in directions {
            if let Some(edges) = cycle.edges_by_direction().get(direction) {
                let mut sorted_edges: Vec<&CycleEdge> = edges.iter().collect();
                sorted_edges.sort_by(|a, b| a.location.cmp(&b.location));
                for edge in sorted_edges {
                    writeln!(
                        output,
                        "    {} {} → {} ({}, {})",
                        style("→").dim(),
                        style(&edge.dependent).yellow(),
                        style(&edge.dependency).yellow(),
                        style(&edge.location).dim(),
                        style(edge.kind).dim()
                    )?;
                }
            }
        }
        writeln!(output)?;
        Ok(())
    }

    fn write_ranking(
        &self,
        output: &mut String,
        title: &str,
        entries: &[DegreeEntry],
        unit: &str,
    ) -> Result<(), TangleError> {
        writeln!(output, "\n{} {}:", style("📈").cyan(), title)?;
        if entries.is_empty() {
            writeln!(output, "    {} (none)", style("•").dim())?;
            return Ok(());
        }
        for (rank, entry) in entries.iter().take(self.shown(entries.len())).enumerate() {
            writeln!(
                output,
                "    {:>3}. {} ({} {})",
                rank + 1,
                style(&entry.name).bold(),
                style(entry.count).yellow(),
                pluralize(unit, entry.count)
            )?;
        }
        self.write_omitted(output, entries.len(), "row", "--top")
    }

    fn write_name_list(
        &self,
        output: &mut String,
        title: &str,
        names: &[String],
    ) -> Result<(), TangleError> {
        writeln!(
            output,
            "\n{} {} ({}):",
            style("📦").blue(),
            title,
            style(names.len()).yellow()
        )?;
        if names.is_empty() {
            writeln!(output, "    {} (none)", style("•").dim())?;
        }
        for name in names.iter().take(self.shown(names.len())) {
            writeln!(output, "    {} {}", style("•").dim(), name)?;
        }
        self.write_omitted(output, names.len(), "variable", "--top")
    }

    fn write_chain(&self, output: &mut String, path: &CriticalPath) -> Result<(), TangleError> {
        let chain: Vec<String> = path
            .segments()
            .iter()
            .map(|segment| {
                if segment.is_cycle() {
                    format!("[{}]", segment.members.join(" ⇄ "))
                } else {
                    segment.representative.clone()
                }
            })
            .collect();

        writeln!(
            output,
            "  {} {}",
            style("→").dim(),
            style(arrow_chain(&chain)).yellow()
        )?;
        Ok(())
    }
}

impl ReportGenerator for HumanReportGenerator {
    fn generate_report(&self, detector: &CycleDetector) -> Result<String, TangleError> {
        let mut output = String::new();

        if !detector.has_cycles() {
            write!(
                output,
                "\n{} No circular dependencies detected! Every variable can be computed in \
                 dependency order.\n",
                style("✅").green().bold()
            )?;
            return Ok(output);
        }

        write!(
            output,
            "\n{} Found {} circular dependency {}:\n\n",
            style("❌").red().bold(),
            style(detector.cycle_count()).red().bold(),
            pluralize("group", detector.cycle_count())
        )?;

        let total_cycles = detector.cycle_count();
        for (i, cycle) in detector
            .cycles()
            .iter()
            .take(self.shown(total_cycles))
            .enumerate()
        {
            self.write_cycle(&mut output, i, cycle)?;
        }

        self.write_omitted(&mut output, total_cycles, "cycle", "--max-cycles")?;

        writeln!(
            output,
            "\n{} To break a cycle, remove at least one of the dependencies listed for it.",
            style("💡").yellow()
        )?;
        writeln!(
            output,
            "{} Variables that update themselves (x += ...) show up as one-variable cycles.",
            style("💡").yellow()
        )?;

        Ok(output)
    }

    fn reach_report(&self, reach: &Reachability) -> Result<String, TangleError> {
        let mut output = String::new();
        let (icon, verb) = match reach.direction() {
            TraversalDirection::Dependencies => ("🔍", "depends on"),
            TraversalDirection::Impact => ("💥", "affects"),
        };

        if reach.is_empty() {
            let none = match reach.direction() {
                TraversalDirection::Dependencies => "depends on nothing",
                TraversalDirection::Impact => "affects nothing",
            };
            writeln!(
                output,
                "\n{} {} {}",
                style("✅").green(),
                style(reach.variable()).bold(),
                none
            )?;
            return Ok(output);
        }

        writeln!(
            output,
            "\n{} {} {} {} {}:",
            style(icon).cyan(),
            style(reach.variable()).bold(),
            verb,
            style(reach.len()).yellow().bold(),
            pluralize("variable", reach.len())
        )?;

        let direct = reach.direct();
        writeln!(output, "\n  {} Direct ({}):", style("🔗").cyan(), direct.len())?;
        for name in &direct {
            writeln!(output, "    {} {}", style("•").dim(), style(name).bold())?;
        }

        let transitive: Vec<(&str, usize)> = reach
            .all()
            .into_iter()
            .filter(|(_, depth)| *depth > 1)
            .collect();
        writeln!(
            output,
            "\n  {} Transitive ({}):",
            style("🌊").cyan(),
            transitive.len()
        )?;
        for (name, depth) in &transitive {
            writeln!(
                output,
                "    {} {} {}",
                style("•").dim(),
                name,
                style(format!("(depth {depth})")).dim()
            )?;
        }

        if reach.includes_self() {
            writeln!(
                output,
                "\n{} {} reaches itself: it is part of a circular dependency.",
                style("⚠").yellow().bold(),
                style(reach.variable()).bold()
            )?;
        }

        Ok(output)
    }

    fn paths_report(&self, report: &PathsReport) -> Result<String, TangleError> {
        let mut output = String::new();

        if report.paths.is_empty() {
            writeln!(
                output,
                "\n{} No dependency path from {} to {}",
                style("ℹ").blue(),
                style(&report.from).bold(),
                style(&report.to).bold()
            )?;
            return Ok(output);
        }

        writeln!(
            output,
            "\n{} {} {} from {} to {}:\n",
            style("🧵").cyan(),
            style(report.paths.len()).yellow().bold(),
            pluralize("path", report.paths.len()),
            style(&report.from).bold(),
            style(&report.to).bold()
        )?;

        for (i, path) in report.paths.iter().enumerate() {
            writeln!(
                output,
                "  {:>3}. {} {}",
                i + 1,
                arrow_chain(path.variables()),
                style(format!("({} {})", path.len(), pluralize("edge", path.len()))).dim()
            )?;
        }

        if report.truncated {
            writeln!(
                output,
                "\n{} Stopped after {} paths; more exist. Use --max-paths to see more.",
                style("ℹ️").blue(),
                style(report.paths.len()).yellow()
            )?;
        }

        Ok(output)
    }

    fn metrics_report(&self, metrics: &GraphMetrics) -> Result<String, TangleError> {
        let mut output = String::new();

        writeln!(output, "\n{} Graph metrics", style("📊").cyan().bold())?;
        writeln!(
            output,
            "  {} Variables: {}",
            style("→").dim(),
            style(metrics.total_variables).yellow()
        )?;
        writeln!(
            output,
            "  {} Dependency edges: {} ({} distinct)",
            style("→").dim(),
            style(metrics.total_edges).yellow(),
            metrics.distinct_dependencies
        )?;
        writeln!(
            output,
            "  {} Circular dependency groups: {}",
            style("→").dim(),
            if metrics.circular_dependencies == 0 {
                style(metrics.circular_dependencies).green()
            } else {
                style(metrics.circular_dependencies).red()
            }
        )?;

        self.write_ranking(
            &mut output,
            "Most depended upon",
            &metrics.most_depended_upon,
            "dependent",
        )?;
        self.write_ranking(
            &mut output,
            "Most dependencies",
            &metrics.most_dependencies,
            "dependency",
        )?;
        self.write_name_list(
            &mut output,
            "Root variables (depend on nothing)",
            &metrics.root_variables,
        )?;
        self.write_name_list(
            &mut output,
            "Leaf variables (nothing depends on them)",
            &metrics.leaf_variables,
        )?;
        self.write_name_list(&mut output, "Isolated variables", &metrics.isolated_variables)?;

        Ok(output)
    }

    fn critical_path_report(&self, path: &CriticalPath) -> Result<String, TangleError> {
        let mut output = String::new();

        if path.is_empty() {
            writeln!(
                output,
                "\n{} No dependencies, so there is no critical path",
                style("ℹ").blue()
            )?;
            return Ok(output);
        }

        writeln!(
            output,
            "\n{} Critical path: {} {} across {} {}",
            style("🏁").cyan(),
            style(path.length()).yellow().bold(),
            pluralize("step", path.length()),
            path.variables().len(),
            pluralize("variable", path.variables().len())
        )?;
        self.write_chain(&mut output, path)?;

        if path.segments().iter().any(|s| s.is_cycle()) {
            writeln!(
                output,
                "\n{} Bracketed groups are circular dependencies counted as one step.",
                style("💡").yellow()
            )?;
        }

        Ok(output)
    }

    fn unused_report(&self, report: &UnusedReport) -> Result<String, TangleError> {
        let mut output = String::new();

        if report.candidates.is_empty() {
            writeln!(
                output,
                "\n{} Every variable is used by another variable",
                style("✅").green().bold()
            )?;
        } else {
            writeln!(
                output,
                "\n{} {} possibly unused {}:\n",
                style("🧹").yellow(),
                style(report.candidates.len()).yellow().bold(),
                pluralize("variable", report.candidates.len())
            )?;

            for candidate in &report.candidates {
                let location = candidate
                    .defined_at
                    .as_ref()
                    .map(|l| format!(" at {l}"))
                    .unwrap_or_default();
                writeln!(
                    output,
                    "    {} {}{} {}",
                    style("•").dim(),
                    style(&candidate.name).bold(),
                    style(location).dim(),
                    style(format!(
                        "(uses {} {})",
                        candidate.out_degree,
                        pluralize("variable", candidate.out_degree)
                    ))
                    .dim()
                )?;
            }
        }

        if !report.outputs.is_empty() {
            writeln!(
                output,
                "\n{} Excluded as designated outputs: {}",
                style("ℹ").blue(),
                report.outputs.join(", ")
            )?;
        }
        writeln!(
            output,
            "\n{} Nothing depending on a variable is only a signal; final results look the same. \
             Mark them with --output.",
            style("💡").yellow()
        )?;

        Ok(output)
    }

    fn summary_report(&self, report: &SummaryReport) -> Result<String, TangleError> {
        let mut output = String::new();
        let metrics = &report.metrics;

        writeln!(output, "\n{} Dependency summary", style("🧶").cyan().bold())?;
        writeln!(
            output,
            "  {} {} {}, {} {}",
            style("→").dim(),
            style(metrics.total_variables).yellow(),
            pluralize("variable", metrics.total_variables),
            style(metrics.distinct_dependencies).yellow(),
            pluralize("dependency", metrics.distinct_dependencies)
        )?;
        writeln!(
            output,
            "  {} {} root, {} leaf, {} isolated",
            style("→").dim(),
            metrics.root_variables.len(),
            metrics.leaf_variables.len(),
            metrics.isolated_variables.len()
        )?;

        if let Some(critical) = metrics.most_critical() {
            writeln!(
                output,
                "  {} Most critical: {} ({} {})",
                style("→").dim(),
                style(&critical.name).bold(),
                critical.count,
                pluralize("dependent", critical.count)
            )?;
        }

        if report.cycles.is_empty() {
            writeln!(output, "\n{} No circular dependencies", style("✅").green())?;
        } else {
            writeln!(
                output,
                "\n{} {} circular dependency {}:",
                style("❌").red(),
                style(report.cycles.len()).red().bold(),
                pluralize("group", report.cycles.len())
            )?;
            for cycle in report.cycles.iter().take(self.shown(report.cycles.len())) {
                let mut rotation = cycle.path().to_vec();
                if let Some(first) = rotation.first().cloned() {
                    rotation.push(first);
                }
                writeln!(output, "    {} {}", style("•").dim(), arrow_chain(&rotation))?;
            }
            self.write_omitted(&mut output, report.cycles.len(), "cycle", "`tangle cycles`")?;
        }

        if !report.critical_path.is_empty() {
            writeln!(
                output,
                "\n{} Critical path ({} {}):",
                style("🏁").cyan(),
                report.critical_path.length(),
                pluralize("step", report.critical_path.length())
            )?;
            self.write_chain(&mut output, &report.critical_path)?;
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use predicates::prelude::*;

    use super::*;
    use crate::analyzer::{DependencyAnalyzer, DependencyPath, UnusedPolicy};
    use crate::reports::fixtures::{cyclic_model, detector_for};

    fn plain(text: &str) -> String {
        console::strip_ansi_codes(text).to_string()
    }

    #[test]
    fn test_no_cycles() {
        let report = HumanReportGenerator::new(None)
            .generate_report(&CycleDetector::new())
            .unwrap();

        assert!(predicate::str::contains("No circular dependencies detected").eval(&plain(&report)));
    }

    #[test]
    fn test_cycles_show_rotation_and_locations() {
        let model = cyclic_model();
        let report = HumanReportGenerator::new(None)
            .generate_report(&detector_for(&model))
            .unwrap();
        let report = plain(&report);

        assert!(report.contains("Found 2 circular dependency groups"));
        assert!(report.contains("x → y → z → x"));
        assert!(report.contains("acc → acc"));
        assert!(report.contains("z → x (calc.py:3, unpack)"));
    }

    #[test]
    fn test_cycle_limit_says_what_was_omitted() {
        let model = cyclic_model();
        let report = HumanReportGenerator::new(Some(1))
            .generate_report(&detector_for(&model))
            .unwrap();
        let report = plain(&report);

        assert!(report.contains("Cycle #1"));
        assert!(!report.contains("Cycle #2"));
        assert!(report.contains("Showing 1 of 2 cycles"));
    }

    #[test]
    fn test_reach_report_marks_cycle_membership() {
        let model = cyclic_model();
        let reach = DependencyAnalyzer::new(&model).find_dependencies("x").unwrap();
        let report = plain(&HumanReportGenerator::new(None).reach_report(&reach).unwrap());

        assert!(report.contains("x depends on 3 variables"));
        assert!(report.contains("reaches itself"));
    }

    #[test]
    fn test_empty_impact() {
        let model = cyclic_model();
        let reach = DependencyAnalyzer::new(&model).find_impact("total").unwrap();
        let report = plain(&HumanReportGenerator::new(None).reach_report(&reach).unwrap());

        assert!(report.contains("total affects nothing"));
    }

    #[test]
    fn test_truncated_paths_are_announced() {
        let report = PathsReport {
            from: "a".to_string(),
            to: "c".to_string(),
            paths: vec![DependencyPath::new(vec![
                "a".to_string(),
                "b".to_string(),
                "c".to_string(),
            ])],
            limit: Some(1),
            truncated: true,
        };
        let text = plain(&HumanReportGenerator::new(None).paths_report(&report).unwrap());

        assert!(text.contains("a → b → c (2 edges)"));
        assert!(text.contains("more exist"));
    }

    #[test]
    fn test_metrics_top_limit() {
        let model = cyclic_model();
        let metrics = DependencyAnalyzer::new(&model).get_metrics().unwrap();
        let text = plain(&HumanReportGenerator::new(Some(1)).metrics_report(&metrics).unwrap());

        assert!(text.contains("Variables: 5"));
        assert!(text.contains("1. x (2 dependents)"));
        assert!(text.contains("Use --top to see more"));
    }

    #[test]
    fn test_unused_lists_outputs() {
        let model = cyclic_model();
        let candidates = DependencyAnalyzer::new(&model)
            .find_unused_variables(&UnusedPolicy::new().with_outputs(["total"]));
        let report = UnusedReport {
            candidates,
            outputs: vec!["total".to_string()],
        };
        let text = plain(&HumanReportGenerator::new(None).unused_report(&report).unwrap());

        assert!(text.contains("Every variable is used"));
        assert!(text.contains("Excluded as designated outputs: total"));
    }
}
