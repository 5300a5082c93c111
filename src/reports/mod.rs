//! Report generation modules for different output formats
//!
//! This module contains report generators for various output formats:
//! - human: Human-readable console output
//! - json: JSON format for programmatic use
//! - github: GitHub Actions workflow annotations
//!
//! Every generator renders every analysis; the executors pick one per
//! `--format` with [`generator_for`].

pub mod github;
pub mod human;
pub mod json;

use crate::analyzer::{
    CriticalPath, DependencyPath, GraphMetrics, Reachability, UnusedCandidate,
};
use crate::cli::OutputFormat;
use crate::detector::{CycleDetector, DependencyCycle};
use crate::error::TangleError;

/// Outcome of a bounded path enumeration
#[derive(Debug, Clone)]
pub struct PathsReport {
    pub from: String,
    pub to: String,
    pub paths: Vec<DependencyPath>,
    /// The `max_paths` bound that was applied
    pub limit: Option<usize>,
    /// More paths exist beyond `limit`
    pub truncated: bool,
}

#[derive(Debug, Clone)]
pub struct UnusedReport {
    pub candidates: Vec<UnusedCandidate>,
    /// Designated outputs that were excluded, sorted
    pub outputs: Vec<String>,
}

/// Everything `tangle summary` shows
#[derive(Debug, Clone)]
pub struct SummaryReport {
    pub metrics: GraphMetrics,
    pub cycles: Vec<DependencyCycle>,
    pub critical_path: CriticalPath,
}

/// Common trait for all report generators
pub trait ReportGenerator {
    /// Generate a report from cycle detection results
    fn generate_report(&self, detector: &CycleDetector) -> Result<String, TangleError>;

    fn reach_report(&self, reach: &Reachability) -> Result<String, TangleError>;

    fn paths_report(&self, report: &PathsReport) -> Result<String, TangleError>;

    fn metrics_report(&self, metrics: &GraphMetrics) -> Result<String, TangleError>;

    fn critical_path_report(&self, path: &CriticalPath) -> Result<String, TangleError>;

    fn unused_report(&self, report: &UnusedReport) -> Result<String, TangleError>;

    fn summary_report(&self, report: &SummaryReport) -> Result<String, TangleError>;
}

/// Pick the generator for `format`
///
/// `max_entries` caps long lists in human output only; machine formats are
/// always complete.
pub fn generator_for(format: OutputFormat, max_entries: Option<usize>) -> Box<dyn ReportGenerator> {
    match format {
        OutputFormat::Human => Box::new(HumanReportGenerator::new(max_entries)),
        OutputFormat::Json => Box::new(JsonReportGenerator::new()),
        OutputFormat::GitHub => Box::new(GitHubReportGenerator::new()),
    }
}

// Re-export for convenience
pub use github::GitHubReportGenerator;
pub use human::HumanReportGenerator;
pub use json::JsonReportGenerator;
