use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use console::{Term, style};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::constants::progress::{SPINNER_FRAMES, TICK_INTERVAL};
use crate::utils::string::pluralize;

// Progress bar style templates as constants
const PROGRESS_BAR_TEMPLATE: &str =
    "{msg} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {per_sec}";
const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";

pub struct ProgressReporter {
    term: Term,
    spinner_position: AtomicUsize,
    multi_progress: MultiProgress,
    current_bar: Option<ProgressBar>,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter {
    pub fn new() -> Self {
        let term = Term::stderr();
        Self {
            term,
            spinner_position: AtomicUsize::new(0),
            multi_progress: MultiProgress::new(),
            current_bar: None,
        }
    }

    pub fn create_progress_bar(&mut self, len: u64, message: &str) -> ProgressBar {
        let pb = self.multi_progress.add(ProgressBar::new(len));
        pb.set_style(
            ProgressStyle::default_bar()
                .template(PROGRESS_BAR_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▉▊▋▌▍▎▏ "),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        pb
    }

    pub fn create_spinner(&mut self, message: &str) -> ProgressBar {
        let mut frames: Vec<&str> = SPINNER_FRAMES.to_vec();
        frames.push("✓");

        let pb = self.multi_progress.add(ProgressBar::new_spinner());
        pb.set_style(
            ProgressStyle::default_spinner()
                .template(SPINNER_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&frames),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        pb
    }

    fn get_yarn_frame(&self) -> &'static str {
        let pos = self.spinner_position.fetch_add(1, Ordering::Relaxed) % SPINNER_FRAMES.len();
        SPINNER_FRAMES[pos]
    }

    pub fn start_discovery(&mut self) {
        let _ = self.term.clear_line();
        eprintln!("{} Discovering edge files...", style("🔍").cyan());
        let spinner = self.create_spinner("Walking input paths...");
        self.current_bar = Some(spinner);
    }

    pub fn checking_path(&self, path: &Path) {
        if let Some(ref pb) = self.current_bar {
            pb.set_message(format!("Checking: {}...", path.display()));
        } else {
            let _ = self.term.clear_line();
            eprint!(
                "\r{} Checking: {}... ",
                style(self.get_yarn_frame()).cyan(),
                style(path.display()).dim()
            );
        }
    }

    pub fn finish_discovery(&mut self, count: usize) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
        let _ = self.term.clear_line();
        if count == 0 {
            eprintln!("\r{} No edge files found", style("✗").red());
        } else {
            eprintln!(
                "\r{} Discovery complete: found {} {}",
                style("✓").green(),
                style(count).yellow().bold(),
                pluralize("edge file", count)
            );
        }
    }

    pub fn start_parsing(&mut self, total_files: usize) -> ProgressBar {
        let pb = self.create_progress_bar(total_files as u64, "Parsing edge files");
        self.current_bar = Some(pb.clone());
        pb
    }

    /// Safe to call from rayon workers
    pub fn file_parsed(&self, path: &Path) {
        if let Some(ref pb) = self.current_bar {
            pb.set_message(format!("Parsed: {}", path.display()));
            pb.inc(1);
        }
    }

    pub fn finish_parsing(&mut self, accepted: usize, rejected: usize) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
        eprintln!(
            "{} Loaded {} {}",
            style("✓").green(),
            style(accepted).yellow().bold(),
            pluralize("edge", accepted)
        );
        if rejected > 0 {
            eprintln!(
                "{} Skipped {} malformed {}",
                style("⚠").yellow().bold(),
                style(rejected).red().bold(),
                pluralize("record", rejected)
            );
        }
    }

    pub fn start_cycle_detection(&mut self) {
        eprintln!("\n{} Detecting dependency cycles...", style("🔄").yellow());
    }

    pub fn finish_cycle_detection(&self, cycles_found: usize) {
        if cycles_found == 0 {
            eprintln!(
                "{} No cycles detected! {}",
                style("✓").green().bold(),
                style("🎉").dim()
            );
        } else {
            eprintln!(
                "{} Found {} {}",
                style("⚠").yellow().bold(),
                style(cycles_found).red().bold(),
                pluralize("cycle", cycles_found)
            );
        }
    }
}
