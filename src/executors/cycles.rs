//! Cycles command executor

use console::style;
use miette::{Result, WrapErr};

use crate::config::CyclesConfig;
use crate::detector::CycleDetector;
use crate::executors::{CommandExecutor, load_graph};
use crate::reports::generator_for;

pub struct CyclesExecutor;

impl CommandExecutor for CyclesExecutor {
    type Config = CyclesConfig;

    fn execute(config: Self::Config) -> Result<()> {
        eprintln!(
            "{} Checking for circular variable dependencies...\n",
            style("🧶").cyan()
        );

        let mut loaded = load_graph(&config.input)?;

        if let Some(p) = loaded.progress.as_mut() {
            p.start_cycle_detection();
        }

        let mut detector = CycleDetector::new();
        detector
            .detect_cycles(&loaded.model)
            .wrap_err("Failed to detect dependency cycles")?;

        if let Some(p) = loaded.progress.as_ref() {
            p.finish_cycle_detection(detector.cycle_count());
        }

        let report = generator_for(config.format, config.max_cycles)
            .generate_report(&detector)
            .wrap_err("Failed to generate report")?;
        print!("{report}");

        // Exit with error code if cycles found and requested
        if config.error_on_cycles && detector.has_cycles() {
            std::process::exit(1);
        }

        Ok(())
    }
}
