//! Export command executor

use std::fs::File;
use std::io::{self, BufWriter, Write};

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use crate::analyzer::DependencyAnalyzer;
use crate::cli::ExportFormat;
use crate::config::ExportOptions;
use crate::executors::{CommandExecutor, load_graph};
use crate::graph::GraphRenderer;

pub struct ExportExecutor;

impl CommandExecutor for ExportExecutor {
    type Config = ExportOptions;

    fn execute(options: Self::Config) -> Result<()> {
        eprintln!(
            "{} Exporting dependency graph as {}...",
            style("📤").cyan(),
            format!("{:?}", options.format).to_lowercase()
        );

        let loaded = load_graph(&options.input)?;
        let analyzer = DependencyAnalyzer::new(&loaded.model);

        // Determine output destination
        let mut output_writer: Box<dyn Write> = if let Some(output_path) = options.output.as_ref()
        {
            Box::new(BufWriter::new(
                File::create(output_path)
                    .into_diagnostic()
                    .wrap_err_with(|| {
                        format!("Failed to create output file '{}'", output_path.display())
                    })?,
            ))
        } else {
            Box::new(io::stdout())
        };

        match options.format {
            ExportFormat::Json => {
                let json = analyzer
                    .export_graph()
                    .to_json()
                    .wrap_err("Failed to serialize graph export")?;
                writeln!(output_writer, "{json}")
                    .into_diagnostic()
                    .wrap_err("Failed to write graph export")?;
            }
            ExportFormat::Dot | ExportFormat::Mermaid => {
                let cycles = if options.highlight_cycles {
                    analyzer
                        .detect_cycles()
                        .wrap_err("Failed to detect cycles")?
                } else {
                    Vec::new()
                };

                let renderer = GraphRenderer::new(options.highlight_cycles, options.show_locations);
                if options.format == ExportFormat::Dot {
                    renderer
                        .render_dot(&loaded.model, &cycles, output_writer.as_mut())
                        .wrap_err("Failed to render DOT graph")?;
                } else {
                    renderer
                        .render_mermaid(&loaded.model, &cycles, output_writer.as_mut())
                        .wrap_err("Failed to render Mermaid graph")?;
                }
            }
        }

        output_writer
            .flush()
            .into_diagnostic()
            .wrap_err("Failed to flush graph output")?;

        if let Some(output_path) = options.output {
            eprintln!(
                "{} Graph written to {}",
                style("✓").green(),
                style(output_path.display()).bold()
            );
        }

        Ok(())
    }
}
