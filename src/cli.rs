use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::common::{CommonArgs, CycleDisplayArgs, FormatArgs};

#[derive(Parser)]
#[command(
    name = "tangle",
    about = "🧶 Untangle variable dependencies in scanned source code",
    long_about = "tangle loads the variable dependency edges produced by a source scanner and \
                  answers questions about them: which variables form circular dependencies, \
                  what a variable needs, what a change to it would affect, how two variables \
                  are connected, and which variables nothing uses.",
    subcommand_required = true,
    version
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find every group of mutually dependent variables
    #[command(
        long_about = "Detect circular dependencies between variables. Uses Tarjan's algorithm \
                      to find every strongly connected component with more than one variable, \
                      plus every variable that depends on itself. Each cycle is shown with one \
                      concrete rotation and the source locations of the edges involved."
    )]
    Cycles {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        format: FormatArgs,

        #[command(flatten)]
        cycle_display: CycleDisplayArgs,

        /// Exit with error code if cycles found
        #[arg(long, env = "TANGLE_ERROR_ON_CYCLES")]
        error_on_cycles: bool,
    },

    /// Everything a variable transitively depends on
    Deps {
        /// Variable to start from
        #[arg(value_name = "VARIABLE")]
        variable: String,

        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// Everything a change to a variable would affect
    Impact {
        /// Variable that changes
        #[arg(value_name = "VARIABLE")]
        variable: String,

        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// List the simple dependency paths between two variables
    #[command(
        long_about = "Enumerate the simple paths from FROM to TO, following dependency \
                      direction. The number of paths grows exponentially with graph density, so \
                      the listing stops after --max-paths paths and says so."
    )]
    Paths {
        #[arg(value_name = "FROM")]
        from: String,

        #[arg(value_name = "TO")]
        to: String,

        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        format: FormatArgs,

        /// Stop after this many paths
        #[arg(long, env = "TANGLE_MAX_PATHS")]
        max_paths: Option<usize>,

        /// Ignore paths longer than this many edges
        #[arg(long, env = "TANGLE_MAX_DEPTH")]
        max_depth: Option<usize>,
    },

    /// Degree rankings, roots, leaves and cycle count
    Metrics {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        format: FormatArgs,

        /// Entries shown per ranking in human output
        #[arg(long, default_value_t = crate::constants::output::DEFAULT_TOP, env = "TANGLE_TOP")]
        top: usize,
    },

    /// The longest chain of dependencies
    #[command(
        long_about = "Compute the longest dependency chain. Mutually dependent variables are \
                      first collapsed into one component each, so the chain is well defined \
                      even when the graph has cycles."
    )]
    CriticalPath {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// Variables nothing depends on
    Unused {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        format: FormatArgs,

        /// Final output that is expected to be unused (repeatable)
        #[arg(long = "output", value_name = "VARIABLE", env = "TANGLE_OUTPUTS", value_delimiter = ',')]
        outputs: Vec<String>,
    },

    /// Write the graph as JSON, Graphviz DOT or Mermaid
    Export {
        #[command(flatten)]
        common: CommonArgs,

        /// Export format
        #[arg(
            short,
            long,
            value_enum,
            default_value = "json",
            env = "TANGLE_EXPORT_FORMAT"
        )]
        format: ExportFormat,

        /// Output file (stdout if not specified)
        #[arg(short, long, env = "TANGLE_OUTPUT")]
        output: Option<PathBuf>,

        /// Highlight cycles in DOT and Mermaid output
        #[arg(long, default_value = "true", env = "TANGLE_HIGHLIGHT_CYCLES")]
        highlight_cycles: bool,

        /// Label edges with their source locations
        #[arg(long, env = "TANGLE_SHOW_LOCATIONS")]
        show_locations: bool,
    },

    /// Quick overview: totals, cycles, roots, leaves and the most critical variable
    Summary {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        format: FormatArgs,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "github")]
    GitHub,
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum ExportFormat {
    Json,
    Dot,
    Mermaid,
}
