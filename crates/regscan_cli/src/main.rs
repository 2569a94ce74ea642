//! regscan: find the registers a Verilog or SystemVerilog design declares.
//!
//! `regscan analyze` runs the syntax tool over source files and reports every
//! storage element as a flip-flop, a latch or a potential register.
//! `regscan tree` prints the parse tree reconstructed from one file's dump.

#![warn(missing_docs)]

mod analyze;
mod pipeline;
mod tree;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use regscan_analysis::Classification;

/// Register inventory for Verilog and SystemVerilog designs.
#[derive(Parser, Debug)]
#[command(name = "regscan", version, about = "Find registers in HDL sources")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a `regscan.toml` file, or the directory holding one.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify the registers declared in source files.
    Analyze(AnalyzeArgs),
    /// Print the parse tree reconstructed from one file's dump.
    Tree(TreeArgs),
}

/// Arguments for the `regscan analyze` subcommand.
#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Source files or directories to analyze.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Descend into subdirectories even if `[scan].recursive` is off.
    #[arg(short, long)]
    pub recursive: bool,

    /// Output format for the report.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Only report registers and modules of this module.
    #[arg(long)]
    pub module: Option<String>,

    /// Only report registers of this classification
    /// (`flip_flop`, `latch`, `potential_register`).
    #[arg(long = "type", value_name = "CLASS")]
    pub classification: Option<Classification>,

    /// Read a saved tree dump instead of running the tool (one file only).
    #[arg(long, value_name = "FILE")]
    pub tree_dump: Option<PathBuf>,

    /// Neither read nor write the result cache.
    #[arg(long)]
    pub no_cache: bool,
}

/// Arguments for the `regscan tree` subcommand.
#[derive(Parser, Debug)]
pub struct TreeArgs {
    /// The source file to dump.
    pub file: PathBuf,

    /// Read a saved tree dump instead of running the tool.
    #[arg(long, value_name = "FILE")]
    pub tree_dump: Option<PathBuf>,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when stderr is a terminal.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable table.
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print notes and debug logging.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a config file or its directory.
    pub config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };
    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };
    init_logging(&global);

    let result = match cli.command {
        Command::Analyze(ref args) => analyze::run(args, &global),
        Command::Tree(ref args) => tree::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Sends `tracing` output to stderr. `RUST_LOG` overrides the level chosen
/// by `-q`/`-v`.
fn init_logging(global: &GlobalArgs) {
    let default_level = if global.verbose { "debug" } else { "error" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(global.color)
        .try_init();
}
