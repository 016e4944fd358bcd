//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use rowguard_cli::commands::RunOptions;

#[derive(Parser)]
#[command(
    name = "rowguard",
    version,
    about = "Audit tabular submissions against configurable data-quality rules",
    long_about = "Audit a CSV dataset against configurable data-quality rules.\n\n\
                  Runs completeness, duplicates, consistency, and drift checks and\n\
                  produces a scorecard, a record-level issue table, and a ranked fix list."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the configured checks against a CSV file.
    Run(RunArgs),

    /// List the built-in checks.
    Checks,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Path to the audit configuration file (YAML).
    #[arg(long = "config", value_name = "PATH")]
    pub config: PathBuf,

    /// Input CSV file (overrides the config file's `input`).
    #[arg(long = "input", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output directory for report artifacts (overrides `output.path`).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Evaluate and print the summary without writing artifacts.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

impl RunArgs {
    pub fn to_options(&self) -> RunOptions {
        RunOptions {
            config: self.config.clone(),
            input: self.input.clone(),
            output_dir: self.output_dir.clone(),
            dry_run: self.dry_run,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
