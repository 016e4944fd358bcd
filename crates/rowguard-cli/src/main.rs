//! Rowguard CLI.

use clap::{ColorChoice, Parser};
use comfy_table::Table;
use rowguard_cli::commands::{check_descriptions, run_audit};
use rowguard_cli::logging::{LogConfig, LogFormat, init_logging};
use rowguard_model::Status;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::summary::{apply_table_style, print_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    init_logging(&log_config_from_cli(&cli));
    let exit_code = match cli.command {
        Command::Run(args) => match run_audit(&args.to_options()) {
            Ok(outcome) => {
                print_summary(&outcome);
                if outcome.summary.overall == Status::Fail {
                    1
                } else {
                    0
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                2
            }
        },
        Command::Checks => {
            print_checks();
            0
        }
    };
    std::process::exit(exit_code);
}

fn print_checks() {
    let mut table = Table::new();
    table.set_header(vec!["Check", "Description"]);
    apply_table_style(&mut table);
    for (name, description) in check_descriptions() {
        table.add_row(vec![name, description]);
    }
    println!("{table}");
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => io::stderr().is_terminal(),
    };
    config
}
