//! QARTOD lookup-table validator CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use qartod_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use qartod_cli::commands::{run_file, run_tree, run_types, run_vocabulary};
use qartod_cli::logging::{LogConfig, LogFormat, init_logging};
use qartod_cli::summary::{print_file_report, print_tree_report};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let settings = cli.run.settings();
    let outcome = match &cli.command {
        Command::Tree(args) => run_tree(args, &settings).and_then(|report| {
            print_tree_report(&report, &settings)?;
            Ok(report.is_valid())
        }),
        Command::File(args) => run_file(args, &settings).and_then(|report| {
            print_file_report(&report, &settings)?;
            Ok(report.is_valid())
        }),
        Command::Types(args) => run_types(args, &settings).map(|()| true),
        Command::Vocabulary => run_vocabulary(&settings).map(|()| true),
    };
    let exit_code = match outcome {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig::default()
        .with_level_filter(level_filter)
        .with_env_filter(!(cli.verbosity.is_present() || cli.log_level.is_some()))
        .with_timestamps(cli.log_timestamps)
        .with_format(format)
        .with_ansi(ansi)
        .with_log_file(cli.log_file.clone())
}
