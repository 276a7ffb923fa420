//! CLI argument definitions for the QARTOD lookup-table validator.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use qartod_model::FileType;
use qartod_standards::{CatalogOptions, MatchMode, NumericMode};

use crate::types::{MessageMode, RunSettings};

#[derive(Parser)]
#[command(
    name = "qartod-validate",
    version,
    about = "Validate QARTOD quality-control lookup tables",
    long_about = "Validate QARTOD quality-control lookup tables.\n\n\
                  Checks headers, column counts and field formats of gross-range,\n\
                  climatology and data-QC lookup files against a fixed catalog,\n\
                  using controlled vocabularies loaded from the configured sources."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub run: RunArgs,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix each log line with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

/// Options shared by every validation command.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Diagnostics to print (verbose also echoes each file before it is validated).
    #[arg(long = "messages", value_enum, default_value = "errors", global = true)]
    pub messages: MessagesArg,

    /// TOML configuration (default: QARTOD_CONFIG, then <ROOT>/qartod.toml).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Only require pattern columns to match at the start of the value.
    #[arg(long = "prefix-match", global = true)]
    pub prefix_match: bool,

    /// Accept anything that parses as a float in numeric columns.
    #[arg(long = "lenient-numbers", global = true)]
    pub lenient_numbers: bool,

    /// Print reports as JSON instead of text.
    #[arg(long = "json", global = true)]
    pub json: bool,
}

impl RunArgs {
    pub fn settings(&self) -> RunSettings {
        RunSettings {
            messages: match self.messages {
                MessagesArg::Errors => MessageMode::Errors,
                MessagesArg::Verbose => MessageMode::Verbose,
            },
            config: self.config.clone(),
            catalog: CatalogOptions {
                match_mode: if self.prefix_match {
                    MatchMode::Prefix
                } else {
                    MatchMode::Full
                },
                numeric_mode: if self.lenient_numbers {
                    NumericMode::Lenient
                } else {
                    NumericMode::Strict
                },
            },
            json: self.json,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Walk a lookup-table tree and validate every recognised file.
    Tree(TreeArgs),

    /// Validate a single file.
    File(FileArgs),

    /// List the file types of the schema catalog.
    Types(TypesArgs),

    /// Load the configured vocabularies and print their sizes.
    Vocabulary,
}

#[derive(Args)]
pub struct TreeArgs {
    /// Root of the lookup-table tree.
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,
}

#[derive(Args)]
pub struct FileArgs {
    /// File to validate.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// File type (inferred from the file name when omitted).
    #[arg(long = "type", value_name = "FILE_TYPE")]
    pub file_type: Option<FileType>,
}

#[derive(Args)]
pub struct TypesArgs {
    /// Also list every column and its check.
    #[arg(long = "columns")]
    pub columns: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum MessagesArg {
    Errors,
    Verbose,
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
