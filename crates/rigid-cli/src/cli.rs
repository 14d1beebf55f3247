//! CLI argument definitions for the rigidity validator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "rigidity",
    version,
    about = "Validate and correct CSV rows through per-column rule chains",
    long_about = "Validate and correct CSV rows through per-column rule chains.\n\n\
                  Rules are declared in a JSON file, either as a list of rule lists\n\
                  (columns by position) or an object of rule lists (columns by header)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

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

    /// Prefix log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include the module path of each log event.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a CSV file and write the corrected rows.
    Check(CheckArgs),

    /// List the built-in rules.
    Rules,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// CSV file to validate.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// JSON rule configuration.
    #[arg(long = "rules", short = 'r', value_name = "PATH")]
    pub rules: PathBuf,

    /// Output file for corrected rows (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Address columns by header name.
    #[arg(long = "keyed")]
    pub keyed: bool,

    /// The input has no header line (ignored with --keyed).
    #[arg(long = "no-header")]
    pub no_header: bool,

    /// Override the display mode from the rules file.
    #[arg(long = "display", value_enum)]
    pub display: Option<DisplayArg>,
}

/// CLI display mode choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum DisplayArg {
    None,
    Simple,
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
