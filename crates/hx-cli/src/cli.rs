//! CLI argument definitions for the allocation tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "hx-allocate",
    version,
    about = "Filter, prioritize and assign appointment report rows to agents",
    long_about = "Filter an exported appointment report against a reference sheet,\n\
                  sort it by provider and appointment date, and assign each row a\n\
                  priority label and an agent from the configured roster."
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

    /// Log output format (pretty for humans, json for machine parsing).
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the allocation engine over a report.
    Run(RunArgs),

    /// Show what a reference sheet marks as valid and workable.
    Lookup(LookupArgs),

    /// Print the default configuration as TOML.
    Config,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Raw appointment report (CSV).
    #[arg(long = "report", value_name = "CSV")]
    pub report: PathBuf,

    /// Reference sheet with state, visit type and workable columns (CSV).
    #[arg(long = "reference", value_name = "CSV")]
    pub reference: PathBuf,

    /// Run configuration file (TOML); defaults apply when omitted.
    #[arg(long = "config", value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Agent identity; repeat to build the roster (replaces the configured roster).
    #[arg(long = "agent", value_name = "ID")]
    pub agents: Vec<String>,

    /// Keep only rows whose visit status is PEN or PR.
    #[arg(long = "visit-status-filter")]
    pub visit_status_filter: bool,

    /// Visit-type text marking a new-patient visit.
    #[arg(long = "new-patient-marker", value_name = "TEXT")]
    pub new_patient_marker: Option<String>,

    /// Escalation tracker (CSV); rows for its accounts are removed.
    #[arg(long = "escalations", value_name = "CSV")]
    pub escalations: Option<PathBuf>,

    /// Print the first N allocated rows.
    #[arg(long = "preview", value_name = "N")]
    pub preview: Option<usize>,

    /// Print the run summary as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct LookupArgs {
    /// Reference sheet (CSV).
    #[arg(long = "reference", value_name = "CSV")]
    pub reference: PathBuf,

    /// Run configuration file (TOML) supplying reference column names.
    #[arg(long = "config", value_name = "TOML")]
    pub config: Option<PathBuf>,
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
