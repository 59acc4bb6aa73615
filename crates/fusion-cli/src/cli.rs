//! CLI argument definitions for table fusion.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use fusion_cli::resolve::SourceArg;

#[derive(Parser)]
#[command(
    name = "table-fusion",
    version,
    about = "Fuse workspace tables into one table (cartesian product)",
    long_about = "Combine the records of two or more tables into one output table.\n\n\
                  Every record of each source is paired with every record of the\n\
                  others. Field names are prefixed with their source table's name.\n\
                  The output table is cleared before the result is written."
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
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// TOML file with `[fusion]` and `[ui]` settings.
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Message language tag (en, zh, zh-HK, zh-TW).
    #[arg(long = "language", value_name = "TAG", global = true)]
    pub language: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the (table, view) pairs that can be fused.
    Sources(SourcesArgs),

    /// Fuse sources into an output table.
    Run(RunArgs),
}

#[derive(Args)]
pub struct SourcesArgs {
    /// Workspace JSON file.
    #[arg(long = "workspace", value_name = "FILE")]
    pub workspace: PathBuf,
}

#[derive(Args)]
pub struct RunArgs {
    /// Workspace JSON file; rewritten after a successful run.
    #[arg(long = "workspace", value_name = "FILE")]
    pub workspace: PathBuf,

    /// Source as TABLE:VIEW, by id or display name. Repeat in fold order.
    #[arg(long = "source", value_name = "TABLE:VIEW", required = true)]
    pub sources: Vec<SourceArg>,

    /// Output table, by id or display name. Its existing data is cleared.
    #[arg(long = "output", value_name = "TABLE")]
    pub output: String,

    /// Separator between source prefix and field name.
    #[arg(long = "separator", value_name = "SEP")]
    pub separator: Option<String>,

    /// Fail on sources sharing a display name instead of disambiguating them.
    #[arg(long = "no-disambiguate")]
    pub no_disambiguate: bool,

    /// Do not switch the host to the output table.
    #[arg(long = "no-switch")]
    pub no_switch: bool,

    /// Run every stage but do not save the workspace file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
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
