//! CLI argument definitions for bro2heka.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

/// Log read when neither `--file` nor a positional path is given.
pub const DEFAULT_LOG_FILE: &str = "/opt/bro/log/current/conn.log";

#[derive(Parser)]
#[command(
    name = "bro2heka",
    version,
    about = "Generate a Heka Lua decoder from a Bro log header",
    long_about = "Read the #-directive header of a Bro log and print a Heka sandbox\n\
                  decoder that splits each line with LPeg and maps every column\n\
                  to a message field."
)]
pub struct Cli {
    /// The log file to use to generate the Lua script.
    #[arg(
        short = 'f',
        long = "file",
        value_name = "PATH",
        default_value = DEFAULT_LOG_FILE
    )]
    pub file: PathBuf,

    /// Log file given positionally (instead of --file).
    #[arg(value_name = "FILE", conflicts_with = "file")]
    pub input: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// The log file to read.
    pub fn input_path(&self) -> &Path {
        self.input.as_deref().unwrap_or(&self.file)
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
