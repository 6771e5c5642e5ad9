//! CLI argument definitions for the RIPS validator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "rips-validator",
    version,
    about = "Validador de archivos RIPS - Resoluciones 2275/2023 y 3280/2018",
    long_about = "Validate Colombian health-service billing extracts (RIPS).\n\n\
                  Checks field formats, CIE10 catalog membership, cross-file\n\
                  referential integrity, duplicates, and semantic coherence,\n\
                  and can propose or apply confidence-scored corrections."
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

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a directory of flat RIPS files or a consolidated JSON document.
    Validate(ValidateArgs),

    /// List the supported RIPS file kinds and their field counts.
    Kinds,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Directory with `AF######.txt`-style files, or a `.json` document.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory for the report and corrected files.
    #[arg(short, long, value_name = "DIR", default_value = "output")]
    pub output: PathBuf,

    /// What to do with correction rules.
    #[arg(long, value_enum, default_value = "validate-only")]
    pub mode: ModeArg,

    /// Cutoff date (YYYY-MM-DD) for future-date checks and age derivation.
    /// Defaults to today.
    #[arg(long = "reference-date", value_name = "DATE")]
    pub reference_date: Option<chrono::NaiveDate>,

    /// CSV file (`codigo,descripcion`) extending the embedded CIE10 catalog.
    #[arg(long = "cie10-csv", value_name = "PATH")]
    pub cie10_csv: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Validate only; the corrector never runs.
    ValidateOnly,
    /// Record correction proposals without touching the data.
    SuggestCorrections,
    /// Apply high-confidence corrections, record the rest.
    AutoCorrect,
}

impl From<ModeArg> for rips_model::RunMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::ValidateOnly => Self::ValidateOnly,
            ModeArg::SuggestCorrections => Self::SuggestCorrections,
            ModeArg::AutoCorrect => Self::AutoCorrect,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for tracing::Level {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for rips_cli::logging::LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
