//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use drawaloud_fhir::ReflectionPlacement;

#[derive(Parser)]
#[command(
    name = "drawaloud",
    version,
    about = "Drawaloud - inspect prompt catalogs and export stored drawing sessions",
    long_about = "Inspect the prompt catalog and the responses of a guided drawing session.\n\n\
                  Stored responses can be exported as a FHIR QuestionnaireResponse document."
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

    /// Allow reflection text in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Settings file (default: settings.toml in the platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub sources: SourceArgs,
}

/// Overrides for where prompts and responses come from.
#[derive(Args)]
pub struct SourceArgs {
    /// Prompt catalog JSON file.
    #[arg(long = "catalog", value_name = "PATH", global = true)]
    pub catalog: Option<PathBuf>,

    /// Markdown file with prompt descriptions.
    #[arg(long = "descriptions", value_name = "PATH", global = true)]
    pub descriptions: Option<PathBuf>,

    /// Directory holding stored responses.
    #[arg(long = "store-dir", value_name = "DIR", global = true)]
    pub store_dir: Option<PathBuf>,

    /// Key the responses are stored under.
    #[arg(long = "store-key", value_name = "KEY", global = true)]
    pub store_key: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the prompts of the catalog.
    Prompts,

    /// Show the stage timeline of the stored session.
    Timeline(TimelineArgs),

    /// Report whether stored responses are absent, valid, or corrupt.
    Inspect,

    /// Export stored responses as a FHIR QuestionnaireResponse.
    Export(ExportArgs),
}

#[derive(Parser)]
pub struct TimelineArgs {
    /// Stage (1-based) to mark as current.
    #[arg(long = "current", value_name = "N")]
    pub current: Option<usize>,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Output file (default: ./questionnaire_response.json).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Where reflection text is placed in the document.
    #[arg(long = "reflection", value_enum)]
    pub reflection: Option<ReflectionArg>,

    /// Attach each prompt's canvas snapshot as an answer.
    #[arg(long = "include-canvas")]
    pub include_canvas: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReflectionArg {
    PerPrompt,
    SessionItem,
}

impl From<ReflectionArg> for ReflectionPlacement {
    fn from(value: ReflectionArg) -> Self {
        match value {
            ReflectionArg::PerPrompt => Self::PerPrompt,
            ReflectionArg::SessionItem => Self::SessionItem,
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
