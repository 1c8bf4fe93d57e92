//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "labsift",
    version,
    about = "Extract lab parameters from OCR text dumps of lab reports",
    long_about = "Extract lab parameters from OCR text dumps of lab reports.\n\n\
                  Each measurement line becomes a named, categorized parameter\n\
                  flagged against its reference range."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log debug details to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract parameters from one report. Several files are read as pages.
    Extract(ExtractArgs),

    /// Evaluate a value against a reference range.
    Check(CheckArgs),

    /// List the category taxonomy.
    Categories,
}

#[derive(Parser)]
pub struct ExtractArgs {
    /// Text dump(s) of the report, in page order.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Extractor config file (default: the user config file if present).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Measured value, e.g. "92" or "150/95".
    #[arg(long, allow_hyphen_values = true)]
    pub value: String,

    /// Reference range, e.g. "70-100" or "< 200".
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub range: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Json,
    Table,
}
