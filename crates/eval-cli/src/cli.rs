//! CLI argument definitions for story-eval.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use eval_model::{ExperimentKind, ModelId};

#[derive(Parser)]
#[command(
    name = "story-eval",
    version,
    about = "Evaluate LLM class and association extraction from user stories",
    long_about = "Extract the final class or association lists from model transcripts and\n\
                  score them against per-dataset gold and silver standards.\n\n\
                  Reports precision, recall and F-0.5/F-1/F-2 per round for the mandatory\n\
                  and including-optional views."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract final lists from transcripts (R<n>.txt) into round files (round<n>.csv).
    Extract(ExtractArgs),

    /// Score round files against a dataset's standards and write reports.
    Evaluate(EvaluateArgs),

    /// Compare stored runs across models and datasets.
    Compare(CompareArgs),

    /// List the datasets available in the standards directory.
    Datasets(DatasetsArgs),
}

#[derive(Parser)]
pub struct ExtractArgs {
    /// What the transcripts list.
    #[arg(long = "kind", value_enum)]
    pub kind: KindArg,

    /// Model that produced the transcripts.
    #[arg(long = "model", value_enum, ignore_case = true)]
    pub model: ModelArg,

    /// Folder containing R<n>.txt transcripts.
    #[arg(long = "input", value_name = "DIR")]
    pub input: PathBuf,

    /// Folder for the extracted round<n>.csv files.
    #[arg(long = "output", value_name = "DIR")]
    pub output: PathBuf,
}

#[derive(Parser)]
pub struct EvaluateArgs {
    #[arg(long = "kind", value_enum)]
    pub kind: KindArg,

    #[arg(long = "model", value_enum, ignore_case = true)]
    pub model: ModelArg,

    /// Dataset key (e.g. camperplus, fish&chips).
    #[arg(long = "dataset")]
    pub dataset: String,

    /// Folder containing round<n>.csv files.
    #[arg(long = "input", value_name = "DIR")]
    pub input: PathBuf,

    /// Output root; reports go to <DIR>/<kind>/<model>/<dataset>.
    #[arg(long = "output", value_name = "DIR")]
    pub output: PathBuf,

    /// Standards directory (default: STORY_EVAL_STANDARDS_DIR or the bundled standards).
    #[arg(long = "standards-dir", value_name = "DIR")]
    pub standards_dir: Option<PathBuf>,

    /// Score and print the summary without writing report files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct CompareArgs {
    #[arg(long = "kind", value_enum)]
    pub kind: KindArg,

    /// Output root previously passed to `evaluate --output`.
    #[arg(long = "output-root", value_name = "DIR")]
    pub output_root: PathBuf,
}

#[derive(Parser)]
pub struct DatasetsArgs {
    #[arg(long = "standards-dir", value_name = "DIR")]
    pub standards_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Class,
    Association,
}

impl From<KindArg> for ExperimentKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Class => ExperimentKind::Class,
            KindArg::Association => ExperimentKind::Association,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModelArg {
    #[value(name = "gpt-o1")]
    GptO1,
    #[value(name = "llama3-8b")]
    Llama3_8b,
    #[value(name = "qwen-14b")]
    Qwen14b,
}

impl From<ModelArg> for ModelId {
    fn from(value: ModelArg) -> Self {
        match value {
            ModelArg::GptO1 => ModelId::GptO1,
            ModelArg::Llama3_8b => ModelId::Llama3_8b,
            ModelArg::Qwen14b => ModelId::Qwen14b,
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
