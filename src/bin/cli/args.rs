//! CLI Argument Structures and Configuration
//!
//! This module contains all CLI argument definitions, command structures,
//! and value enums used by the relate binary.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use relate_rs::io::reports::ReportFormat;
use relate_rs::{MatrixKind, MetricKind, ShingleMode, ShingleProfile};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Pairwise text similarity and distance matrices
#[derive(Parser)]
#[command(name = "relate")]
#[command(version = VERSION)]
#[command(about = "Pairwise similarity and distance matrices for a set of texts")]
#[command(long_about = "
Compare every text against every other one with a shingle-set or
character-level metric and print the resulting square matrix.

Common Usage:

  # Jaccard similarity over 4-character shingles
  relate compare texts/*.txt

  # Standardized Levenshtein distance as CSV
  relate compare --metric levenshtein --matrix standardized-distance --format csv a.txt b.txt c.txt

  # Word bigrams with explicit labels
  relate compare --mode words -k 2 --labels first,second,third a.txt b.txt c.txt

  # Score a single pair
  relate score manuscript autoscript --metric hamming
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a pairwise matrix over text files
    Compare(Box<CompareArgs>),

    /// Score two literal strings with one metric
    Score(ScoreArgs),

    /// Print default configuration in YAML format
    #[command(name = "print-default-config")]
    PrintDefaultConfig,

    /// Validate a relate configuration file
    #[command(name = "validate-config")]
    ValidateConfig(ValidateConfigArgs),

    /// List supported metrics and matrix kinds
    #[command(name = "list-metrics")]
    ListMetrics,
}

/// Metric and tokenization settings shared by `compare` and `score`
#[derive(Args, Debug, Clone, Default)]
pub struct MetricArgs {
    /// Configuration file (YAML); flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Pairwise similarity metric
    #[arg(short, long, value_enum)]
    pub metric: Option<MetricArg>,

    /// Shingle length k
    #[arg(short = 'k', long)]
    pub shingle_length: Option<NonZeroUsize>,

    /// Shingle unit
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Preset shingle length for the chosen mode (ignored when -k is given)
    #[arg(long, value_enum)]
    pub profile: Option<ProfileArg>,

    /// Characters Hamming skips when aligning positions
    #[arg(long)]
    pub ignore: Option<String>,

    /// Compute matrix rows on a single thread
    #[arg(long)]
    pub sequential: bool,
}

/// Arguments for the `compare` command
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Text files to compare, in row/column order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Comma-separated labels, one per file (defaults to file stems)
    #[arg(short, long, value_delimiter = ',')]
    pub labels: Option<Vec<String>>,

    /// Matrix to build from the pairwise scores
    #[arg(long, value_enum)]
    pub matrix: Option<MatrixArg>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: FormatArg,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    #[command(flatten)]
    pub metric: MetricArgs,
}

/// Arguments for the `score` command
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// First string
    pub a: String,

    /// Second string
    pub b: String,

    #[command(flatten)]
    pub metric: MetricArgs,
}

/// Arguments for the `validate-config` command
#[derive(Args, Debug)]
pub struct ValidateConfigArgs {
    /// Configuration file to validate
    pub config: PathBuf,

    /// Show detailed configuration breakdown
    #[arg(long)]
    pub detailed: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MetricArg {
    Jaccard,
    SorensenDice,
    Overlap,
    Hamming,
    Levenshtein,
}

impl From<MetricArg> for MetricKind {
    fn from(value: MetricArg) -> Self {
        match value {
            MetricArg::Jaccard => Self::Jaccard,
            MetricArg::SorensenDice => Self::SorensenDice,
            MetricArg::Overlap => Self::Overlap,
            MetricArg::Hamming => Self::Hamming,
            MetricArg::Levenshtein => Self::Levenshtein,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MatrixArg {
    Similarity,
    Distance,
    StandardizedSimilarity,
    StandardizedDistance,
}

impl From<MatrixArg> for MatrixKind {
    fn from(value: MatrixArg) -> Self {
        match value {
            MatrixArg::Similarity => Self::Similarity,
            MatrixArg::Distance => Self::Distance,
            MatrixArg::StandardizedSimilarity => Self::StandardizedSimilarity,
            MatrixArg::StandardizedDistance => Self::StandardizedDistance,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Characters,
    Words,
}

impl From<ModeArg> for ShingleMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Characters => Self::Characters,
            ModeArg::Words => Self::Words,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProfileArg {
    /// 3 characters or 2 words
    Fine,
    /// 4 characters or 3 words
    Coarse,
}

impl From<ProfileArg> for ShingleProfile {
    fn from(value: ProfileArg) -> Self {
        match value {
            ProfileArg::Fine => Self::Fine,
            ProfileArg::Coarse => Self::Coarse,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    /// Human-readable table
    Table,
    /// JSON document
    Json,
    /// YAML document
    Yaml,
    /// CSV spreadsheet data
    Csv,
}

impl From<FormatArg> for ReportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Table => Self::Table,
            FormatArg::Json => Self::Json,
            FormatArg::Yaml => Self::Yaml,
            FormatArg::Csv => Self::Csv,
        }
    }
}
