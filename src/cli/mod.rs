use clap::{ Parser, Subcommand, ValueEnum };
use std::path::PathBuf;

pub mod commands;
pub mod ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "qaforge",
    about = "Generate and audit QA test cases from free-text requirements",
    version,
    author,
    long_about = None
)]
pub struct QaCli {
    /// Sets the log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    /// Path to configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Reference corpus (YAML list of {text, metadata}); overrides the config
    #[arg(long, global = true)]
    pub corpus: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub output_format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Route, retrieve and draft a test case for a requirement
    Generate {
        /// The requirement or question; prompted for when omitted
        query: Option<String>,
    },

    /// Draft a test plan and refine it through architect/auditor review
    Review {
        /// The requirement; prompted for when omitted
        requirement: Option<String>,
    },

    /// Score an artifact for faithfulness and relevance
    Evaluate {
        /// Original query
        #[arg(short, long)]
        query: String,

        /// Retrieval context the output should be faithful to
        #[arg(short = 'x', long)]
        context: String,

        /// Generated output to score
        #[arg(short, long)]
        output: String,

        /// Also score answer and contextual relevance
        #[arg(long, default_value = "false")]
        all_metrics: bool,

        /// Pass threshold for every metric
        #[arg(short, long)]
        threshold: Option<f32>,
    },

    /// Run regression scenarios through the pipeline and score them
    Batch {
        /// YAML list of {input, expected_category}; built-in scenarios when omitted
        #[arg(short, long)]
        scenarios: Option<PathBuf>,

        /// Score against the retrieved document instead of the fixed reference text
        #[arg(long, default_value = "false")]
        retrieved_context: bool,
    },

    /// Check that the inference credentials are accepted
    Health,
}
