use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scrub")]
#[command(about = "Find and mask PII in CSV record payloads", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true, env = "SCRUB_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Redact a CSV file
    Scan {
        /// Input CSV with a record id and a payload column
        input: PathBuf,

        /// Output CSV (default from config: redacted_output.csv)
        output: Option<PathBuf>,

        /// Print per-category redaction counts
        #[arg(long)]
        summary: bool,
    },

    /// Scan a single payload and print the verdict
    Check {
        /// Payload text, e.g. '{"phone": "9876543210"}'
        payload: String,
    },

    /// Show the effective configuration
    Config,
}
