//! CLI argument parsing for opcost

use crate::estimate::BinStrategy;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for the printed lookup table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned two-column table (default)
    #[default]
    Text,
    /// JSON object keyed by operation
    Json,
    /// CSV for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "opcost")]
#[command(version)]
#[command(
    about = "Per-opcode instruction cost estimation from benchmark logs",
    long_about = None
)]
pub struct Cli {
    /// Load analysis settings from a TOML file
    #[arg(long = "config", value_name = "TOML", global = true)]
    pub config: Option<PathBuf>,

    /// Histogram bin-count rule (overrides the config file)
    #[arg(long = "bins", value_enum, value_name = "RULE", global = true)]
    pub bins: Option<BinStrategy>,

    /// Enable debug tracing output (to stderr)
    #[arg(long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Aggregate every operation into a lookup table and write it as JSON
    Lut {
        /// Measurement log
        #[arg(default_value = "results.csv")]
        input: PathBuf,

        /// Lookup table destination
        #[arg(default_value = "lut.json")]
        output: PathBuf,

        /// Format of the table printed to stdout
        #[arg(long = "format", value_enum, default_value = "text")]
        format: OutputFormat,

        /// Drop samples outside the configured quantile range first
        #[arg(long = "trim")]
        trim: bool,

        /// Restrict to operations (e.g. ADD,MUL or re:^PUSH or !SSTORE)
        #[arg(long = "filter", value_name = "EXPR")]
        filter: Option<String>,
    },

    /// Fit fixed and per-unit cost of a size-dependent operation
    Fit {
        /// Operation to fit
        opcode: String,

        /// Measurement log
        #[arg(default_value = "results.csv")]
        input: PathBuf,

        /// Largest input size included in the fit
        #[arg(long = "max-input-size", value_name = "N")]
        max_input_size: Option<u64>,

        /// Print the fitted points and r²
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write a histogram facet report of each operation's cost
    PlotDist {
        /// Measurement log
        #[arg(default_value = "results.csv")]
        input: PathBuf,

        /// Report destination
        #[arg(long = "out", default_value = "distribution.html")]
        out: PathBuf,

        /// Restrict to operations
        #[arg(long = "filter", value_name = "EXPR")]
        filter: Option<String>,

        /// Facets per row
        #[arg(long = "columns", value_name = "N")]
        columns: Option<usize>,
    },

    /// Write a cost-vs-input-size facet report of sized operations
    PlotScaling {
        /// Measurement log
        #[arg(default_value = "results.csv")]
        input: PathBuf,

        /// Report destination
        #[arg(long = "out", default_value = "scaling.html")]
        out: PathBuf,

        /// Restrict to operations
        #[arg(long = "filter", value_name = "EXPR")]
        filter: Option<String>,

        /// Facets per row
        #[arg(long = "columns", value_name = "N")]
        columns: Option<usize>,
    },
}
