//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for hirestats using clap's derive macros.

use clap::{Parser, Subcommand};

use crate::config::ReplaceStrategy;

/// hirestats - days-to-hire statistics service
#[derive(Parser)]
#[command(name = "hirestats")]
#[command(version)]
#[command(about = "Outlier-trimmed days-to-hire statistics: batch recompute and lookup API", long_about = None)]
pub struct Cli {
    /// Path to config file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP lookup server (default)
    Serve,

    /// Recompute the days-to-hire stats snapshot
    Recompute {
        /// Override pipeline.chunk_size for this run
        #[arg(long)]
        chunk_size: Option<u64>,

        /// Override pipeline.min_postings for this run
        #[arg(long)]
        min_postings: Option<u64>,

        /// Override pipeline.replace_strategy (transactional, incremental)
        #[arg(long)]
        strategy: Option<ReplaceStrategy>,
    },

    /// Import job postings from a CSV file
    Import {
        /// Input file path
        file_path: String,
    },

    /// Export the stats snapshot to a CSV file
    Export {
        /// Output file path (default: days_to_hire_stats_<timestamp>.csv)
        file_path: Option<String>,
    },

    /// Look up stats for one job (and optionally one country)
    Lookup {
        standard_job_id: String,

        /// Country code; omit for the cross-country aggregate
        #[arg(long)]
        country: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}
