//! CLI interface module
//!
//! This module provides command-line interface functionality for hirestats.

pub mod commands;

use crate::cli::{Commands, ConfigCommands};
use crate::storage::{SeaOrmStorage, StorageFactory};
use commands::{
    config_generate, export_stats, import_postings, lookup_stats, recompute, RecomputeOverrides,
};
use std::fmt;
use std::sync::Arc;

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::HireStatsError> for CliError {
    fn from(err: crate::errors::HireStatsError) -> Self {
        match err {
            crate::errors::HireStatsError::Validation(msg) => CliError::ParseError(msg),
            other => CliError::StorageError(other.to_string()),
        }
    }
}

/// 打开存储；只有需要数据库的命令才调用
async fn open_storage() -> Result<Arc<SeaOrmStorage>, CliError> {
    StorageFactory::create()
        .await
        .map_err(|e| CliError::StorageError(e.to_string()))
}

/// Run a CLI command from clap-parsed input
///
/// `Serve` is handled by the server runtime mode, not here.
pub async fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    match cmd {
        // Generate doesn't need DB connection
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => config_generate(output_path, force).await,

        Commands::Recompute {
            chunk_size,
            min_postings,
            strategy,
        } => {
            let overrides = RecomputeOverrides {
                chunk_size,
                min_postings,
                strategy,
            };
            recompute(open_storage().await?, overrides).await
        }

        Commands::Import { file_path } => import_postings(open_storage().await?, file_path).await,

        Commands::Export { file_path } => export_stats(open_storage().await?, file_path).await,

        Commands::Lookup {
            standard_job_id,
            country,
        } => lookup_stats(open_storage().await?, standard_job_id, country).await,

        Commands::Serve => Err(CliError::CommandError(
            "serve is handled by the server runtime".to_string(),
        )),
    }
}
