//! Import job postings / export stats snapshot

use colored::Colorize;
use std::path::Path;
use std::sync::Arc;

use crate::interfaces::cli::CliError;
use crate::storage::SeaOrmStorage;
use crate::utils::csv_handler;

pub async fn import_postings(storage: Arc<SeaOrmStorage>, file_path: String) -> Result<(), CliError> {
    if !Path::new(&file_path).exists() {
        return Err(CliError::CommandError(format!(
            "Import file not found: {}",
            file_path
        )));
    }

    let postings = csv_handler::import_postings(&file_path)?;
    if postings.is_empty() {
        println!("{} No job postings found in {}", "ℹ".bold().blue(), file_path.cyan());
        return Ok(());
    }

    let written = storage
        .insert_postings(&postings)
        .await
        .map_err(|e| CliError::StorageError(e.to_string()))?;

    println!(
        "{} Imported {} job postings from: {}",
        "✓".bold().green(),
        written.to_string().green(),
        file_path.cyan()
    );
    println!(
        "  {}",
        "Run `hirestats recompute` to refresh the stats snapshot".dimmed()
    );
    Ok(())
}

pub async fn export_stats(
    storage: Arc<SeaOrmStorage>,
    file_path: Option<String>,
) -> Result<(), CliError> {
    let rows = storage
        .load_all_stats()
        .await
        .map_err(|e| CliError::CommandError(format!("Failed to load stats: {}", e)))?;

    if rows.is_empty() {
        println!("{} Stats snapshot is empty", "ℹ".bold().blue());
        return Ok(());
    }

    let output_path = file_path.unwrap_or_else(csv_handler::generate_export_filename);
    csv_handler::export_stats(&rows, &output_path)
        .map_err(|e| CliError::CommandError(format!("Failed to export CSV: {}", e)))?;

    println!(
        "{} Exported {} stats rows to: {}",
        "✓".bold().green(),
        rows.len().to_string().green(),
        output_path.cyan()
    );
    Ok(())
}
