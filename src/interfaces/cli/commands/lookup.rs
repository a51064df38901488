//! Lookup stats command

use colored::Colorize;
use std::sync::Arc;

use crate::interfaces::cli::CliError;
use crate::services::{LookupOutcome, StatsQuery, StatsService};
use crate::storage::SeaOrmStorage;

pub async fn lookup_stats(
    storage: Arc<SeaOrmStorage>,
    standard_job_id: String,
    country: Option<String>,
) -> Result<(), CliError> {
    let query = StatsQuery::new(standard_job_id, country);
    if query.standard_job_id.is_empty() {
        return Err(CliError::ParseError(
            "standard_job_id must not be empty".to_string(),
        ));
    }

    let service = StatsService::new(storage);
    let scope = query.country_code.as_deref().unwrap_or("all countries");

    match service.lookup(&query).await {
        LookupOutcome::Found(stats) => {
            println!(
                "{} {} ({})",
                "Days to hire:".bold().green(),
                stats.standard_job_id.cyan(),
                scope.blue()
            );
            println!("  min: {}", format!("{:.2}", stats.min_days).green());
            println!("  avg: {}", format!("{:.2}", stats.avg_days).green());
            println!("  max: {}", format!("{:.2}", stats.max_days).green());
            println!(
                "  {}",
                format!("postings: {}", stats.job_postings_number).dimmed()
            );
            Ok(())
        }
        LookupOutcome::NotFound => {
            println!(
                "{} No statistics for {} ({})",
                "ℹ".bold().blue(),
                query.standard_job_id.cyan(),
                scope
            );
            Ok(())
        }
        LookupOutcome::Failed(cause) => Err(CliError::StorageError(cause)),
    }
}
