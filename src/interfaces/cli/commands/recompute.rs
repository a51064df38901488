//! Recompute command

use colored::Colorize;
use std::sync::Arc;
use strum::EnumMessage;

use crate::config::{ReplaceStrategy, get_config};
use crate::interfaces::cli::CliError;
use crate::pipeline::{PipelineSettings, recompute_stats};
use crate::storage::SeaOrmStorage;
use crate::system::CancelFlag;

/// 命令行覆盖项（仅对本次运行生效）
#[derive(Debug, Clone, Copy, Default)]
pub struct RecomputeOverrides {
    pub chunk_size: Option<u64>,
    pub min_postings: Option<u64>,
    pub strategy: Option<ReplaceStrategy>,
}

impl RecomputeOverrides {
    pub fn apply(self, mut settings: PipelineSettings) -> PipelineSettings {
        if let Some(chunk_size) = self.chunk_size {
            settings.chunk_size = chunk_size.max(1);
        }
        if let Some(min_postings) = self.min_postings {
            settings.min_postings = min_postings.max(1);
        }
        if let Some(strategy) = self.strategy {
            settings.replace_strategy = strategy;
        }
        settings
    }
}

pub async fn recompute(
    storage: Arc<SeaOrmStorage>,
    overrides: RecomputeOverrides,
) -> Result<(), CliError> {
    let config = get_config();
    let settings = overrides.apply(PipelineSettings::from(&config.pipeline));

    let cancel = CancelFlag::new();
    let signal_task = cancel.cancel_on_ctrl_c();

    println!(
        "{} strategy={} chunk_size={} min_postings={}",
        "Recomputing days-to-hire stats:".bold().yellow(),
        settings.replace_strategy.to_string().cyan(),
        settings.chunk_size.to_string().cyan(),
        settings.min_postings.to_string().cyan()
    );
    if let Some(description) = settings.replace_strategy.get_message() {
        println!("  {}", description.dimmed());
    }

    let result = recompute_stats(&storage, settings, cancel).await;
    signal_task.abort();
    let report = result?;

    println!(
        "{} {} rows written ({} groups, {} below threshold) in {} pages, {} ms",
        "✓".bold().green(),
        report.rows_written.to_string().green(),
        report.groups_seen,
        report.groups_insufficient,
        report.pages,
        report.elapsed_ms()
    );
    Ok(())
}
