//! 分页重算驱动
//!
//! 依次处理按国家分组与跨国家分组两个范围：每页最多 `chunk_size` 个分组，
//! 逐组聚合、暂存、整页写入后再取下一页。取消标记只在页与页之间检查。

use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::aggregator::{Aggregate, calculate_stats};
use super::snapshot::SnapshotWriter;
use crate::config::{PipelineConfig, ReplaceStrategy};
use crate::errors::{HireStatsError, Result};
use crate::storage::backend::fetch_group_page;
use crate::storage::{GroupKey, GroupScope, SeaOrmStorage, StatsGroup};
use crate::system::CancelFlag;

/// 重算参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    pub chunk_size: u64,
    pub min_postings: u64,
    pub replace_strategy: ReplaceStrategy,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from(&PipelineConfig::default())
    }
}

impl From<&PipelineConfig> for PipelineSettings {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            chunk_size: config.chunk_size.max(1),
            min_postings: config.min_postings.max(1),
            replace_strategy: config.replace_strategy,
        }
    }
}

/// 一次重算的汇总信息
#[derive(Debug, Clone, Serialize)]
pub struct RecomputeReport {
    pub strategy: ReplaceStrategy,
    pub pages: u64,
    pub groups_seen: u64,
    pub groups_insufficient: u64,
    pub rows_cleared: u64,
    pub rows_written: u64,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RecomputeReport {
    fn new(strategy: ReplaceStrategy) -> Self {
        Self {
            strategy,
            pages: 0,
            groups_seen: 0,
            groups_insufficient: 0,
            rows_cleared: 0,
            rows_written: 0,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn elapsed_ms(&self) -> i64 {
        let end = self.finished_at.unwrap_or_else(Utc::now);
        (end - self.started_at).num_milliseconds().max(0)
    }
}

pub struct RecomputeDriver {
    settings: PipelineSettings,
    cancel: CancelFlag,
}

impl RecomputeDriver {
    pub fn new(settings: PipelineSettings, cancel: CancelFlag) -> Self {
        Self { settings, cancel }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// 执行一次完整重算
    ///
    /// - `Transactional`: 外层事务包裹清表与全部写入，失败回滚，旧快照保持不变
    /// - `Incremental`: 清表立即提交，每页单独提交，失败时仅回滚当前页
    pub async fn run(&self, db: &DatabaseConnection) -> Result<RecomputeReport> {
        let mut report = RecomputeReport::new(self.settings.replace_strategy);
        info!(
            "Recomputing days-to-hire stats (strategy: {}, chunk_size: {}, min_postings: {})",
            self.settings.replace_strategy, self.settings.chunk_size, self.settings.min_postings
        );

        match self.settings.replace_strategy {
            ReplaceStrategy::Transactional => {
                let txn = db.begin().await.map_err(|e| {
                    HireStatsError::database_operation(format!("开始事务失败: {}", e))
                })?;

                if let Err(e) = self.rebuild(&txn, &mut report).await {
                    error!("Recompute failed, rolling back: {}", e);
                    if let Err(rollback_err) = txn.rollback().await {
                        error!("Rollback failed: {}", rollback_err);
                    }
                    return Err(e);
                }

                txn.commit().await.map_err(|e| {
                    HireStatsError::database_operation(format!("提交事务失败: {}", e))
                })?;
            }
            ReplaceStrategy::Incremental => {
                if let Err(e) = self.rebuild(db, &mut report).await {
                    error!(
                        "Recompute failed after {} committed rows; stats table is partially rebuilt: {}",
                        report.rows_written, e
                    );
                    return Err(e);
                }
            }
        }

        report.finished_at = Some(Utc::now());
        info!(
            "Recompute finished: {} rows written from {} groups ({} insufficient) in {} pages, {} ms",
            report.rows_written,
            report.groups_seen,
            report.groups_insufficient,
            report.pages,
            report.elapsed_ms()
        );
        Ok(report)
    }

    async fn rebuild<C>(&self, db: &C, report: &mut RecomputeReport) -> Result<()>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let mut writer = SnapshotWriter::new(db);

        report.rows_cleared = writer
            .clear()
            .await
            .map_err(|e| HireStatsError::database_operation(format!("清空统计表失败: {}", e)))?;
        debug!("Cleared {} previous stats rows", report.rows_cleared);

        for scope in [GroupScope::ByCountry, GroupScope::Global] {
            self.process_scope(db, &mut writer, scope, report).await?;
        }

        Ok(())
    }

    async fn process_scope<C>(
        &self,
        db: &C,
        writer: &mut SnapshotWriter<'_, C>,
        scope: GroupScope,
        report: &mut RecomputeReport,
    ) -> Result<()>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let chunk_size = self.settings.chunk_size;
        let min_postings = self.settings.min_postings;
        let mut cursor: Option<GroupKey> = None;

        loop {
            if self.cancel.is_cancelled() {
                warn!(
                    "Recompute cancelled during {} scope after {} pages",
                    scope.as_str(),
                    report.pages
                );
                return Err(HireStatsError::cancelled(format!(
                    "recompute cancelled after {} pages",
                    report.pages
                )));
            }

            let page = fetch_group_page(db, scope, cursor.as_ref(), chunk_size, min_postings)
                .await
                .map_err(|e| {
                    HireStatsError::database_operation(format!(
                        "提取 {} 分组失败: {}",
                        scope.as_str(),
                        e
                    ))
                })?;

            if page.is_empty() {
                break;
            }

            let page_len = page.len() as u64;
            report.pages += 1;

            for StatsGroup { key, samples } in page {
                report.groups_seen += 1;
                match calculate_stats(&samples, min_postings as usize) {
                    Aggregate::Stats(stats) => writer.stage(key.clone(), stats),
                    Aggregate::InsufficientData => report.groups_insufficient += 1,
                }
                cursor = Some(key);
            }

            let staged = writer.staged_len();
            let written = writer.flush().await.map_err(|e| {
                HireStatsError::database_operation(format!("写入统计失败: {}", e))
            })?;
            report.rows_written += written;

            debug!(
                "[{}] page {}: {} groups, {} staged, {} written",
                scope.as_str(),
                report.pages,
                page_len,
                staged,
                written
            );

            if page_len < chunk_size {
                break;
            }
        }

        Ok(())
    }
}

/// 批处理入口：用配置的参数对给定存储执行一次完整重算
pub async fn recompute_stats(
    storage: &SeaOrmStorage,
    settings: PipelineSettings,
    cancel: CancelFlag,
) -> Result<RecomputeReport> {
    RecomputeDriver::new(settings, cancel)
        .run(storage.get_db())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_config_clamps_zero_values() {
        let config = PipelineConfig {
            chunk_size: 0,
            min_postings: 0,
            replace_strategy: ReplaceStrategy::Incremental,
        };
        let settings = PipelineSettings::from(&config);
        assert_eq!(settings.chunk_size, 1);
        assert_eq!(settings.min_postings, 1);
        assert_eq!(settings.replace_strategy, ReplaceStrategy::Incremental);
    }

    #[test]
    fn test_default_settings() {
        let settings = PipelineSettings::default();
        assert_eq!(settings.chunk_size, 1000);
        assert_eq!(settings.min_postings, 5);
        assert_eq!(settings.replace_strategy, ReplaceStrategy::Transactional);
    }

    #[test]
    fn test_report_elapsed_is_non_negative() {
        let mut report = RecomputeReport::new(ReplaceStrategy::Transactional);
        report.finished_at = Some(report.started_at);
        assert_eq!(report.elapsed_ms(), 0);
    }
}
