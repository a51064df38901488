//! Mutation operations
//!
//! Snapshot writes are free functions over any `ConnectionTrait` so the
//! recompute driver can run them on a plain connection or inside a
//! transaction.

use sea_orm::{ConnectionTrait, DbErr, EntityTrait, TransactionTrait, sea_query::OnConflict};
use tracing::{debug, info};

use super::SeaOrmStorage;
use super::converters::{posting_to_active_model, stats_to_active_model};
use crate::errors::{HireStatsError, Result};
use crate::storage::{DaysToHireStats, JobPosting};

use migration::entities::{days_to_hire_stats, job_posting};

/// 单条 INSERT 的最大行数（SQLite 绑定参数上限约 32766）
const INSERT_BATCH_ROWS: usize = 500;

/// 清空统计快照，返回删除行数
pub async fn clear_stats<C: ConnectionTrait>(db: &C) -> std::result::Result<u64, DbErr> {
    let result = days_to_hire_stats::Entity::delete_many().exec(db).await?;
    debug!("Cleared {} stats rows", result.rows_affected);
    Ok(result.rows_affected)
}

/// 批量写入统计行（每行生成新的 id），返回写入行数
pub async fn insert_stats_batch<C: ConnectionTrait>(
    db: &C,
    rows: &[DaysToHireStats],
) -> std::result::Result<u64, DbErr> {
    let mut written = 0;
    for chunk in rows.chunks(INSERT_BATCH_ROWS) {
        let models: Vec<days_to_hire_stats::ActiveModel> =
            chunk.iter().map(stats_to_active_model).collect();
        written += days_to_hire_stats::Entity::insert_many(models)
            .exec_without_returning(db)
            .await?;
    }
    Ok(written)
}

impl SeaOrmStorage {
    /// 批量写入原始招聘记录（使用事务，id 冲突时覆盖）
    pub async fn insert_postings(&self, postings: &[JobPosting]) -> Result<u64> {
        if postings.is_empty() {
            return Ok(0);
        }

        let txn =
            self.db.begin().await.map_err(|e| {
                HireStatsError::database_operation(format!("开始事务失败: {}", e))
            })?;

        let mut written = 0;
        for chunk in postings.chunks(INSERT_BATCH_ROWS) {
            let models: Vec<job_posting::ActiveModel> =
                chunk.iter().map(posting_to_active_model).collect();

            written += job_posting::Entity::insert_many(models)
                .on_conflict(
                    OnConflict::column(job_posting::Column::Id)
                        .update_columns([
                            job_posting::Column::Title,
                            job_posting::Column::StandardJobId,
                            job_posting::Column::CountryCode,
                            job_posting::Column::DaysToHire,
                        ])
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await
                .map_err(|e| {
                    HireStatsError::database_operation(format!("批量插入招聘记录失败: {}", e))
                })?;
        }

        txn.commit()
            .await
            .map_err(|e| HireStatsError::database_operation(format!("提交事务失败: {}", e)))?;

        info!("Inserted {} job postings", written);
        Ok(written)
    }
}
