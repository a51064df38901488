//! Snapshot replacement
//!
//! The writer clears the stats table once per run, stages rows produced by
//! the aggregator, and flushes them page by page. Each flush runs in its own
//! transaction on whatever connection the writer was given: on a plain
//! connection that is a real commit (rows become visible immediately), on an
//! outer transaction it is a savepoint (rows become visible at the outer
//! commit).

use sea_orm::{ConnectionTrait, DbErr, TransactionSession, TransactionTrait};
use tracing::trace;

use super::aggregator::TrimmedStats;
use crate::storage::backend::{clear_stats, insert_stats_batch};
use crate::storage::{DaysToHireStats, GroupKey};

pub struct SnapshotWriter<'a, C> {
    db: &'a C,
    staged: Vec<DaysToHireStats>,
    written: u64,
}

impl<'a, C: ConnectionTrait + TransactionTrait> SnapshotWriter<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self {
            db,
            staged: Vec::new(),
            written: 0,
        }
    }

    /// 清空整个统计表，返回删除行数
    pub async fn clear(&self) -> Result<u64, DbErr> {
        clear_stats(self.db).await
    }

    pub fn stage(&mut self, key: GroupKey, stats: TrimmedStats) {
        self.staged.push(DaysToHireStats {
            standard_job_id: key.standard_job_id,
            country_code: key.country_code,
            min_days: stats.min_days,
            avg_days: stats.avg_days,
            max_days: stats.max_days,
            job_postings_number: stats.job_postings_number as i64,
        });
    }

    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }

    /// 写入所有暂存行并提交，返回本次写入行数
    ///
    /// 失败时本次暂存的行全部丢弃（事务随 drop 回滚）。
    pub async fn flush(&mut self) -> Result<u64, DbErr> {
        if self.staged.is_empty() {
            return Ok(0);
        }

        let rows = std::mem::take(&mut self.staged);
        let txn = self.db.begin().await?;
        let written = insert_stats_batch(&txn, &rows).await?;
        txn.commit().await?;

        self.written += written;
        trace!("Flushed {} stats rows ({} total)", written, self.written);
        Ok(written)
    }
}
