//! Stats lookup service
//!
//! Read-only access to the current days-to-hire snapshot. The outcome is an
//! explicit enum so the HTTP layer maps it without catching errors.

use std::sync::Arc;

use tracing::{debug, error};

use crate::storage::{DaysToHireStats, SeaOrmStorage};

/// 查询结果
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(DaysToHireStats),
    NotFound,
    /// 内部错误，携带文本原因
    Failed(String),
}

/// 查询参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsQuery {
    pub standard_job_id: String,
    /// None 表示跨国家汇总
    pub country_code: Option<String>,
}

impl StatsQuery {
    /// 规范化参数：去掉首尾空白，空字符串的 country_code 视为未提供
    pub fn new(standard_job_id: impl Into<String>, country_code: Option<String>) -> Self {
        Self {
            standard_job_id: standard_job_id.into().trim().to_string(),
            country_code: country_code
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
        }
    }
}

pub struct StatsService {
    storage: Arc<SeaOrmStorage>,
}

impl StatsService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn lookup(&self, query: &StatsQuery) -> LookupOutcome {
        match self
            .storage
            .find_stats(&query.standard_job_id, query.country_code.as_deref())
            .await
        {
            Ok(Some(stats)) => LookupOutcome::Found(stats),
            Ok(None) => {
                debug!(
                    "No stats for {} / {}",
                    query.standard_job_id,
                    query.country_code.as_deref().unwrap_or("*")
                );
                LookupOutcome::NotFound
            }
            Err(e) => {
                error!("Stats lookup failed: {}", e);
                LookupOutcome::Failed(e.message().to_string())
            }
        }
    }
}
