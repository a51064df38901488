//! 快照读取重试
//!
//! 查询接口（`find_stats` / `count_stats`）与重算流水线并发运行。SQLite 下事务式重算
//! 提交时持有写锁，读者可能短暂收到 `SQLITE_BUSY`；连接池耗尽或连接断开同样是瞬时的。
//! 只对这两类错误做指数退避重试，其余错误直接返回。重算流水线本身不重试。

use sea_orm::DbErr;
use sea_orm::error::RuntimeErr;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// SQLite 主错误码：SQLITE_BUSY / SQLITE_LOCKED
const SQLITE_LOCK_CODES: [&str; 2] = ["5", "6"];

/// 判断读取错误是否值得重试
pub fn is_transient_read_error(err: &DbErr) -> bool {
    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => true,
        DbErr::Query(runtime_err) | DbErr::Exec(runtime_err) => is_snapshot_lock(runtime_err),
        _ => false,
    }
}

/// 快照表被写者锁住
fn is_snapshot_lock(err: &RuntimeErr) -> bool {
    match err {
        RuntimeErr::SqlxError(sqlx_err) => {
            let code = sqlx_err
                .as_database_error()
                .and_then(|db_err| db_err.code().map(|c| c.into_owned()));
            match code {
                Some(code) => SQLITE_LOCK_CODES.contains(&code.as_str()),
                None => mentions_lock(&sqlx_err.to_string()),
            }
        }
        RuntimeErr::Internal(msg) => mentions_lock(msg),
        #[allow(unreachable_patterns)]
        _ => false,
    }
}

fn mentions_lock(msg: &str) -> bool {
    let msg = msg.to_lowercase();
    msg.contains("database is locked") || msg.contains("database table is locked")
}

/// 重试参数，来自 `[database]` 配置段
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl RetryConfig {
    pub fn from_database_config(config: &crate::config::DatabaseConfig) -> Self {
        Self {
            max_retries: config.retry_count,
            base_delay_ms: config.retry_base_delay_ms,
            max_delay_ms: config.retry_max_delay_ms,
        }
    }

    /// 第 `attempt` 次重试前的等待时间（attempt 从 1 开始），附带 0-25% 抖动
    fn delay_for(&self, attempt: u32) -> Duration {
        use rand::RngExt;
        let exp = self
            .base_delay_ms
            .saturating_mul(1u64 << attempt.saturating_sub(1).min(32));
        let capped = exp.min(self.max_delay_ms);
        let jitter = rand::rng().random_range(0..=capped / 4);
        Duration::from_millis(capped.saturating_add(jitter))
    }
}

/// 执行一次快照读取，瞬时错误按退避策略重试
pub async fn with_retry<T, F, Fut>(
    operation_name: &str,
    config: RetryConfig,
    mut operation: F,
) -> Result<T, DbErr>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbErr>>,
{
    let mut attempt = 0;
    loop {
        let err = match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    debug!("{} succeeded after {} retries", operation_name, attempt);
                }
                return Ok(value);
            }
            Err(err) => err,
        };

        if attempt >= config.max_retries || !is_transient_read_error(&err) {
            return Err(err);
        }

        attempt += 1;
        let delay = config.delay_for(attempt);
        warn!(
            "{} failed ({}), retry {}/{} in {:?}",
            operation_name, err, attempt, config.max_retries, delay
        );
        sleep(delay).await;
    }
}
