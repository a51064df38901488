use crate::services::StatsService;
use crate::storage::{SeaOrmStorage, StorageFactory};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub stats_service: Arc<StatsService>,
}

/// 准备服务器启动的上下文：存储连接、迁移与查询服务
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!(
        "Using storage backend: {}",
        storage.get_backend_config().storage_type
    );

    let stats_rows = storage
        .count_stats()
        .await
        .context("Failed to read stats snapshot")?;
    if stats_rows == 0 {
        warn!("Stats snapshot is empty; run `hirestats recompute` to populate it");
    } else {
        info!("Stats snapshot holds {} rows", stats_rows);
    }

    let stats_service = Arc::new(StatsService::new(storage.clone()));

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        storage,
        stats_service,
    })
}
