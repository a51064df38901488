//! Cooperative cancellation for long-running batch work
//!
//! The recompute driver checks the flag between pages; nothing is
//! interrupted mid-page.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::signal;
use tracing::{info, warn};

/// 可在多个任务间共享的取消标记
#[derive(Clone, Debug, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// 监听 Ctrl+C，收到后置位取消标记
    ///
    /// 返回的 JoinHandle 可在任务结束后 abort。
    pub fn cancel_on_ctrl_c(&self) -> tokio::task::JoinHandle<()> {
        let flag = self.clone();
        tokio::spawn(async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!("Cancellation requested, stopping after the current page");
                    flag.cancel();
                }
                Err(e) => {
                    warn!("Failed to listen for Ctrl+C: {}", e);
                }
            }
        })
    }
}
