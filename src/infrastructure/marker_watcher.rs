//! 完成标记监视器 - 基础设施层
//!
//! 阶段之间唯一的同步手段：上游写完全部产物后才写标记文件，
//! 下游只判断标记是否存在，不解析其内容。

use crate::error::{AppResult, SyncError};
use std::path::Path;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

/// 标记监视器
///
/// 固定间隔轮询标记文件是否存在。
/// - 配置了超时：超时后返回 `SyncError::UpstreamNotReady`
/// - 未配置超时：无限等待
/// - 关闭信号变为 true：返回 `SyncError::Cancelled`
#[derive(Debug, Clone)]
pub struct MarkerWatcher {
    poll_interval: Duration,
    timeout: Option<Duration>,
    shutdown: watch::Receiver<bool>,
}

impl MarkerWatcher {
    pub fn new(
        poll_interval: Duration,
        timeout: Option<Duration>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            poll_interval,
            timeout,
            shutdown,
        }
    }

    /// 等待标记出现，返回实际等待时长
    pub async fn wait(&self, marker: &Path) -> AppResult<Duration> {
        let started = Instant::now();
        let mut shutdown = self.shutdown.clone();
        let mut announced = false;

        loop {
            if *shutdown.borrow() {
                return Err(SyncError::Cancelled {
                    marker: marker.to_path_buf(),
                }
                .into());
            }

            if marker_exists(marker).await {
                let waited = started.elapsed();
                info!("✓ 检测到标记 {} (等待 {:?})", marker.display(), waited);
                return Ok(waited);
            }

            if !announced {
                info!("⏳ 等待标记 {} ...", marker.display());
                announced = true;
            }

            let mut nap = self.poll_interval;
            if let Some(timeout) = self.timeout {
                let waited = started.elapsed();
                if waited >= timeout {
                    return Err(SyncError::UpstreamNotReady {
                        marker: marker.to_path_buf(),
                        waited,
                    }
                    .into());
                }
                nap = nap.min(timeout - waited);
            }

            debug!("标记尚未出现，{:?} 后重试", nap);
            tokio::select! {
                _ = sleep(nap) => {}
                changed = shutdown.changed() => {
                    // 发送端被丢弃后不再可能收到关闭信号，退化为纯轮询
                    if changed.is_err() {
                        sleep(nap).await;
                    }
                }
            }
        }
    }
}

async fn marker_exists(marker: &Path) -> bool {
    tokio::fs::try_exists(marker).await.unwrap_or(false)
}
