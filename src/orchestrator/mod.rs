//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责阶段生命周期与并发调度，是整个系统的"指挥中心"。
//!
//! ### `processor` - 处理阶段
//! - 等待抓取完成标记
//! - 扫描原始 HTML（按文件名排序）
//! - 控制并发数量（Semaphore），分批处理
//! - 写处理完成标记
//!
//! ### `analyzer` - 分析阶段
//! - 等待处理完成标记
//! - 加载语料、聚合统计、两两相似度
//! - 写最终报告
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator (处理 Vec<Document>，持有并发与同步资源)
//!     ↓
//! workflow::DocumentFlow (处理单篇文档)
//!     ↓
//! services (能力层：strip / stats / frequency / similarity / readability)
//!     ↓
//! infrastructure (基础设施：fs_store / MarkerWatcher)
//! ```
//!
//! 两个阶段之间不直接通信，唯一的交接是状态目录中的标记文件。

pub mod analyzer;
pub mod processor;

pub use analyzer::Analyzer;
pub use processor::{ProcessSummary, Processor};

use tokio::task::JoinHandle;

/// 中止尚未等待的任务
///
/// 严格模式提前返回时调用：阶段失败后，未等待的任务不得继续写文件。
fn abort_pending<T>(pending: impl IntoIterator<Item = JoinHandle<T>>) {
    for handle in pending {
        handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_abort_pending_cancels_running_tasks() {
        let handles: Vec<JoinHandle<()>> = (0..3)
            .map(|_| tokio::spawn(tokio::time::sleep(Duration::from_secs(60))))
            .collect();
        let abort_handles: Vec<_> = handles.iter().map(|h| h.abort_handle()).collect();

        abort_pending(handles);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(abort_handles.iter().all(|h| h.is_finished()));
    }
}
