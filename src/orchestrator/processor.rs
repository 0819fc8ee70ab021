//! 处理阶段 - 编排层
//!
//! ## 职责
//!
//! 1. **等待上游**：轮询抓取完成标记，标记出现前不处理任何文档
//! 2. **扫描**：按文件名排序列出全部 `*.html`
//! 3. **并发控制**：使用 Semaphore 限制同时处理的文档数量，分批处理
//! 4. **有序汇总**：按提交顺序收集结果，输出顺序与文件名顺序一致
//! 5. **完成标记**：所有文档写完之后才写处理完成标记
//!
//! 单篇文档的细节委托给 `workflow::DocumentFlow`。

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{fs_store, MarkerWatcher};
use crate::models::{utc_timestamp, DocumentFailure, ProcessMarker};
use crate::services::HtmlStripper;
use crate::utils::logging;
use crate::workflow::{DocumentCtx, DocumentFlow, DocumentOutcome};
use super::abort_pending;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{watch, Semaphore};
use tracing::{info, warn};

/// 处理阶段结果
#[derive(Debug, Default)]
pub struct ProcessSummary {
    pub processed: Vec<PathBuf>,
    pub failed: Vec<DocumentFailure>,
    pub marker: PathBuf,
}

/// 处理阶段
pub struct Processor {
    config: Config,
    watcher: MarkerWatcher,
}

impl Processor {
    pub fn new(config: Config, shutdown: watch::Receiver<bool>) -> Self {
        let watcher = MarkerWatcher::new(config.poll_interval(), config.wait_timeout(), shutdown);
        Self { config, watcher }
    }

    /// 运行处理阶段
    pub async fn run(&self) -> AppResult<ProcessSummary> {
        logging::log_stage_startup("处理阶段", &self.config);

        // 等待抓取完成
        self.watcher.wait(&self.config.fetch_marker_path()).await?;

        fs_store::ensure_dir(&self.config.processed_dir).await?;
        let sources = fs_store::list_files_sorted(&self.config.raw_dir, "html").await?;
        info!("✓ 找到 {} 个 HTML 文件", sources.len());
        if sources.is_empty() {
            warn!("⚠️ 原始目录中没有 HTML 文件: {}", self.config.raw_dir.display());
        }

        let flow = DocumentFlow::new(
            Arc::new(HtmlStripper::new()?),
            self.config.processed_dir.clone(),
            self.config.verbose_logging,
        );
        let outcomes = self.process_all(&flow, sources).await?;

        let mut summary = ProcessSummary {
            marker: self.config.process_marker_path(),
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome {
                DocumentOutcome::Written { output } => summary.processed.push(output),
                DocumentOutcome::Failed(failure) => summary.failed.push(failure),
            }
        }

        self.write_marker(&summary).await?;
        logging::log_stage_complete("处理阶段", summary.processed.len(), summary.failed.len());

        Ok(summary)
    }

    /// 分批并发处理全部文档，结果按输入顺序返回
    async fn process_all(
        &self,
        flow: &DocumentFlow,
        sources: Vec<PathBuf>,
    ) -> AppResult<Vec<DocumentOutcome>> {
        let max_concurrent = self.config.max_concurrent_documents;
        let semaphore = Arc::new(Semaphore::new(max_concurrent));
        let total = sources.len();
        let mut outcomes = Vec::with_capacity(total);

        for batch_start in (0..total).step_by(max_concurrent) {
            let batch_end = (batch_start + max_concurrent).min(total);
            let batch_num = batch_start / max_concurrent + 1;
            let total_batches = total.div_ceil(max_concurrent);
            logging::log_batch_start(batch_num, total_batches, batch_start + 1, batch_end, total);

            let batch = &sources[batch_start..batch_end];
            let batch = self
                .process_batch(flow, batch, batch_start, total, semaphore.clone())
                .await?;

            let failed = batch
                .iter()
                .filter(|o| matches!(o, DocumentOutcome::Failed(_)))
                .count();
            logging::log_batch_complete(batch_num, batch.len() - failed, batch.len());
            outcomes.extend(batch);
        }

        Ok(outcomes)
    }

    /// 处理单个批次
    async fn process_batch(
        &self,
        flow: &DocumentFlow,
        batch: &[PathBuf],
        batch_start: usize,
        total: usize,
        semaphore: Arc<Semaphore>,
    ) -> AppResult<Vec<DocumentOutcome>> {
        let mut handles = Vec::with_capacity(batch.len());

        for (idx, path) in batch.iter().enumerate() {
            let ctx = DocumentCtx::new(batch_start + idx + 1, total, path.clone());
            let permit = semaphore.clone().acquire_owned().await?;
            let flow = flow.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                let result = flow.process(&ctx).await;
                (ctx, result)
            });
            handles.push(handle);
        }

        // 按提交顺序等待，保证结果顺序
        let mut outcomes = Vec::with_capacity(handles.len());
        let mut pending = handles.into_iter();
        while let Some(handle) = pending.next() {
            let (ctx, result) = match handle.await {
                Ok(joined) => joined,
                Err(e) => {
                    abort_pending(pending);
                    return Err(e.into());
                }
            };
            match result {
                Err(e) if self.config.strict_mode => {
                    warn!("{} ❌ 严格模式下终止处理阶段: {}", ctx, e);
                    abort_pending(pending);
                    return Err(e);
                }
                other => outcomes.push(DocumentOutcome::capture(&ctx, other)),
            }
        }

        Ok(outcomes)
    }

    /// 写处理完成标记，必须在全部文档写完之后
    async fn write_marker(&self, summary: &ProcessSummary) -> AppResult<()> {
        let marker = ProcessMarker {
            timestamp: utc_timestamp(),
            processed_files: summary
                .processed
                .iter()
                .map(|p| p.to_string_lossy().to_string())
                .collect(),
            failed_files: summary.failed.clone(),
        };
        fs_store::write_json_pretty(&summary.marker, &marker).await?;
        info!("✓ 已写入处理完成标记: {}", summary.marker.display());
        Ok(())
    }
}
