//! 分析阶段 - 编排层
//!
//! ## 职责
//!
//! 1. **等待上游**：轮询处理完成标记
//! 2. **加载**：按文件名顺序并发读取全部文档 JSON，结构不合法的文档
//!    在严格模式下终止整个运行，否则单独记录为失败
//! 3. **聚合**：按文档顺序累加词频、二元组、文档频次与可读性
//! 4. **相似度**：按行并发计算两两 Jaccard 相似度，结果按 i < j 顺序重组
//! 5. **报告**：写出唯一的最终报告

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{fs_store, MarkerWatcher};
use crate::models::{
    utc_timestamp, DocumentFailure, FinalReport, ProcessedDocument, SimilarityPair,
};
use crate::services::similarity::row_similarities;
use crate::services::{CorpusAggregator, CorpusDocument};
use crate::utils::logging;
use super::abort_pending;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{watch, Semaphore};
use tracing::{info, warn};

/// 分析阶段
pub struct Analyzer {
    config: Config,
    watcher: MarkerWatcher,
}

impl Analyzer {
    pub fn new(config: Config, shutdown: watch::Receiver<bool>) -> Self {
        let watcher = MarkerWatcher::new(config.poll_interval(), config.wait_timeout(), shutdown);
        Self { config, watcher }
    }

    /// 运行分析阶段，返回写出的报告
    pub async fn run(&self) -> AppResult<FinalReport> {
        logging::log_stage_startup("分析阶段", &self.config);

        // 等待处理完成
        self.watcher.wait(&self.config.process_marker_path()).await?;

        let artifacts = fs_store::list_files_sorted(&self.config.processed_dir, "json").await?;
        info!("✓ 找到 {} 个文档产物", artifacts.len());

        let (corpus, failures) = self.load_corpus(artifacts).await?;

        let mut aggregator = CorpusAggregator::new();
        for doc in &corpus {
            aggregator.add(doc);
        }

        let documents_processed = aggregator.document_count();
        let total_words = aggregator.total_words();
        let unique_words = aggregator.unique_words();
        let top_100_words = aggregator.top_words(self.config.top_words_limit);
        let top_bigrams = aggregator.top_bigrams(self.config.top_bigrams_limit);
        let readability = aggregator.readability();
        info!(
            "📊 文档 {} | 总词数 {} | 词汇量 {}",
            documents_processed, total_words, unique_words
        );

        let (ids, sets) = aggregator.into_similarity_inputs();
        let document_similarity = self.compute_similarity(ids, sets).await?;
        info!("✓ 已计算 {} 个文档对的相似度", document_similarity.len());

        let report = FinalReport {
            processing_timestamp: utc_timestamp(),
            documents_processed,
            total_words,
            unique_words,
            top_100_words,
            document_similarity,
            top_bigrams,
            readability,
            failed_documents: failures,
        };

        fs_store::write_json_pretty(&self.config.report_path, &report).await?;
        info!("✓ 最终报告已写入: {}", self.config.report_path.display());
        logging::log_stage_complete(
            "分析阶段",
            report.documents_processed,
            report.failed_documents.len(),
        );

        Ok(report)
    }

    /// 并发加载全部文档产物，结果保持文件名顺序
    async fn load_corpus(
        &self,
        artifacts: Vec<PathBuf>,
    ) -> AppResult<(Vec<CorpusDocument>, Vec<DocumentFailure>)> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_documents));
        let mut handles = Vec::with_capacity(artifacts.len());

        for path in artifacts {
            let permit = semaphore.clone().acquire_owned().await?;
            handles.push(tokio::spawn(async move {
                let _permit = permit;
                let result = fs_store::read_json::<ProcessedDocument>(&path).await;
                (path, result)
            }));
        }

        let mut corpus = Vec::with_capacity(handles.len());
        let mut failures = Vec::new();
        let mut pending = handles.into_iter();
        while let Some(handle) = pending.next() {
            let (path, result) = match handle.await {
                Ok(joined) => joined,
                Err(e) => {
                    abort_pending(pending);
                    return Err(e.into());
                }
            };
            let id = fs_store::file_name_of(&path);
            match result {
                Ok(doc) => corpus.push(CorpusDocument { id, text: doc.text }),
                Err(e) if self.config.strict_mode => {
                    abort_pending(pending);
                    return Err(e);
                }
                Err(e) => {
                    warn!("[文档 {}] ❌ 产物无效，已跳过: {}", id, e);
                    failures.push(DocumentFailure {
                        file: id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok((corpus, failures))
    }

    /// 按行并发计算两两相似度
    async fn compute_similarity(
        &self,
        ids: Vec<String>,
        sets: Vec<HashSet<String>>,
    ) -> AppResult<Vec<SimilarityPair>> {
        let n = ids.len();
        let ids = Arc::new(ids);
        let sets = Arc::new(sets);
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_documents));

        let mut handles = Vec::with_capacity(n);
        for row in 0..n.saturating_sub(1) {
            let permit = semaphore.clone().acquire_owned().await?;
            let ids = ids.clone();
            let sets = sets.clone();
            handles.push(tokio::task::spawn_blocking(move || {
                let _permit = permit;
                row_similarities(row, &ids, &sets)
            }));
        }

        // join_all 保持提交顺序，拼接后即为 i < j 的行优先顺序
        let mut pairs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for row in futures::future::join_all(handles).await {
            pairs.extend(row?);
        }
        Ok(pairs)
    }
}
