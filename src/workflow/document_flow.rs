//! 文档处理流程 - 流程层
//!
//! 核心职责：定义"一篇文档"的完整处理流程
//!
//! 流程顺序：
//! 1. 读取原始 HTML
//! 2. 剥离 script/style → 提取链接/图片 → 纯文本
//! 3. 计算统计
//! 4. 写出文档 JSON

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::AppResult;
use crate::infrastructure::fs_store;
use crate::models::{utc_timestamp, DocumentFailure, ProcessedDocument};
use crate::services::text_stats;
use crate::services::HtmlStripper;
use crate::workflow::document_ctx::DocumentCtx;

/// 单篇文档的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    /// 已写出，附输出路径
    Written { output: PathBuf },
    /// 处理失败，附原因
    Failed(DocumentFailure),
}

impl DocumentOutcome {
    /// 把单篇文档的结果转换为带标签的结果，并记录日志
    pub fn capture(ctx: &DocumentCtx, result: AppResult<PathBuf>) -> Self {
        match result {
            Ok(output) => {
                info!("{} ✓ 已处理 -> {}", ctx, output.display());
                DocumentOutcome::Written { output }
            }
            Err(e) => {
                warn!("{} ❌ 处理失败: {}", ctx, e);
                DocumentOutcome::Failed(DocumentFailure {
                    file: ctx.file_name.clone(),
                    reason: e.to_string(),
                })
            }
        }
    }
}

/// 文档处理流程
///
/// - 不持有任何目录扫描或并发资源
/// - 只依赖业务能力（services）与文件存储（infrastructure）
#[derive(Clone)]
pub struct DocumentFlow {
    stripper: Arc<HtmlStripper>,
    output_dir: PathBuf,
    verbose_logging: bool,
}

impl DocumentFlow {
    pub fn new(
        stripper: Arc<HtmlStripper>,
        output_dir: impl Into<PathBuf>,
        verbose_logging: bool,
    ) -> Self {
        Self {
            stripper,
            output_dir: output_dir.into(),
            verbose_logging,
        }
    }

    /// 处理一篇文档并写出 JSON，返回输出路径
    pub async fn process(&self, ctx: &DocumentCtx) -> AppResult<PathBuf> {
        let html = fs_store::read_text_lossy(&ctx.path).await?;
        debug!("{} 读取 {} 字节", ctx, html.len());

        let document = self.transform(&ctx.file_name, &html);

        if self.verbose_logging {
            log_document(ctx, &document);
        }

        let output = output_path_for(&self.output_dir, &ctx.file_name);
        fs_store::write_json_pretty(&output, &document).await?;
        Ok(output)
    }

    /// 纯变换：同一输入除 `processed_at` 外总得到相同结果
    pub fn transform(&self, source_file: &str, html: &str) -> ProcessedDocument {
        let stripped = self.stripper.strip(html);
        let statistics = text_stats::compute_statistics(&stripped.text, &stripped.text_with_breaks);

        ProcessedDocument {
            source_file: source_file.to_string(),
            text: stripped.text,
            statistics,
            links: stripped.links,
            images: stripped.images,
            processed_at: utc_timestamp(),
        }
    }
}

/// 输出文件名：源文件主干 + `.json`
pub fn output_path_for(output_dir: &Path, source_file: &str) -> PathBuf {
    let stem = Path::new(source_file)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| source_file.to_string());
    output_dir.join(format!("{}.json", stem))
}

fn log_document(ctx: &DocumentCtx, document: &ProcessedDocument) {
    let preview = if document.text.chars().count() > 80 {
        document.text.chars().take(80).collect::<String>() + "..."
    } else {
        document.text.clone()
    };
    info!("{} 文本: {}", ctx, preview);
    info!(
        "{} 词数 {} | 句子 {} | 段落 {} | 链接 {} | 图片 {}",
        ctx,
        document.statistics.word_count,
        document.statistics.sentence_count,
        document.statistics.paragraph_count,
        document.links.len(),
        document.images.len()
    );
}
