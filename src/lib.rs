//! # Text Pipeline
//!
//! 离线文本分析流水线：原始 HTML → 纯文本与单篇统计 → 语料级报告
//!
//! ## 架构设计
//!
//! 处理阶段与分析阶段是互相独立的进程，唯一的交接方式是共享状态目录中的
//! 完成标记文件：上游写完全部产物之后才写标记，下游只看标记是否存在。
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `fs_store` - 有序列目录、容错读取、JSON 读写
//! - `MarkerWatcher` - 带超时与关闭信号的标记轮询
//!
//! ### ② 业务能力层（Services）
//! - `HtmlStripper` - HTML 剥离与链接/图片提取
//! - `text_stats` - 分词、句子/段落启发式
//! - `FrequencyTable` / `CorpusAggregator` - 词频、二元组、文档频次
//! - `similarity` - Jaccard 相似度
//! - `ReadabilityAccumulator` - 可读性启发式
//!
//! ### ③ 流程层（Workflow）
//! - `DocumentCtx` - 上下文封装（序号 + 文件名）
//! - `DocumentFlow` - 单篇文档流程（读取 → 剥离 → 统计 → 写出）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator::processor` - 处理阶段
//! - `orchestrator::analyzer` - 分析阶段

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::MarkerWatcher;
pub use models::{FinalReport, ProcessMarker, ProcessedDocument};
pub use orchestrator::{Analyzer, ProcessSummary, Processor};
pub use workflow::{DocumentCtx, DocumentFlow, DocumentOutcome};
