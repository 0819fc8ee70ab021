//! 完成标记
//!
//! 标记文件的存在本身就是同步信号，内容只作记录用途，下游不解析。

use crate::models::document::DocumentFailure;
use serde::{Deserialize, Serialize};

/// 抓取完成标记（上游抓取程序写入，可能携带额外字段）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchMarker {
    pub timestamp: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// 处理完成标记
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessMarker {
    pub timestamp: String,
    pub processed_files: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_files: Vec<DocumentFailure>,
}
