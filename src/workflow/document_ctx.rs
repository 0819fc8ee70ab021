//! 文档处理上下文
//!
//! 封装"我正在处理第几篇文档、哪个文件"这一信息

use std::fmt::Display;
use std::path::PathBuf;

/// 文档处理上下文
#[derive(Debug, Clone)]
pub struct DocumentCtx {
    /// 文档序号（从1开始，仅用于日志显示）
    pub index: usize,
    /// 文档总数
    pub total: usize,
    /// 源文件路径
    pub path: PathBuf,
    /// 源文件名（排序键）
    pub file_name: String,
}

impl DocumentCtx {
    pub fn new(index: usize, total: usize, path: PathBuf) -> Self {
        let file_name = crate::infrastructure::fs_store::file_name_of(&path);
        Self {
            index,
            total,
            path,
            file_name,
        }
    }
}

impl Display for DocumentCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[文档 {}/{} {}]", self.index, self.total, self.file_name)
    }
}
