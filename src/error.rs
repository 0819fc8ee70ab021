use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 中间产物（文档 JSON）错误
    #[error("产物错误: {0}")]
    Artifact(#[from] ArtifactError),
    /// 阶段同步错误
    #[error("同步错误: {0}")]
    Sync(#[from] SyncError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 并发任务错误
    #[error("任务执行失败: {0}")]
    Task(#[from] tokio::task::JoinError),
    /// 并发许可获取失败（信号量已关闭）
    #[error("无法获取并发许可: {0}")]
    Semaphore(#[from] tokio::sync::AcquireError),
    /// 正则编译失败
    #[error("正则编译失败: {0}")]
    Regex(#[from] regex::Error),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 创建目录失败
    #[error("创建目录失败 ({path}): {source}")]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 读取目录失败
    #[error("读取目录失败 ({path}): {source}")]
    ListDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// 文档产物错误：结构不合法或无法序列化
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// JSON 解析失败（缺少字段、类型不符、内容损坏）
    #[error("无法解析产物 ({path}): {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// JSON 序列化失败
    #[error("无法序列化产物 ({path}): {source}")]
    SerializeFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// 阶段同步错误
#[derive(Debug, Error)]
pub enum SyncError {
    /// 等待上游标记超时
    #[error("上游未就绪: 等待 {} 超过 {:?}", marker.display(), waited)]
    UpstreamNotReady { marker: PathBuf, waited: Duration },
    /// 收到关闭信号
    #[error("等待 {} 时收到关闭信号", marker.display())]
    Cancelled { marker: PathBuf },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置值不合法
    #[error("配置项 {field} 不合法: {reason}")]
    InvalidValue { field: String, reason: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建产物解析错误
    pub fn malformed_artifact(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        AppError::Artifact(ArtifactError::Malformed {
            path: path.into(),
            source,
        })
    }

    /// 是否为上游未就绪（超时）
    pub fn is_upstream_not_ready(&self) -> bool {
        matches!(self, AppError::Sync(SyncError::UpstreamNotReady { .. }))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
