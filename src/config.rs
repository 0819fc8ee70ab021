use crate::error::{AppResult, ConfigError, FileError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 流水线配置
///
/// 三个阶段共用同一份配置，启动时显式传入各阶段
#[derive(Clone, Debug)]
pub struct Config {
    /// 原始 HTML 目录
    pub raw_dir: PathBuf,
    /// 处理后文档 JSON 目录
    pub processed_dir: PathBuf,
    /// 状态（完成标记）目录
    pub status_dir: PathBuf,
    /// 最终报告路径
    pub report_path: PathBuf,
    /// 抓取完成标记文件名
    pub fetch_marker_name: String,
    /// 处理完成标记文件名
    pub process_marker_name: String,
    /// 标记轮询间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 等待上游的超时时间（秒），None 表示无限等待
    pub wait_timeout_secs: Option<u64>,
    /// 同时处理的文档数量
    pub max_concurrent_documents: usize,
    /// 严格模式：任一文档失败即终止整个阶段
    pub strict_mode: bool,
    /// 高频词数量
    pub top_words_limit: usize,
    /// 高频二元组数量
    pub top_bigrams_limit: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from("/shared/raw"),
            processed_dir: PathBuf::from("/shared/processed"),
            status_dir: PathBuf::from("/shared/status"),
            report_path: PathBuf::from("/shared/analysis/final_report.json"),
            fetch_marker_name: "fetch_complete.json".to_string(),
            process_marker_name: "process_complete.json".to_string(),
            poll_interval_ms: 2000,
            wait_timeout_secs: None,
            max_concurrent_documents: 8,
            strict_mode: false,
            top_words_limit: 100,
            top_bigrams_limit: 50,
            verbose_logging: false,
        }
    }
}

/// TOML 配置文件，所有字段可选，覆盖在默认值之上
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    raw_dir: Option<PathBuf>,
    processed_dir: Option<PathBuf>,
    status_dir: Option<PathBuf>,
    report_path: Option<PathBuf>,
    fetch_marker_name: Option<String>,
    process_marker_name: Option<String>,
    poll_interval_ms: Option<u64>,
    wait_timeout_secs: Option<u64>,
    max_concurrent_documents: Option<usize>,
    strict_mode: Option<bool>,
    top_words_limit: Option<usize>,
    top_bigrams_limit: Option<usize>,
    verbose_logging: Option<bool>,
}

impl Config {
    /// 加载配置：默认值 → TOML 文件（可选）→ 环境变量
    pub fn load(config_file: Option<&Path>) -> AppResult<Self> {
        let mut config = Self::default();
        if let Some(path) = config_file {
            config.apply_toml_file(path)?;
        }
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// 以某个根目录为基准构造配置，四个路径都放在根目录下
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            raw_dir: root.join("raw"),
            processed_dir: root.join("processed"),
            status_dir: root.join("status"),
            report_path: root.join("analysis").join("final_report.json"),
            ..Self::default()
        }
    }

    pub fn fetch_marker_path(&self) -> PathBuf {
        self.status_dir.join(&self.fetch_marker_name)
    }

    pub fn process_marker_path(&self) -> PathBuf {
        self.status_dir.join(&self.process_marker_name)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn wait_timeout(&self) -> Option<Duration> {
        self.wait_timeout_secs.map(Duration::from_secs)
    }

    /// 校验配置值
    pub fn validate(&self) -> AppResult<()> {
        if self.max_concurrent_documents == 0 {
            return Err(invalid("max_concurrent_documents", "必须大于 0"));
        }
        if self.poll_interval_ms == 0 {
            return Err(invalid("poll_interval_ms", "必须大于 0"));
        }
        if self.fetch_marker_name.is_empty() || self.process_marker_name.is_empty() {
            return Err(invalid("marker_name", "标记文件名不能为空"));
        }
        Ok(())
    }

    fn apply_toml_file(&mut self, path: &Path) -> AppResult<()> {
        let content = std::fs::read_to_string(path).map_err(|source| FileError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let file: ConfigFile =
            toml::from_str(&content).map_err(|source| FileError::TomlParseFailed {
                path: path.to_path_buf(),
                source,
            })?;

        macro_rules! overlay {
            ($($field:ident),* $(,)?) => {
                $( if let Some(v) = file.$field { self.$field = v; } )*
            };
        }
        overlay!(
            raw_dir,
            processed_dir,
            status_dir,
            report_path,
            fetch_marker_name,
            process_marker_name,
            poll_interval_ms,
            max_concurrent_documents,
            strict_mode,
            top_words_limit,
            top_bigrams_limit,
            verbose_logging,
        );
        if file.wait_timeout_secs.is_some() {
            self.wait_timeout_secs = file.wait_timeout_secs;
        }
        Ok(())
    }

    fn apply_env(&mut self) -> AppResult<()> {
        if let Some(v) = env_var("PIPELINE_RAW_DIR") {
            self.raw_dir = PathBuf::from(v);
        }
        if let Some(v) = env_var("PIPELINE_PROCESSED_DIR") {
            self.processed_dir = PathBuf::from(v);
        }
        if let Some(v) = env_var("PIPELINE_STATUS_DIR") {
            self.status_dir = PathBuf::from(v);
        }
        if let Some(v) = env_var("PIPELINE_REPORT_PATH") {
            self.report_path = PathBuf::from(v);
        }
        if let Some(v) = env_var("PIPELINE_FETCH_MARKER") {
            self.fetch_marker_name = v;
        }
        if let Some(v) = env_var("PIPELINE_PROCESS_MARKER") {
            self.process_marker_name = v;
        }
        if let Some(v) = parse_env("PIPELINE_POLL_INTERVAL_MS", "u64")? {
            self.poll_interval_ms = v;
        }
        if let Some(v) = parse_env("PIPELINE_WAIT_TIMEOUT_SECS", "u64")? {
            self.wait_timeout_secs = Some(v);
        }
        if let Some(v) = parse_env("PIPELINE_MAX_CONCURRENT", "usize")? {
            self.max_concurrent_documents = v;
        }
        if let Some(v) = parse_env("PIPELINE_STRICT", "bool")? {
            self.strict_mode = v;
        }
        if let Some(v) = parse_env("PIPELINE_TOP_WORDS", "usize")? {
            self.top_words_limit = v;
        }
        if let Some(v) = parse_env("PIPELINE_TOP_BIGRAMS", "usize")? {
            self.top_bigrams_limit = v;
        }
        if let Some(v) = parse_env("PIPELINE_VERBOSE", "bool")? {
            self.verbose_logging = v;
        }
        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_env<T: std::str::FromStr>(name: &str, expected_type: &str) -> AppResult<Option<T>> {
    match env_var(name) {
        None => Ok(None),
        Some(value) => value.parse::<T>().map(Some).map_err(|_| {
            ConfigError::EnvVarParseFailed {
                var_name: name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }
            .into()
        }),
    }
}

fn invalid(field: &str, reason: &str) -> crate::error::AppError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
    .into()
}
