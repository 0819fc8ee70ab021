use std::fs;
use std::path::Path;
use tempfile::TempDir;
use text_pipeline::Config;
use tokio::sync::watch;

/// 隔离的流水线目录环境
pub struct TestEnv {
    pub tmp: TempDir,
    pub config: Config,
    // 保持发送端存活，否则关闭信号通道会被视为已断开
    _shutdown_tx: watch::Sender<bool>,
    pub shutdown_rx: watch::Receiver<bool>,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let config = Config {
            poll_interval_ms: 10,
            wait_timeout_secs: Some(5),
            max_concurrent_documents: 2,
            ..Config::rooted_at(tmp.path())
        };
        let (tx, rx) = watch::channel(false);
        Self {
            tmp,
            config,
            _shutdown_tx: tx,
            shutdown_rx: rx,
        }
    }

    pub fn write_raw(&self, name: &str, html: &str) {
        write_file(&self.config.raw_dir.join(name), html);
    }

    pub fn write_processed(&self, name: &str, json: &str) {
        write_file(&self.config.processed_dir.join(name), json);
    }

    pub fn mark_fetched(&self) {
        write_file(
            &self.config.fetch_marker_path(),
            r#"{"timestamp": "2024-01-01T00:00:00+00:00", "urls_fetched": 3}"#,
        );
    }

    pub fn mark_processed(&self) {
        write_file(
            &self.config.process_marker_path(),
            r#"{"timestamp": "2024-01-01T00:00:00+00:00", "processed_files": []}"#,
        );
    }

    pub fn read_json(&self, path: &Path) -> serde_json::Value {
        let content = fs::read_to_string(path).expect("read json file");
        serde_json::from_str(&content).expect("valid json")
    }
}

pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, content).expect("write file");
}

/// 一个合法的文档产物
pub fn artifact_json(source_file: &str, text: &str) -> String {
    serde_json::json!({
        "source_file": source_file,
        "text": text,
        "statistics": {
            "word_count": text.split_whitespace().count(),
            "sentence_count": 0,
            "paragraph_count": 1,
            "avg_word_length": 0.0
        },
        "links": [],
        "images": [],
        "processed_at": "2024-01-01T00:00:00+00:00"
    })
    .to_string()
}
