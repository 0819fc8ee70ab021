//! 文件存储 - 基础设施层
//!
//! 只暴露"列目录 / 读 / 写"能力，不认识 Document / Report

use crate::error::{AppError, AppResult, ArtifactError, FileError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 确保目录存在
pub async fn ensure_dir(dir: &Path) -> AppResult<()> {
    fs::create_dir_all(dir)
        .await
        .map_err(|source| FileError::CreateDirFailed {
            path: dir.to_path_buf(),
            source,
        })?;
    Ok(())
}

/// 列出目录下指定扩展名的文件，按文件名排序
///
/// 目录不存在时创建它并返回空列表（视为空语料，而非错误）。
/// 排序与文件系统枚举顺序无关。
pub async fn list_files_sorted(dir: &Path, extension: &str) -> AppResult<Vec<PathBuf>> {
    if !fs::try_exists(dir).await.unwrap_or(false) {
        tracing::warn!("目录不存在，已创建: {}", dir.display());
        ensure_dir(dir).await?;
        return Ok(Vec::new());
    }

    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|source| FileError::ListDirFailed {
            path: dir.to_path_buf(),
            source,
        })?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|source| FileError::ListDirFailed {
            path: dir.to_path_buf(),
            source,
        })?
    {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some(extension) && path.is_file() {
            files.push(path);
        }
    }

    files.sort_by_key(|p| file_name_of(p));
    Ok(files)
}

/// 读取文本文件，非法 UTF-8 字节序列直接丢弃
pub async fn read_text_lossy(path: &Path) -> AppResult<String> {
    let bytes = fs::read(path)
        .await
        .map_err(|source| AppError::file_read_failed(path, source))?;
    Ok(decode_dropping_invalid(&bytes))
}

fn decode_dropping_invalid(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

/// 以两空格缩进写入 JSON，必要时创建父目录
pub async fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> AppResult<()> {
    let content = serde_json::to_string_pretty(value).map_err(|source| {
        ArtifactError::SerializeFailed {
            path: path.to_path_buf(),
            source,
        }
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent).await?;
    }

    fs::write(path, content)
        .await
        .map_err(|source| AppError::file_write_failed(path, source))?;
    Ok(())
}

/// 读取并解析 JSON，结构不合法返回 `ArtifactError::Malformed`
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| AppError::file_read_failed(path, source))?;
    serde_json::from_str(&content).map_err(|source| AppError::malformed_artifact(path, source))
}

/// 文件名（不含目录）
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_utf8_is_dropped() {
        let bytes = b"caf\xC3\xA9 \xFF\xFEok";
        assert_eq!(decode_dropping_invalid(bytes), "café ok");
    }

    #[tokio::test]
    async fn test_list_sorted_and_filtered() {
        let tmp = tempfile::TempDir::new().unwrap();
        for name in ["b.html", "a.html", "c.txt", "10.html"] {
            fs::write(tmp.path().join(name), "x").await.unwrap();
        }

        let files = list_files_sorted(tmp.path(), "html").await.unwrap();
        let names: Vec<String> = files.iter().map(|p| file_name_of(p)).collect();
        assert_eq!(names, vec!["10.html", "a.html", "b.html"]);
    }

    #[tokio::test]
    async fn test_missing_dir_is_created_and_empty() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("not_yet");

        let files = list_files_sorted(&dir, "json").await.unwrap();
        assert!(files.is_empty());
        assert!(dir.is_dir());
    }

    #[tokio::test]
    async fn test_read_json_malformed() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("bad.json");
        fs::write(&path, "{ not json").await.unwrap();

        let result: AppResult<serde_json::Value> = read_json(&path).await;
        assert!(matches!(
            result,
            Err(AppError::Artifact(ArtifactError::Malformed { .. }))
        ));
    }
}
