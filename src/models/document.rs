use serde::{Deserialize, Serialize};

/// 单篇文档的统计信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentStatistics {
    pub word_count: usize,
    /// 启发式句子数：`.` `!` `?` 出现次数之和
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub avg_word_length: f64,
}

/// 处理后的文档产物，每个 HTML 源文件对应一个 JSON 文件
///
/// 写入后不再修改。所有字段均为必填，缺字段视为结构不合法。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedDocument {
    pub source_file: String,
    pub text: String,
    pub statistics: DocumentStatistics,
    /// 按出现顺序，不去重
    pub links: Vec<String>,
    /// 按出现顺序，不去重
    pub images: Vec<String>,
    pub processed_at: String,
}

/// 处理失败的文档
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFailure {
    pub file: String,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_is_rejected() {
        let json = r#"{
            "source_file": "a.html",
            "text": "hello",
            "links": [],
            "images": [],
            "processed_at": "2024-01-01T00:00:00+00:00"
        }"#;
        assert!(serde_json::from_str::<ProcessedDocument>(json).is_err());
    }

    #[test]
    fn test_field_names_on_disk() {
        let doc = ProcessedDocument {
            source_file: "a.html".into(),
            text: "a b".into(),
            statistics: DocumentStatistics {
                word_count: 2,
                sentence_count: 0,
                paragraph_count: 1,
                avg_word_length: 1.0,
            },
            links: vec!["x".into(), "x".into()],
            images: vec![],
            processed_at: "2024-01-01T00:00:00+00:00".into(),
        };
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["statistics"]["word_count"], 2);
        assert_eq!(value["links"].as_array().unwrap().len(), 2);
        assert!(value.get("processed_at").is_some());
    }
}
