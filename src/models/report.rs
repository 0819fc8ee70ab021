use crate::models::document::DocumentFailure;
use serde::{Deserialize, Serialize};

/// 高频词条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub count: usize,
    /// count / total_words
    pub frequency: f64,
    /// 包含该词的文档数
    pub documents: usize,
}

/// 高频二元组条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BigramEntry {
    pub bigram: String,
    pub count: usize,
}

/// 文档对相似度，doc1 在排序中位于 doc2 之前
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityPair {
    pub doc1: String,
    pub doc2: String,
    pub similarity: f64,
}

/// 可读性启发式指标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Readability {
    pub avg_sentence_length: f64,
    pub avg_word_length: f64,
    pub complexity_score: f64,
}

/// 最终报告，每次分析运行只写一次
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalReport {
    pub processing_timestamp: String,
    pub documents_processed: usize,
    pub total_words: usize,
    pub unique_words: usize,
    pub top_100_words: Vec<WordEntry>,
    pub document_similarity: Vec<SimilarityPair>,
    pub top_bigrams: Vec<BigramEntry>,
    pub readability: Readability,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_documents: Vec<DocumentFailure>,
}
