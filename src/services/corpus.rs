//! 语料聚合 - 业务能力层
//!
//! 按文件名顺序逐篇累加：词频、二元组频次、文档频次、可读性与词元集合。
//! 每篇文档都从保存的 `text` 字段重新分词，不复用处理阶段的任何结果。

use crate::models::{BigramEntry, Readability, WordEntry};
use crate::services::frequency::{bigrams, FrequencyTable};
use crate::services::readability::ReadabilityAccumulator;
use crate::services::text_stats::tokenize;
use std::collections::{HashMap, HashSet};

/// 参与分析的一篇文档
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusDocument {
    /// 文档标识（处理产物文件名）
    pub id: String,
    pub text: String,
}

/// 语料聚合器
#[derive(Debug, Default)]
pub struct CorpusAggregator {
    words: FrequencyTable,
    bigrams: FrequencyTable,
    document_frequency: HashMap<String, usize>,
    readability: ReadabilityAccumulator,
    ids: Vec<String>,
    token_sets: Vec<HashSet<String>>,
}

impl CorpusAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 累加一篇文档，调用顺序即文档顺序
    pub fn add(&mut self, doc: &CorpusDocument) {
        let tokens = tokenize(&doc.text);

        self.words.extend(tokens.iter().copied());
        // 二元组只在文档内部形成
        for gram in bigrams(&tokens) {
            self.bigrams.add(&gram);
        }
        self.readability.add_document(&doc.text, &tokens);

        let set: HashSet<String> = tokens.iter().map(|t| t.to_string()).collect();
        for token in &set {
            *self.document_frequency.entry(token.clone()).or_insert(0) += 1;
        }
        self.ids.push(doc.id.clone());
        self.token_sets.push(set);
    }

    pub fn document_count(&self) -> usize {
        self.ids.len()
    }

    pub fn total_words(&self) -> usize {
        self.words.total()
    }

    pub fn unique_words(&self) -> usize {
        self.words.distinct()
    }

    pub fn top_words(&self, limit: usize) -> Vec<WordEntry> {
        let total = self.words.total();
        self.words
            .most_common(limit)
            .into_iter()
            .map(|(word, count)| WordEntry {
                word: word.to_string(),
                count,
                frequency: if total > 0 { count as f64 / total as f64 } else { 0.0 },
                documents: self.document_frequency.get(word).copied().unwrap_or(0),
            })
            .collect()
    }

    pub fn top_bigrams(&self, limit: usize) -> Vec<BigramEntry> {
        self.bigrams
            .most_common(limit)
            .into_iter()
            .map(|(bigram, count)| BigramEntry {
                bigram: bigram.to_string(),
                count,
            })
            .collect()
    }

    pub fn readability(&self) -> Readability {
        self.readability.finish()
    }

    /// 交出文档标识与词元集合，供两两相似度计算
    pub fn into_similarity_inputs(self) -> (Vec<String>, Vec<HashSet<String>>) {
        (self.ids, self.token_sets)
    }
}
