//! 文本统计 - 业务能力层
//!
//! 分词、句子与段落的启发式计数。处理阶段和分析阶段各自调用这里的函数，
//! 分析阶段不复用处理阶段保存的任何统计值。

use crate::models::DocumentStatistics;

/// 按空白切分为词元（区分大小写，不做词干化）
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// 启发式句子数：`.` `!` `?` 字符出现次数之和
pub fn count_sentence_marks(text: &str) -> usize {
    text.chars().filter(|c| matches!(c, '.' | '!' | '?')).count()
}

/// 段落数：以空行（两个连续换行）分隔的非空块数量
///
/// 必须作用于仍保留原始换行的文本，折叠空白后的文本最多只有一个段落。
pub fn count_paragraphs(text_with_breaks: &str) -> usize {
    text_with_breaks
        .replace("\r\n", "\n")
        .split("\n\n")
        .filter(|block| !block.trim().is_empty())
        .count()
}

/// 词长按字符计（而非字节）
pub fn char_len(word: &str) -> usize {
    word.chars().count()
}

/// 计算单篇文档统计
pub fn compute_statistics(text: &str, text_with_breaks: &str) -> DocumentStatistics {
    let words = tokenize(text);
    let word_count = words.len();
    let total_len: usize = words.iter().map(|w| char_len(w)).sum();
    let avg_word_length = if word_count > 0 {
        total_len as f64 / word_count as f64
    } else {
        0.0
    };

    DocumentStatistics {
        word_count,
        sentence_count: count_sentence_marks(text),
        paragraph_count: count_paragraphs(text_with_breaks),
        avg_word_length,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_for_simple_text() {
        let stats = compute_statistics("Hello World !", " Hello  World ! ");
        assert_eq!(stats.word_count, 3);
        assert_eq!(stats.sentence_count, 1);
        assert_eq!(stats.paragraph_count, 1);
        assert!((stats.avg_word_length - 11.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_sentence_heuristic_counts_every_mark() {
        assert_eq!(count_sentence_marks("Wait... what?! 3.14"), 6);
        assert_eq!(count_sentence_marks("no marks here"), 0);
    }

    #[test]
    fn test_paragraphs_need_blank_line() {
        assert_eq!(count_paragraphs("a\nb"), 1);
        assert_eq!(count_paragraphs("a\n\nb\n\n\n\nc"), 3);
        assert_eq!(count_paragraphs("a\r\n\r\nb"), 2);
        assert_eq!(count_paragraphs("  \n\n  "), 0);
    }

    #[test]
    fn test_empty_text() {
        let stats = compute_statistics("", "");
        assert_eq!(stats.word_count, 0);
        assert_eq!(stats.paragraph_count, 0);
        assert_eq!(stats.avg_word_length, 0.0);
    }

    #[test]
    fn test_word_length_counts_chars() {
        let stats = compute_statistics("café", "café");
        assert_eq!(stats.avg_word_length, 4.0);
    }
}
