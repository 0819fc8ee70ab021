//! 可读性启发式 - 业务能力层
//!
//! complexity_score = avg_sentence_length × avg_word_length，
//! 只是一个组合启发式，公式本身即约定。

use crate::models::Readability;

/// 语料级可读性累加器
#[derive(Debug, Default, Clone)]
pub struct ReadabilityAccumulator {
    total_words: usize,
    total_word_chars: usize,
    estimated_sentences: usize,
}

impl ReadabilityAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 累加一篇文档：句子数取自原始文本的标点计数，词长按每次出现累计（含重复）
    pub fn add_document(&mut self, text: &str, tokens: &[&str]) {
        self.estimated_sentences += super::text_stats::count_sentence_marks(text);
        self.total_words += tokens.len();
        self.total_word_chars += tokens
            .iter()
            .map(|t| super::text_stats::char_len(t))
            .sum::<usize>();
    }

    pub fn finish(&self) -> Readability {
        let avg_sentence_length = self.total_words as f64 / self.estimated_sentences.max(1) as f64;
        let avg_word_length = if self.total_words > 0 {
            self.total_word_chars as f64 / self.total_words as f64
        } else {
            0.0
        };
        Readability {
            avg_sentence_length,
            avg_word_length,
            complexity_score: avg_sentence_length * avg_word_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formula() {
        let mut acc = ReadabilityAccumulator::new();
        let text = "The cat sat. The dog ran!";
        let tokens: Vec<&str> = text.split_whitespace().collect();
        acc.add_document(text, &tokens);

        let r = acc.finish();
        // 6 词，2 个句末标点，词长合计 3+3+4+3+3+4 = 20
        assert_eq!(r.avg_sentence_length, 3.0);
        assert!((r.avg_word_length - 20.0 / 6.0).abs() < 1e-12);
        assert!((r.complexity_score - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_punctuation_divides_by_one() {
        let mut acc = ReadabilityAccumulator::new();
        acc.add_document("a b c", &["a", "b", "c"]);
        assert_eq!(acc.finish().avg_sentence_length, 3.0);
    }

    #[test]
    fn test_empty_corpus() {
        let r = ReadabilityAccumulator::new().finish();
        assert_eq!(r.avg_sentence_length, 0.0);
        assert_eq!(r.avg_word_length, 0.0);
        assert_eq!(r.complexity_score, 0.0);
    }
}
