//! 频次统计 - 业务能力层

use std::collections::HashMap;

/// 语料级频次表
///
/// 记录每个键的出现次数以及首次出现的位置。排名按次数降序，
/// 次数相同时先出现者在前，因此结果与遍历顺序一致且可复现。
#[derive(Debug, Default, Clone)]
pub struct FrequencyTable {
    entries: HashMap<String, (usize, usize)>,
    total: usize,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str) {
        let next_rank = self.entries.len();
        let entry = self.entries.entry(key.to_string()).or_insert((0, next_rank));
        entry.0 += 1;
        self.total += 1;
    }

    pub fn extend<'a, I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for key in keys {
            self.add(key);
        }
    }

    /// 所有计数之和
    pub fn total(&self) -> usize {
        self.total
    }

    /// 不同键的数量
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// 前 `limit` 个高频键
    pub fn most_common(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize, usize)> = self
            .entries
            .iter()
            .map(|(k, (count, first_seen))| (k.as_str(), *count, *first_seen))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        ranked
            .into_iter()
            .take(limit)
            .map(|(k, count, _)| (k, count))
            .collect()
    }
}

/// 二元组：文档内相邻词元以单个空格连接，不跨文档
pub fn bigrams<'a>(tokens: &'a [&'a str]) -> impl Iterator<Item = String> + 'a {
    tokens.windows(2).map(|pair| format!("{} {}", pair[0], pair[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranking_ties_follow_first_appearance() {
        let mut table = FrequencyTable::new();
        table.extend(["b", "a", "c", "a", "c", "d"]);

        let top = table.most_common(3);
        assert_eq!(top, vec![("a", 2), ("c", 2), ("b", 1)]);
        assert_eq!(table.total(), 6);
        assert_eq!(table.distinct(), 4);
    }

    #[test]
    fn test_most_common_limit_larger_than_table() {
        let mut table = FrequencyTable::new();
        table.add("x");
        assert_eq!(table.most_common(100).len(), 1);
        assert!(FrequencyTable::new().most_common(10).is_empty());
    }

    #[test]
    fn test_bigram_count_is_tokens_minus_one() {
        for k in 0usize..6 {
            let owned: Vec<String> = (0..k).map(|i| format!("t{}", i)).collect();
            let tokens: Vec<&str> = owned.iter().map(String::as_str).collect();
            assert_eq!(bigrams(&tokens).count(), k.saturating_sub(1));
        }
    }

    #[test]
    fn test_bigram_format() {
        let tokens = ["the", "cat", "sat"];
        let grams: Vec<String> = bigrams(&tokens).collect();
        assert_eq!(grams, vec!["the cat", "cat sat"]);
    }
}
