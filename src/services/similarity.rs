//! 文档相似度 - 业务能力层

use crate::models::SimilarityPair;
use std::collections::HashSet;
use std::hash::Hash;

/// Jaccard 相似度：|A ∩ B| / |A ∪ B|，两个空集定义为 0
pub fn jaccard<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// 第 `row` 行的所有无序对 (row, j)，j > row
pub fn row_pairs(row: usize, n: usize) -> impl Iterator<Item = (usize, usize)> {
    (row + 1..n).map(move |j| (row, j))
}

/// 计算第 `row` 篇文档与其后所有文档的相似度
pub fn row_similarities(
    row: usize,
    ids: &[String],
    sets: &[HashSet<String>],
) -> Vec<SimilarityPair> {
    row_pairs(row, ids.len())
        .map(|(i, j)| SimilarityPair {
            doc1: ids[i].clone(),
            doc2: ids[j].clone(),
            similarity: jaccard(&sets[i], &sets[j]),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::text_stats::tokenize;

    fn set(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn token_set(text: &str) -> HashSet<String> {
        tokenize(text).into_iter().map(str::to_string).collect()
    }

    fn all_rows(ids: &[String], sets: &[HashSet<String>]) -> Vec<SimilarityPair> {
        (0..ids.len())
            .flat_map(|row| row_similarities(row, ids, sets))
            .collect()
    }

    #[test]
    fn test_example_one_third() {
        let a = token_set("cat dog");
        let b = token_set("dog bird");
        assert!((jaccard(&a, &b) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_symmetric_and_reflexive() {
        let samples = [
            set(&["a", "b", "c"]),
            set(&["b", "c", "d", "e"]),
            set(&["x"]),
            set(&[]),
        ];
        for a in &samples {
            for b in &samples {
                assert_eq!(jaccard(a, b), jaccard(b, a));
            }
            if !a.is_empty() {
                assert_eq!(jaccard(a, a), 1.0);
            }
        }
        assert_eq!(jaccard(&set(&[]), &set(&[])), 0.0);
    }

    #[test]
    fn test_duplicates_collapse() {
        let a = token_set("dog dog dog");
        let b = token_set("dog");
        assert_eq!(jaccard(&a, &b), 1.0);
    }

    #[test]
    fn test_tokens_are_case_sensitive() {
        assert_eq!(jaccard(&token_set("Dog"), &token_set("dog")), 0.0);
    }

    #[test]
    fn test_rows_keep_doc_order() {
        let ids: Vec<String> = ["a.json", "b.json", "c.json"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let sets = vec![token_set("cat dog"), token_set("dog bird"), token_set("")];

        let first = row_similarities(0, &ids, &sets);
        assert_eq!(first.len(), 2);
        assert_eq!((first[0].doc1.as_str(), first[0].doc2.as_str()), ("a.json", "b.json"));
        assert!((first[0].similarity - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(first[1].similarity, 0.0);

        let second = row_similarities(1, &ids, &sets);
        assert_eq!((second[0].doc1.as_str(), second[0].doc2.as_str()), ("b.json", "c.json"));
        assert!(row_similarities(2, &ids, &sets).is_empty());
    }

    #[test]
    fn test_pair_count_and_order() {
        for n in 0..7usize {
            let ids: Vec<String> = (0..n).map(|i| format!("d{}.json", i)).collect();
            let sets: Vec<HashSet<String>> =
                (0..n).map(|i| token_set(&format!("w{}", i))).collect();
            let pairs = all_rows(&ids, &sets);

            assert_eq!(pairs.len(), n * n.saturating_sub(1) / 2);
            assert!(pairs.iter().all(|p| p.doc1 < p.doc2));
            let unique: HashSet<_> = pairs.iter().map(|p| (&p.doc1, &p.doc2)).collect();
            assert_eq!(unique.len(), pairs.len());
        }
        let pairs: Vec<(usize, usize)> = (0..3).flat_map(|row| row_pairs(row, 3)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
    }
}
