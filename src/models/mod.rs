pub mod document;
pub mod marker;
pub mod report;

pub use document::{DocumentFailure, DocumentStatistics, ProcessedDocument};
pub use marker::{FetchMarker, ProcessMarker};
pub use report::{BigramEntry, FinalReport, Readability, SimilarityPair, WordEntry};

/// 当前 UTC 时间，RFC 3339 格式（微秒精度，`+00:00` 偏移）
pub fn utc_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, false)
}
