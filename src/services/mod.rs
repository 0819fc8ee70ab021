pub mod corpus;
pub mod frequency;
pub mod html_stripper;
pub mod readability;
pub mod similarity;
pub mod text_stats;

pub use corpus::{CorpusAggregator, CorpusDocument};
pub use frequency::FrequencyTable;
pub use html_stripper::{HtmlStripper, StrippedHtml};
pub use readability::ReadabilityAccumulator;
