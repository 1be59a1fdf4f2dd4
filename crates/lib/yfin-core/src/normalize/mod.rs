//! Normalizers from provider records to stable text and JSON.
//!
//! Each normalizer is a pure function over already-fetched data: timestamp
//! humanization for ticker records, top-N truncation of ranking tables, and
//! text rendering for news and price history.

pub mod news;
pub mod records;
pub mod table;
pub mod timestamps;

pub use news::format_news;
pub use records::{symbol_lines, top_records};
pub use table::price_table;
pub use timestamps::{FieldConversion, FieldOutcome, HumanizedInfo, humanize_timestamps};
