use serde::Serialize;
use yfin_types::RankedEntity;

/// Serializes at most `top_n` records as a JSON array, keeping provider order.
///
/// # Errors
/// Returns a `serde_json::Error` if a record fails to serialize.
pub fn top_records<T: Serialize>(records: &[T], top_n: usize) -> serde_json::Result<String> {
    serde_json::to_string(&records[..top_n.min(records.len())])
}

/// Renders at most `top_n` entities as `SYMBOL: Name` lines.
#[must_use]
pub fn symbol_lines(entities: &[RankedEntity], top_n: usize) -> String {
    entities
        .iter()
        .take(top_n)
        .map(|entity| format!("{}: {}", entity.symbol, entity.name.as_deref().unwrap_or_default()))
        .collect::<Vec<_>>()
        .join("\n")
}
