use chrono::DateTime;
use yfin_types::NewsItem;

const PUBLISHED_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Renders news items as text blocks separated by a blank line.
///
/// An empty list yields a single "No news found" line so the caller always
/// gets readable text back.
#[must_use]
pub fn format_news(symbol: &str, items: &[NewsItem]) -> String {
    if items.is_empty() {
        return format!("No news found for {symbol}");
    }

    items
        .iter()
        .map(format_item)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn format_item(item: &NewsItem) -> String {
    let mut lines = vec![format!("Title: {}", item.title)];
    if let Some(publisher) = &item.publisher {
        lines.push(format!("Publisher: {publisher}"));
    }
    if let Some(published) = item.published_at.and_then(|seconds| DateTime::from_timestamp(seconds, 0)) {
        lines.push(format!("Published: {}", published.format(PUBLISHED_FORMAT)));
    }
    if let Some(link) = &item.link {
        lines.push(format!("Link: {link}"));
    }
    if !item.related_tickers.is_empty() {
        lines.push(format!("Related: {}", item.related_tickers.join(", ")));
    }
    if let Some(summary) = item.summary.as_deref().filter(|summary| !summary.is_empty()) {
        lines.push(format!("Summary: {summary}"));
    }
    lines.join("\n")
}
