//! News sentiment parser (`NEWS_SENTIMENT`).

use serde::Deserialize;
use serde_json::{json, Map, Value};
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime};

use super::{round_to, truncate_with_ellipsis};

const FEED_SCAN_LIMIT: usize = 10;
const RECENCY_WINDOW_DAYS: i64 = 7;
const SUMMARY_MAX_CHARS: usize = 100;

#[derive(Debug, Default, Deserialize)]
struct FeedItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    time_published: String,
    #[serde(default)]
    overall_sentiment_score: f64,
    #[serde(default)]
    overall_sentiment_label: String,
}

/// Scans the first 10 feed items, keeps those published within the last
/// 7 days of `now`, and aggregates sentiment over the kept items. Malformed
/// items and timestamps are skipped, not fatal.
///
/// `now` is a parameter so the recency window is deterministic under test.
pub fn parse(body: &Map<String, Value>, now: OffsetDateTime) -> Map<String, Value> {
    let Some(feed) = body.get("feed").and_then(Value::as_array) else {
        return Map::new();
    };
    if feed.is_empty() {
        return Map::new();
    }

    let cutoff = (now - Duration::days(RECENCY_WINDOW_DAYS)).date();
    let published_format = format_description!("[year][month][day]T[hour][minute][second]");
    let date_format = format_description!("[year]-[month]-[day]");

    let mut recent = Vec::new();
    let mut total_score = 0.0;
    let mut positive_count = 0u64;
    let mut negative_count = 0u64;

    for raw in feed.iter().take(FEED_SCAN_LIMIT) {
        let Ok(item) = serde_json::from_value::<FeedItem>(raw.clone()) else {
            continue;
        };
        let Ok(published) = PrimitiveDateTime::parse(&item.time_published, published_format)
        else {
            continue;
        };
        if published.date() < cutoff {
            continue;
        }

        total_score += item.overall_sentiment_score;
        match item.overall_sentiment_label.as_str() {
            "positive" => positive_count += 1,
            "negative" => negative_count += 1,
            _ => {}
        }

        recent.push(json!({
            "title": item.title,
            "summary": truncate_with_ellipsis(&item.summary, SUMMARY_MAX_CHARS),
            "sentiment": item.overall_sentiment_label,
            "date": published.date().format(date_format).unwrap_or_default(),
        }));
    }

    let avg_score = if recent.is_empty() {
        0.0
    } else {
        round_to(total_score / recent.len() as f64, 3)
    };

    let mut record = Map::new();
    record.insert(String::from("recent_news_count"), json!(recent.len()));
    record.insert(String::from("avg_sentiment_score"), json!(avg_score));
    record.insert(String::from("positive_news_count"), json!(positive_count));
    record.insert(String::from("negative_news_count"), json!(negative_count));
    record.insert(String::from("recent_news"), Value::Array(recent));
    record
}
