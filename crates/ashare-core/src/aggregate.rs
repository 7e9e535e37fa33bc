//! Per-symbol aggregation across the four endpoints.

use serde_json::{Map, Value};
use time::macros::format_description;
use time::{Duration, OffsetDateTime};
use tracing::warn;

use crate::adapters;
use crate::endpoint::EndpointSpec;
use crate::error::FetchError;
use crate::fetcher::Fetcher;
use crate::symbol::Symbol;

/// Flat record produced by one endpoint adapter for one symbol.
pub type PartialRecord = Map<String, Value>;

/// Merged view across all four endpoints for one symbol.
pub type ComprehensiveRecord = Map<String, Value>;

/// Fetches and merges all four endpoints for one symbol.
///
/// Endpoint failures (exhausted retries, explicit upstream errors) are
/// logged and degrade to an empty partial record; they never abort the
/// sibling endpoints. Partials are overlaid in endpoint order onto a base
/// containing only the symbol, so the result always carries at least
/// `symbol`.
pub async fn fetch_comprehensive(fetcher: &Fetcher, symbol: &Symbol) -> ComprehensiveRecord {
    let now = OffsetDateTime::now_utc();

    let mut record = Map::new();
    record.insert(
        String::from("symbol"),
        Value::String(symbol.as_str().to_owned()),
    );

    match fetcher.fetch(&EndpointSpec::quote(), symbol).await {
        Ok(body) => overlay(&mut record, adapters::quote::parse(&body)),
        Err(error) => log_degraded(symbol, &error),
    }

    match fetcher.fetch(&EndpointSpec::overview(), symbol).await {
        Ok(body) => overlay(&mut record, adapters::overview::parse(&body)),
        Err(error) => log_degraded(symbol, &error),
    }

    match fetcher
        .fetch(&EndpointSpec::news_sentiment(news_time_from(now)), symbol)
        .await
    {
        Ok(body) => overlay(&mut record, adapters::news::parse(&body, now)),
        Err(error) => log_degraded(symbol, &error),
    }

    match fetcher.fetch(&EndpointSpec::daily_series(), symbol).await {
        Ok(body) => overlay(&mut record, adapters::daily::parse(&body)),
        Err(error) => log_degraded(symbol, &error),
    }

    record
}

/// Later overlays win on key collision.
fn overlay(record: &mut ComprehensiveRecord, partial: PartialRecord) {
    for (key, value) in partial {
        record.insert(key, value);
    }
}

fn log_degraded(symbol: &Symbol, error: &FetchError) {
    warn!(symbol = %symbol, "endpoint degraded to empty record: {error}");
}

/// `time_from` query value covering the same 7-day window the news parser
/// keeps.
fn news_time_from(now: OffsetDateTime) -> String {
    let window_start = (now - Duration::days(7)).date();
    window_start
        .format(format_description!("[year][month][day]"))
        .map(|day| format!("{day}T0000"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    #[test]
    fn later_overlays_win_on_collision() {
        let mut record = Map::new();
        record.insert(String::from("symbol"), json!("600519.SHH"));
        record.insert(String::from("volume"), json!("111"));

        let mut partial = Map::new();
        partial.insert(String::from("volume"), json!("222"));
        partial.insert(String::from("week_change"), json!(1.5));

        overlay(&mut record, partial);

        assert_eq!(record["volume"], json!("222"));
        assert_eq!(record["week_change"], json!(1.5));
        assert_eq!(record["symbol"], json!("600519.SHH"));
    }

    #[test]
    fn news_window_start_is_seven_days_back() {
        let now = datetime!(2024-08-29 15:30 UTC);
        assert_eq!(news_time_from(now), "20240822T0000");
    }
}
