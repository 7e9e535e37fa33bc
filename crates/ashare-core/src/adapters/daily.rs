//! Daily time-series parser (`TIME_SERIES_DAILY`).

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{parse_f64, parse_i64, round_to};

const WEEK_WINDOW_DAYS: usize = 7;

#[derive(Debug, Default, Deserialize)]
struct DailyBar {
    #[serde(rename = "1. open", default)]
    open: String,
    #[serde(rename = "4. close", default)]
    close: String,
    #[serde(rename = "5. volume", default)]
    volume: String,
}

/// Takes the 7 most recent trading days and computes per-day close, volume,
/// and intraday change, plus week-over-week change across the window. No
/// series data yields an empty record.
pub fn parse(body: &Map<String, Value>) -> Map<String, Value> {
    let Some(series_value) = body.get("Time Series (Daily)") else {
        return Map::new();
    };
    let series: BTreeMap<String, DailyBar> =
        serde_json::from_value(series_value.clone()).unwrap_or_default();
    if series.is_empty() {
        return Map::new();
    }

    // keys are ISO dates, so the BTreeMap's reverse order is newest first
    let mut week_data = Vec::new();
    let mut closes = Vec::new();
    for (date, bar) in series.iter().rev().take(WEEK_WINDOW_DAYS) {
        let open = parse_f64(&bar.open);
        let close = parse_f64(&bar.close);
        closes.push(close);
        week_data.push(json!({
            "date": date,
            "close": close,
            "volume": parse_i64(&bar.volume),
            "change": close - open,
        }));
    }

    let (week_change, week_change_percent) = if closes.len() >= 2 {
        let last_close = closes[0];
        let first_close = closes[closes.len() - 1];
        let change = last_close - first_close;
        let percent = if first_close != 0.0 {
            change / first_close * 100.0
        } else {
            0.0
        };
        (round_to(change, 2), round_to(percent, 2))
    } else {
        (0.0, 0.0)
    };

    let mut record = Map::new();
    record.insert(String::from("week_change"), json!(week_change));
    record.insert(
        String::from("week_change_percent"),
        json!(week_change_percent),
    );
    record.insert(String::from("week_data"), Value::Array(week_data));
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(payload: Value) -> Map<String, Value> {
        payload
            .as_object()
            .expect("test payload must be an object")
            .clone()
    }

    fn bar(open: &str, close: &str, volume: &str) -> Value {
        json!({ "1. open": open, "4. close": close, "5. volume": volume })
    }

    #[test]
    fn computes_week_change_over_seven_most_recent_days() {
        // nine days present; the window must keep 2024-08-19..2024-08-27
        let body = body(json!({
            "Time Series (Daily)": {
                "2024-08-15": bar("90.0", "91.0", "1000"),
                "2024-08-16": bar("91.0", "92.0", "1000"),
                "2024-08-19": bar("100.0", "102.0", "1100"),
                "2024-08-20": bar("102.0", "101.5", "1200"),
                "2024-08-21": bar("101.5", "103.0", "1300"),
                "2024-08-22": bar("103.0", "104.2", "1400"),
                "2024-08-23": bar("104.2", "103.8", "1500"),
                "2024-08-26": bar("103.8", "105.1", "1600"),
                "2024-08-27": bar("105.1", "106.3", "1700"),
            }
        }));

        let record = parse(&body);
        let week = record["week_data"].as_array().expect("array field");

        assert_eq!(week.len(), 7);
        assert_eq!(week[0]["date"], json!("2024-08-27"));
        assert_eq!(week[6]["date"], json!("2024-08-19"));
        assert_eq!(week[0]["volume"], json!(1700));

        // 106.3 - 102.0, and its percent of the oldest close
        assert_eq!(record["week_change"], json!(4.3));
        assert_eq!(record["week_change_percent"], json!(4.22));
    }

    #[test]
    fn intraday_change_is_close_minus_open() {
        let body = body(json!({
            "Time Series (Daily)": {
                "2024-08-27": bar("100.0", "98.5", "900"),
            }
        }));

        let record = parse(&body);
        let day = &record["week_data"][0];

        assert_eq!(day["change"], json!(-1.5));
        assert_eq!(day["close"], json!(98.5));
    }

    #[test]
    fn fewer_than_two_days_yields_zero_week_change() {
        let body = body(json!({
            "Time Series (Daily)": {
                "2024-08-27": bar("100.0", "101.0", "900"),
            }
        }));

        let record = parse(&body);

        assert_eq!(record["week_change"], json!(0.0));
        assert_eq!(record["week_change_percent"], json!(0.0));
    }

    #[test]
    fn zero_oldest_close_yields_zero_percent() {
        let body = body(json!({
            "Time Series (Daily)": {
                "2024-08-26": bar("0.0", "0.0", "0"),
                "2024-08-27": bar("1.0", "2.0", "100"),
            }
        }));

        let record = parse(&body);

        assert_eq!(record["week_change"], json!(2.0));
        assert_eq!(record["week_change_percent"], json!(0.0));
    }

    #[test]
    fn missing_series_yields_empty_record() {
        assert!(parse(&body(json!({ "Meta Data": {} }))).is_empty());
        assert!(parse(&body(json!({ "Time Series (Daily)": {} }))).is_empty());
    }
}
