//! Real-time quote parser (`GLOBAL_QUOTE`).

use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::parse_f64;

#[derive(Debug, Default, Deserialize)]
struct GlobalQuote {
    #[serde(rename = "02. open", default)]
    open: String,
    #[serde(rename = "03. high", default)]
    high: String,
    #[serde(rename = "04. low", default)]
    low: String,
    #[serde(rename = "05. price", default)]
    price: String,
    #[serde(rename = "06. volume", default)]
    volume: String,
    #[serde(rename = "07. latest trading day", default)]
    latest_trading_day: String,
    #[serde(rename = "08. previous close", default)]
    previous_close: String,
    #[serde(rename = "09. change", default)]
    change: String,
    #[serde(rename = "10. change percent", default)]
    change_percent: String,
}

/// Flattens the nested `Global Quote` object; absent or empty object yields
/// an empty record.
pub fn parse(body: &Map<String, Value>) -> Map<String, Value> {
    let Some(raw) = body.get("Global Quote").and_then(Value::as_object) else {
        return Map::new();
    };
    if raw.is_empty() {
        return Map::new();
    }

    let quote: GlobalQuote =
        serde_json::from_value(Value::Object(raw.clone())).unwrap_or_default();

    let change_percent = if quote.change_percent.is_empty() {
        String::from("0")
    } else {
        quote.change_percent.trim_end_matches('%').to_owned()
    };
    let volume = if quote.volume.is_empty() {
        String::from("0")
    } else {
        quote.volume
    };

    let mut record = Map::new();
    record.insert(String::from("current_price"), json!(parse_f64(&quote.price)));
    record.insert(String::from("change"), json!(parse_f64(&quote.change)));
    record.insert(String::from("change_percent"), json!(change_percent));
    record.insert(String::from("volume"), json!(volume));
    record.insert(
        String::from("previous_close"),
        json!(parse_f64(&quote.previous_close)),
    );
    record.insert(String::from("open"), json!(parse_f64(&quote.open)));
    record.insert(String::from("high"), json!(parse_f64(&quote.high)));
    record.insert(String::from("low"), json!(parse_f64(&quote.low)));
    record.insert(
        String::from("latest_trading_day"),
        json!(quote.latest_trading_day),
    );
    record
}
