//! Per-endpoint response parsers.
//!
//! Each parser takes an already-decoded response body and produces a flat
//! partial record. Parsers never fail: missing or malformed fields default to
//! zero / empty values, and a response without usable data yields an empty
//! record.

pub mod daily;
pub mod news;
pub mod overview;
pub mod quote;

/// Upstream numeric fields arrive as strings ("1234.56").
pub(crate) fn parse_f64(field: &str) -> f64 {
    field.trim().parse().unwrap_or(0.0)
}

pub(crate) fn parse_i64(field: &str) -> i64 {
    field.trim().parse().unwrap_or(0)
}

/// First `max_chars` characters plus an ellipsis; empty input stays empty.
pub(crate) fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.is_empty() {
        return String::new();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{head}...")
}

pub(crate) fn round_to(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    (value * scale).round() / scale
}
