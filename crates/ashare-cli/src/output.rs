//! Output writers: detailed JSON plus a flattened CSV projection.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use time::macros::format_description;
use time::OffsetDateTime;

use ashare_core::ComprehensiveRecord;

use crate::error::CliError;

/// Columns of the CSV projection, in output order. Each name is looked up
/// directly in the comprehensive record.
const CSV_COLUMNS: [&str; 11] = [
    "symbol",
    "company_name",
    "industry",
    "current_price",
    "change_percent",
    "week_change_percent",
    "volume",
    "market_cap",
    "pe_ratio",
    "recent_news_count",
    "avg_sentiment_score",
];

pub fn default_output_path() -> PathBuf {
    let stamp = OffsetDateTime::now_utc()
        .format(format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| String::from("latest"));
    PathBuf::from("data").join(format!("a_share_info_{stamp}.json"))
}

pub fn csv_path(json_path: &Path) -> PathBuf {
    json_path.with_extension("csv")
}

/// Writes the full record list as pretty-printed JSON, creating parent
/// directories as needed.
pub fn write_json(path: &Path, records: &[ComprehensiveRecord]) -> Result<(), CliError> {
    ensure_parent_dir(path)?;
    let payload = serde_json::to_string_pretty(records)?;
    fs::write(path, payload)?;
    Ok(())
}

/// Writes the flattened tabular projection.
pub fn write_csv(path: &Path, records: &[ComprehensiveRecord]) -> Result<(), CliError> {
    ensure_parent_dir(path)?;

    let mut out = String::new();
    out.push_str(&CSV_COLUMNS.join(","));
    out.push('\n');

    for record in records {
        let row = CSV_COLUMNS
            .iter()
            .map(|column| csv_field(record.get(*column)))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&row);
        out.push('\n');
    }

    fs::write(path, out)?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn csv_field(value: Option<&Value>) -> String {
    let text = match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    if text.contains(',') || text.contains('"') || text.contains('\n') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text
    }
}
