//! Company overview parser (`OVERVIEW`).

use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::truncate_with_ellipsis;

const DESCRIPTION_MAX_CHARS: usize = 200;

#[derive(Debug, Default, Deserialize)]
struct CompanyOverview {
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "Sector", default)]
    sector: String,
    #[serde(rename = "Industry", default)]
    industry: String,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "MarketCapitalization", default)]
    market_cap: String,
    #[serde(rename = "PERatio", default)]
    pe_ratio: String,
    #[serde(rename = "DividendYield", default)]
    dividend_yield: String,
    #[serde(rename = "EPS", default)]
    eps: String,
    #[serde(rename = "Beta", default)]
    beta: String,
}

/// A usable overview carries the canonical `Symbol` field; anything else
/// yields an empty record.
pub fn parse(body: &Map<String, Value>) -> Map<String, Value> {
    if !body.contains_key("Symbol") {
        return Map::new();
    }

    let overview: CompanyOverview =
        serde_json::from_value(Value::Object(body.clone())).unwrap_or_default();

    let mut record = Map::new();
    record.insert(String::from("company_name"), json!(overview.name));
    record.insert(String::from("sector"), json!(overview.sector));
    record.insert(String::from("industry"), json!(overview.industry));
    record.insert(
        String::from("description"),
        json!(truncate_with_ellipsis(
            &overview.description,
            DESCRIPTION_MAX_CHARS
        )),
    );
    record.insert(String::from("market_cap"), json!(overview.market_cap));
    record.insert(String::from("pe_ratio"), json!(overview.pe_ratio));
    record.insert(
        String::from("dividend_yield"),
        json!(overview.dividend_yield),
    );
    record.insert(String::from("eps"), json!(overview.eps));
    record.insert(String::from("beta"), json!(overview.beta));
    record
}
