use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::backoff::Backoff;

/// Upstream endpoints combined into one comprehensive record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Quote,
    Overview,
    NewsSentiment,
    DailySeries,
}

impl Endpoint {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quote => "quote",
            Self::Overview => "overview",
            Self::NewsSentiment => "news_sentiment",
            Self::DailySeries => "daily_series",
        }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query recipe for one endpoint: the upstream `function` value, extra query
/// parameters, the top-level key that marks a usable payload, and the
/// soft-throttle backoff schedule for this endpoint.
#[derive(Debug, Clone)]
pub struct EndpointSpec {
    pub endpoint: Endpoint,
    pub function: &'static str,
    pub extra_params: Vec<(&'static str, String)>,
    pub success_marker: &'static str,
    pub throttle_backoff: Backoff,
}

impl EndpointSpec {
    /// Real-time quote (`GLOBAL_QUOTE`).
    pub fn quote() -> Self {
        Self {
            endpoint: Endpoint::Quote,
            function: "GLOBAL_QUOTE",
            extra_params: Vec::new(),
            success_marker: "Global Quote",
            throttle_backoff: Backoff::THROTTLE,
        }
    }

    /// Company overview (`OVERVIEW`).
    pub fn overview() -> Self {
        Self {
            endpoint: Endpoint::Overview,
            function: "OVERVIEW",
            extra_params: Vec::new(),
            success_marker: "Symbol",
            throttle_backoff: Backoff::THROTTLE,
        }
    }

    /// News sentiment (`NEWS_SENTIMENT`), scoped to a lookback window start
    /// in `YYYYMMDDTHHMM` form and capped at 50 feed items.
    pub fn news_sentiment(time_from: String) -> Self {
        Self {
            endpoint: Endpoint::NewsSentiment,
            function: "NEWS_SENTIMENT",
            extra_params: vec![("time_from", time_from), ("limit", String::from("50"))],
            success_marker: "feed",
            throttle_backoff: Backoff::THROTTLE_NEWS,
        }
    }

    /// Compact daily series (`TIME_SERIES_DAILY`).
    pub fn daily_series() -> Self {
        Self {
            endpoint: Endpoint::DailySeries,
            function: "TIME_SERIES_DAILY",
            extra_params: vec![("outputsize", String::from("compact"))],
            success_marker: "Time Series (Daily)",
            throttle_backoff: Backoff::THROTTLE,
        }
    }
}
