use thiserror::Error;

use crate::endpoint::Endpoint;
use crate::http_client::HttpError;
use crate::symbol::Symbol;

/// Input validation errors raised before any upstream call.
///
/// Individual symbols are never rejected here: normalization passes
/// unrecognized input through and the upstream's per-call error degrades
/// that one record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol list cannot be empty")]
    EmptyBatch,
}

/// Failure classification for one endpoint fetch.
///
/// `Http`, `Network`, and `Decode` are per-attempt classifications consumed
/// by the retry loop; only `Upstream` and `ExhaustedRetries` escape
/// [`Fetcher::fetch`](crate::fetcher::Fetcher::fetch).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("upstream returned status {status}")]
    Http { status: u16 },

    #[error("transport failure: {0}")]
    Network(#[from] HttpError),

    #[error("response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// Explicit error payload from the upstream; never retried.
    #[error("[{symbol}] upstream error: {message}")]
    Upstream { symbol: Symbol, message: String },

    /// Retry budget exceeded for one endpoint. Fatal for that endpoint only.
    #[error("[{symbol}] {endpoint} request failed after {attempts} attempts")]
    ExhaustedRetries {
        endpoint: Endpoint,
        symbol: Symbol,
        attempts: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_and_decode_failures_convert_into_fetch_errors() {
        let network = FetchError::from(HttpError::new("connection reset"));
        assert!(matches!(network, FetchError::Network(_)));
        assert_eq!(network.to_string(), "transport failure: connection reset");

        let json_error = serde_json::from_str::<serde_json::Value>("<html>")
            .expect_err("not JSON");
        assert!(matches!(FetchError::from(json_error), FetchError::Decode(_)));
    }
}
