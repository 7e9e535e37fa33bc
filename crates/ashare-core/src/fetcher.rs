//! Rate-limited retrying fetch loop shared by every endpoint and symbol.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::backoff::FetchPolicy;
use crate::endpoint::EndpointSpec;
use crate::error::FetchError;
use crate::http_client::{HttpClient, HttpRequest};
use crate::pacing::RateGate;
use crate::symbol::Symbol;

pub const ALPHAVANTAGE_QUERY_URL: &str = "https://www.alphavantage.co/query";

const THROTTLE_NOTE_KEYS: [&str; 2] = ["Note", "Information"];
const ERROR_MESSAGE_KEY: &str = "Error Message";

/// Retrying fetcher over one shared [`RateGate`] and transport.
///
/// One instance is shared for a whole batch run, so overall throughput is
/// capped by the gate's interval regardless of how many symbols or endpoints
/// are in flight.
pub struct Fetcher {
    http_client: Arc<dyn HttpClient>,
    gate: Arc<RateGate>,
    api_key: String,
    base_url: String,
    policy: FetchPolicy,
}

impl Fetcher {
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        gate: Arc<RateGate>,
        api_key: impl Into<String>,
        policy: FetchPolicy,
    ) -> Self {
        Self {
            http_client,
            gate,
            api_key: api_key.into(),
            base_url: String::from(ALPHAVANTAGE_QUERY_URL),
            policy,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetches one endpoint for one symbol, retrying per the policy.
    ///
    /// Each attempt waits on the gate, performs one GET, and classifies the
    /// outcome:
    ///
    /// - transport failure, non-200 status, undecodable body: linear backoff,
    ///   next attempt
    /// - soft-throttle note (`Note` / `Information`): endpoint-scaled
    ///   backoff, next attempt
    /// - explicit `Error Message` payload: fails immediately, never retried
    /// - success marker present: returns the decoded body
    /// - well-formed but unexpected shape: soft backoff, next attempt
    ///
    /// # Errors
    ///
    /// [`FetchError::Upstream`] on an explicit error payload,
    /// [`FetchError::ExhaustedRetries`] once the attempt budget is spent.
    pub async fn fetch(
        &self,
        spec: &EndpointSpec,
        symbol: &Symbol,
    ) -> Result<Map<String, Value>, FetchError> {
        let request = self.build_request(spec, symbol);

        for attempt in 1..=self.policy.max_retries {
            self.gate.acquire().await;

            let response = match self.http_client.execute(request.clone()).await {
                Ok(response) => response,
                Err(error) => {
                    let error = FetchError::Network(error);
                    warn!(symbol = %symbol, endpoint = %spec.endpoint, attempt, "{error}");
                    tokio::time::sleep(self.policy.transport_backoff.delay(attempt)).await;
                    continue;
                }
            };

            if !response.is_success() {
                let error = FetchError::Http {
                    status: response.status,
                };
                warn!(symbol = %symbol, endpoint = %spec.endpoint, attempt, "{error}");
                tokio::time::sleep(self.policy.transport_backoff.delay(attempt)).await;
                continue;
            }

            let body: Value = match serde_json::from_str(&response.body) {
                Ok(body) => body,
                Err(error) => {
                    let error = FetchError::Decode(error);
                    warn!(symbol = %symbol, endpoint = %spec.endpoint, attempt, "{error}");
                    tokio::time::sleep(self.policy.transport_backoff.delay(attempt)).await;
                    continue;
                }
            };

            let Some(fields) = body.as_object() else {
                debug!(symbol = %symbol, endpoint = %spec.endpoint, attempt, "non-object body");
                tokio::time::sleep(self.policy.shape_backoff.delay(attempt)).await;
                continue;
            };

            if THROTTLE_NOTE_KEYS.iter().any(|key| fields.contains_key(*key)) {
                let delay = spec.throttle_backoff.delay(attempt);
                warn!(
                    symbol = %symbol,
                    endpoint = %spec.endpoint,
                    attempt,
                    wait_s = delay.as_secs(),
                    "upstream throttle note, backing off"
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            if let Some(message) = fields.get(ERROR_MESSAGE_KEY) {
                let message = message
                    .as_str()
                    .map(str::to_owned)
                    .unwrap_or_else(|| message.to_string());
                return Err(FetchError::Upstream {
                    symbol: symbol.clone(),
                    message,
                });
            }

            if fields.contains_key(spec.success_marker) {
                return Ok(fields.clone());
            }

            debug!(
                symbol = %symbol,
                endpoint = %spec.endpoint,
                attempt,
                marker = spec.success_marker,
                "response lacks expected payload"
            );
            tokio::time::sleep(self.policy.shape_backoff.delay(attempt)).await;
        }

        Err(FetchError::ExhaustedRetries {
            endpoint: spec.endpoint,
            symbol: symbol.clone(),
            attempts: self.policy.max_retries,
        })
    }

    fn build_request(&self, spec: &EndpointSpec, symbol: &Symbol) -> HttpRequest {
        let mut request = HttpRequest::get(&self.base_url)
            .with_param("function", spec.function)
            .with_param("symbol", symbol.as_str())
            .with_param("apikey", &self.api_key)
            .with_param("datatype", "json")
            .with_timeout_ms(self.policy.timeout.as_millis() as u64);

        for (name, value) in &spec.extra_params {
            request = request.with_param(*name, value.clone());
        }

        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backoff::FetchPolicy;
    use crate::http_client::NoopHttpClient;
    use std::time::Duration;

    fn fetcher() -> Fetcher {
        Fetcher::new(
            Arc::new(NoopHttpClient),
            Arc::new(RateGate::with_interval(Duration::from_millis(1))),
            "demo",
            FetchPolicy::default(),
        )
    }

    #[test]
    fn request_carries_common_and_extra_parameters() {
        let fetcher = fetcher();
        let symbol = Symbol::normalize("600519");
        let spec = EndpointSpec::news_sentiment(String::from("20240801T0000"));

        let request = fetcher.build_request(&spec, &symbol);

        assert_eq!(request.url, ALPHAVANTAGE_QUERY_URL);
        assert_eq!(request.param("function"), Some("NEWS_SENTIMENT"));
        assert_eq!(request.param("symbol"), Some("600519.SHH"));
        assert_eq!(request.param("apikey"), Some("demo"));
        assert_eq!(request.param("datatype"), Some("json"));
        assert_eq!(request.param("time_from"), Some("20240801T0000"));
        assert_eq!(request.param("limit"), Some("50"));
        assert_eq!(request.timeout_ms, 20_000);
    }
}
