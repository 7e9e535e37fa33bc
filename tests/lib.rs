//! Shared test support for the ashare workspace: scripted transports and a
//! millisecond-scale fetch policy so behavior tests run without real backoff
//! waits.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ashare_core::{
    Backoff, FetchPolicy, Fetcher, HttpClient, HttpError, HttpRequest, HttpResponse, RateGate,
};

/// Fetch policy with millisecond backoff steps and no pacing to speak of.
pub fn fast_policy(max_retries: u32) -> FetchPolicy {
    let fast = Backoff::new(Duration::from_millis(1), Duration::from_millis(5));
    FetchPolicy {
        max_retries,
        timeout: Duration::from_secs(1),
        transport_backoff: fast,
        shape_backoff: fast,
    }
}

/// Fetcher over a test transport, with a 1ms pacing interval.
pub fn fetcher_over(client: Arc<dyn HttpClient>, max_retries: u32) -> Fetcher {
    Fetcher::new(
        client,
        Arc::new(RateGate::with_interval(Duration::from_millis(1))),
        "test-key",
        fast_policy(max_retries),
    )
}

/// Transport that replays a scripted response sequence and records every
/// request. Once the script runs out it replays the fallback (`200 {}`).
pub struct ScriptedHttpClient {
    script: Mutex<Vec<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    fallback: Result<HttpResponse, HttpError>,
}

impl ScriptedHttpClient {
    pub fn new(script: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            script: Mutex::new(script),
            requests: Mutex::new(Vec::new()),
            fallback: Ok(HttpResponse::ok_json("{}")),
        }
    }

    /// Replays the same response for every request.
    pub fn always(response: Result<HttpResponse, HttpError>) -> Self {
        Self {
            script: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
            fallback: response,
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .expect("request log should not be poisoned")
            .len()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request log should not be poisoned")
            .clone()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.requests
            .lock()
            .expect("request log should not be poisoned")
            .push(request);

        let mut script = self
            .script
            .lock()
            .expect("script should not be poisoned");
        let response = if script.is_empty() {
            self.fallback.clone()
        } else {
            script.remove(0)
        };

        Box::pin(async move { response })
    }
}

/// Transport that routes by the `function` query parameter, independent of
/// request order. Unrouted functions get `200 {}`.
pub struct RoutedHttpClient {
    routes: HashMap<String, Result<HttpResponse, HttpError>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RoutedHttpClient {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn route(mut self, function: &str, response: Result<HttpResponse, HttpError>) -> Self {
        self.routes.insert(function.to_owned(), response);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request log should not be poisoned")
            .clone()
    }
}

impl Default for RoutedHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for RoutedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let response = request
            .param("function")
            .and_then(|function| self.routes.get(function))
            .cloned()
            .unwrap_or_else(|| Ok(HttpResponse::ok_json("{}")));

        self.requests
            .lock()
            .expect("request log should not be poisoned")
            .push(request);

        Box::pin(async move { response })
    }
}
