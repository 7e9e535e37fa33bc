//! # Ashare Core
//!
//! Rate-limited, retrying fetch orchestration for comprehensive A-share
//! information from the Alpha Vantage query API.
//!
//! The crate pulls four independent endpoints per symbol (real-time quote,
//! company overview, news sentiment, daily series), normalizes each response
//! into a flat partial record, and merges the partials into one comprehensive
//! record per symbol.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`symbol`] | A-share symbol suffix normalization |
//! | [`pacing`] | Process-wide call pacing for the free-tier quota |
//! | [`http_client`] | HTTP transport abstraction (reqwest/none) |
//! | [`backoff`] | Backoff schedules and the per-call fetch policy |
//! | [`endpoint`] | Upstream endpoint catalog and query recipes |
//! | [`fetcher`] | Rate-limited retrying fetch loop |
//! | [`adapters`] | Per-endpoint response parsers |
//! | [`aggregate`] | Per-symbol merge with per-endpoint failure isolation |
//! | [`batch`] | Ordered batch driver over a symbol list |
//!
//! ## Control flow
//!
//! ```text
//! run_batch -> fetch_comprehensive -> { 4 x (adapter parse <- Fetcher) }
//!                                              Fetcher -> RateGate -> HttpClient
//! ```
//!
//! Endpoint-level failures degrade to empty partial records at the aggregator
//! boundary; a failing endpoint never aborts its siblings or other symbols.

pub mod adapters;
pub mod aggregate;
pub mod backoff;
pub mod batch;
pub mod endpoint;
pub mod error;
pub mod fetcher;
pub mod http_client;
pub mod pacing;
pub mod symbol;

pub use aggregate::{fetch_comprehensive, ComprehensiveRecord, PartialRecord};
pub use backoff::{Backoff, FetchPolicy};
pub use batch::run_batch;
pub use endpoint::{Endpoint, EndpointSpec};
pub use error::{FetchError, ValidationError};
pub use fetcher::{Fetcher, ALPHAVANTAGE_QUERY_URL};
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};
pub use pacing::RateGate;
pub use symbol::Symbol;
