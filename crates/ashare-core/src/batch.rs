//! Ordered batch driver over a raw symbol list.

use tracing::info;

use crate::aggregate::{fetch_comprehensive, ComprehensiveRecord};
use crate::error::ValidationError;
use crate::fetcher::Fetcher;
use crate::symbol::Symbol;

/// Normalizes each raw symbol and fetches its comprehensive record, strictly
/// in input order over the fetcher's shared gate and transport.
///
/// # Errors
///
/// [`ValidationError::EmptyBatch`] for an empty list, raised before any
/// upstream call. Individual symbols never fail the batch: unrecognized
/// input passes through normalization and degrades only its own record.
pub async fn run_batch(
    fetcher: &Fetcher,
    raw_symbols: &[String],
) -> Result<Vec<ComprehensiveRecord>, ValidationError> {
    if raw_symbols.is_empty() {
        return Err(ValidationError::EmptyBatch);
    }

    let symbols: Vec<Symbol> = raw_symbols
        .iter()
        .map(|raw| Symbol::normalize(raw))
        .collect();

    let mut records = Vec::with_capacity(symbols.len());
    for symbol in &symbols {
        info!(symbol = %symbol, "fetching comprehensive info");
        records.push(fetch_comprehensive(fetcher, symbol).await);
        info!(symbol = %symbol, "symbol complete");
    }

    Ok(records)
}
