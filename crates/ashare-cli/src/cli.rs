//! CLI argument definitions for ashare.

use std::path::PathBuf;

use clap::Parser;

/// Fetch comprehensive A-share information from Alpha Vantage.
///
/// For each symbol the tool pulls the real-time quote, company overview,
/// recent news sentiment, and a week of daily bars, merges them into one
/// record, and writes a JSON file plus a flattened CSV projection.
#[derive(Debug, Parser)]
#[command(name = "ashare", version, about = "Comprehensive A-share info fetcher")]
pub struct Cli {
    /// A-share codes such as 600519 or 000001.SZ; normalized to .SHH/.SHZ.
    #[arg(short, long, num_args = 1.., required = true)]
    pub symbols: Vec<String>,

    /// Alpha Vantage API key; falls back to the ALPHAVANTAGE_API_KEY
    /// environment variable.
    #[arg(short = 'k', long)]
    pub api_key: Option<String>,

    /// Output JSON path (default data/a_share_info_<timestamp>.json).
    /// The CSV projection is written next to it.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Upstream calls per minute across all endpoints and symbols
    /// (free tier tolerates at most 3).
    #[arg(long, default_value_t = 3)]
    pub calls_per_minute: u32,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 20)]
    pub timeout: u64,

    /// Attempts per endpoint before it degrades to an empty record.
    #[arg(long, default_value_t = 3)]
    pub max_retries: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_symbols_and_defaults() {
        let cli = Cli::parse_from(["ashare", "--symbols", "600519", "000001"]);

        assert_eq!(cli.symbols, vec!["600519", "000001"]);
        assert_eq!(cli.calls_per_minute, 3);
        assert_eq!(cli.timeout, 20);
        assert_eq!(cli.max_retries, 3);
        assert!(cli.api_key.is_none());
        assert!(cli.output.is_none());
    }

    #[test]
    fn symbols_are_required() {
        assert!(Cli::try_parse_from(["ashare"]).is_err());
    }
}
