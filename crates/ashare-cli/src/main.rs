mod cli;
mod error;
mod output;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use ashare_core::{run_batch, FetchPolicy, Fetcher, RateGate, ReqwestHttpClient};

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();

    let api_key = cli
        .api_key
        .clone()
        .or_else(|| std::env::var("ALPHAVANTAGE_API_KEY").ok())
        .filter(|key| !key.trim().is_empty())
        .ok_or(CliError::MissingApiKey)?;

    let policy = FetchPolicy {
        max_retries: cli.max_retries.max(1),
        timeout: Duration::from_secs(cli.timeout),
        ..FetchPolicy::default()
    };
    let gate = Arc::new(RateGate::per_minute(cli.calls_per_minute));
    let fetcher = Fetcher::new(Arc::new(ReqwestHttpClient::new()), gate, api_key, policy);

    let records = run_batch(&fetcher, &cli.symbols).await?;

    let json_path = cli.output.clone().unwrap_or_else(output::default_output_path);
    output::write_json(&json_path, &records)?;
    let csv_path = output::csv_path(&json_path);
    output::write_csv(&csv_path, &records)?;

    info!(
        records = records.len(),
        json = %json_path.display(),
        csv = %csv_path.display(),
        "batch complete"
    );
    println!(
        "wrote {} records to {} (csv: {})",
        records.len(),
        json_path.display(),
        csv_path.display()
    );

    Ok(())
}
