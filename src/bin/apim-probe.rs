//! APIM Probe CLI
//!
//! Sends a test prompt to every model in the config and logs the outcome.

use anyhow::Result;
use apim_probe::config::DEFAULT_CONFIG_PATH;
use apim_probe::{telemetry, HttpModelTester, TelemetryOptions};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "apim-probe")]
#[command(about = "Smoke-test OpenAI-compatible model endpoints behind an API gateway", long_about = None)]
struct Cli {
    /// Path to the YAML config listing the models to test
    #[arg(short, long, env = "APIM_PROBE_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log JSON lines instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<ExitCode> {
    // Pick up RUST_LOG / APIM_PROBE_CONFIG from a local .env
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    telemetry::init(TelemetryOptions {
        verbose: cli.verbose,
        json: cli.json,
    });

    // One model at a time; no worker threads needed
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let code = runtime.block_on(apim_probe::run(&cli.config, &HttpModelTester::new()));
    Ok(ExitCode::from(code))
}
