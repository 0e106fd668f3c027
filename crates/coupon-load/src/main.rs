#![doc = include_str!("../README.md")]

mod load;

use clap::Parser;
use load::{
    config::{CliArgs, LoadConfig},
    driver,
    telemetry::init_telemetry,
};

// Using mimalloc for better performance under contention, especially in musl
// environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = LoadConfig::try_from(args)?;

    init_telemetry()?;
    log_startup_info(&config);

    let report = driver::run(&config).await?;
    report.log();
    report.verify(&config)?;

    tracing::info!("All invariants held");
    Ok(())
}

fn log_startup_info(config: &LoadConfig) {
    if cfg!(debug_assertions) {
        tracing::info!("Starting load run with full config: {:#?}", config);
    } else {
        tracing::info!(
            "Starting load run: {} attempts over {} workers against a quota of {}",
            config.attempts,
            config.workers,
            config.total
        );
    }
}
