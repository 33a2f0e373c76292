//! Envoy monitor command-line driver
//!
//! Prints the Envoy's generation figures and device status once, or every
//! `POLL_INTERVAL_SEC` seconds until interrupted.
//!
//! # Configuration
//!
//! - `ENVOY_HOST` (required): device address
//! - `ENVOY_CACHE_TIMEOUT_SEC`, `ENVOY_REQUEST_TIMEOUT_SEC`, `ENVOY_SYSTEM_STATS_ROWS`
//! - `POLL_INTERVAL_SEC`: repeat interval; print once when unset
//! - `LOG_LEVEL`: tracing level, default `info`

use anyhow::Context;
use envoy_monitor::config;
use envoy_monitor::{Envoy, EnvoySummary, Page, Result};
use tokio::signal::ctrl_c;
use tokio::signal::unix::{signal, SignalKind};
use tokio::time::{self, Duration};

#[tokio::main]
async fn main() {
    let app_config = config::load_app_config().expect("Failed to load AppConfig");
    tracing_subscriber::fmt()
        .with_max_level(app_config.log_level())
        .init();

    if let Err(err) = run().await {
        tracing::error!(error = ?err, "Envoy monitor failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let envoy_config = config::load_envoy_config()?;
    let poll_config = config::load_poll_config()?;

    let mut envoy = Envoy::new(&envoy_config).context("Failed to create HTTP client")?;
    tracing::info!(
        host = %envoy_config.host,
        cache_timeout_sec = envoy.cache_timeout().as_secs(),
        "Connected to Envoy"
    );

    let Some(interval_sec) = poll_config.interval_sec else {
        print_summary(&envoy.summary().await?);
        return Ok(());
    };

    let mut interval = time::interval(Duration::from_secs(interval_sec.max(1)));
    let mut sig_term =
        signal(SignalKind::terminate()).context("Failed to register SIGTERM handler")?;
    tracing::info!("Running... Press Ctrl-C or send SIGTERM to terminate.");

    loop {
        tokio::select! {
            _ = sig_term.recv() => {
                tracing::info!("Received SIGTERM. Exiting...");
                break;
            }
            _ = ctrl_c() => {
                tracing::info!("Received SIGINT. Exiting...");
                break;
            }
            _ = interval.tick() => {
                // a bad poll is reported and the next tick tries again
                match envoy.summary().await {
                    Ok(summary) => print_summary(&summary),
                    Err(err) => tracing::error!(error = ?err, "Failed to read Envoy"),
                }
                if let Some(at) = envoy.last_fetched_at(Page::SystemStats) {
                    tracing::debug!(last_fetch = %at.format("%H:%M:%S"), "System statistics age");
                }
            }
        }
    }

    Ok(())
}

fn print_summary(summary: &EnvoySummary) {
    println!("Current generation: {}", summary.current_generation);
    println!("Today's generation: {}", summary.generation_today);
    println!("Past week generation: {}", summary.generation_past_week);
    println!("Lifetime generation: {}", summary.lifetime_generation);
    println!("Number of Microinverters: {}", summary.microinverters);
    println!(
        "Number of Microinverters Online: {}",
        summary.microinverters_online
    );
    println!("Current software version: {}", summary.software_version);
    println!("Software build date: {}", summary.software_build_date);
    println!(
        "Last cloud connection: {}",
        summary.last_connection_to_website
    );
}
