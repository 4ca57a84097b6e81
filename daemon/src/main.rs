//! govwatch daemon — entry point for the governance vote exporter.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use govwatch_chain::{ChainClient, RetryPolicy};
use govwatch_daemon::logging::{init_logging, LogFormat};
use govwatch_daemon::{server, ExporterConfig, Scheduler, ShutdownController};
use govwatch_engine::Reconciler;
use govwatch_metrics::ExporterMetrics;

#[derive(Parser)]
#[command(name = "govwatch", about = "Governance vote exporter for Cosmos chains")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "govwatch.toml", env = "GOVWATCH_CONFIG")]
    config: PathBuf,

    /// Listen address for the metrics server (overrides the config file).
    #[arg(long, env = "GOVWATCH_LISTEN_ADDR")]
    listen_addr: Option<String>,

    /// Seconds between poll cycles (overrides the config file).
    #[arg(long, env = "GOVWATCH_SCRAPE_INTERVAL")]
    scrape_interval_secs: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error"
    /// (overrides the config file).
    #[arg(long, env = "GOVWATCH_LOG_LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ExporterConfig::from_toml_file(&cli.config)?;
    if let Some(listen_addr) = cli.listen_addr {
        config.listen_addr = listen_addr;
    }
    if let Some(interval) = cli.scrape_interval_secs {
        config.scrape_interval_secs = interval;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    config.validate()?;

    init_logging(LogFormat::from_config(&config.log_format), &config.log_level);
    tracing::info!(
        config = %cli.config.display(),
        chains = config.chains.len(),
        interval_secs = config.scrape_interval_secs,
        "starting govwatch"
    );

    let metrics = Arc::new(ExporterMetrics::new());

    let request_timeout = Duration::from_secs(config.request_timeout_secs);
    let retry = RetryPolicy {
        max_retries: config.vote_max_retries,
        wait: Duration::from_secs(config.vote_retry_wait_secs),
    };
    let reconcilers: Vec<Reconciler> = config
        .chains
        .iter()
        .cloned()
        .map(|target| {
            let client = ChainClient::with_timeout(&target.node_url, request_timeout)
                .with_proposals_page_size(config.proposals_page_size)
                .with_voters_page_size(config.voters_page_size);
            Reconciler::new(target, client, retry)
        })
        .collect();

    let scheduler = Scheduler::new(
        reconcilers,
        metrics.clone(),
        Duration::from_secs(config.scrape_interval_secs),
    );

    let shutdown = ShutdownController::new();
    let listen_addr = config.listen_socket_addr()?;

    let server_handle = tokio::spawn(server::serve(
        listen_addr,
        metrics.clone(),
        shutdown.subscribe(),
    ));
    let scheduler_rx = shutdown.subscribe();
    let scheduler_handle = tokio::spawn(async move { scheduler.run(scheduler_rx).await });

    shutdown.wait_for_signal().await;

    scheduler_handle.await?;
    server_handle.await??;

    tracing::info!("govwatch exited cleanly");
    Ok(())
}
