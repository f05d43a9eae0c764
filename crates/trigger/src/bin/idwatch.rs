//! idwatch: polls an identifier list and posts new entries to a webhook.
//!
//! Exits 0 after a graceful shutdown (SIGINT/SIGTERM) and non-zero when
//! configuration is missing or invalid, or the baseline poll fails.

use anyhow::Context;
use clap::Parser;
use tracing::info;

use idwatch_core::config::load_dotenv;
use idwatch_core::{Config, RawConfig};
use idwatch_trigger::{shutdown_signal, Trigger};

// ── CLI ─────────────────────────────────────────────────────────────

/// Watch an append-only list of record IDs and announce new ones.
#[derive(Parser, Debug)]
#[command(name = "idwatch", version, about)]
struct Cli {
    /// Endpoint returning a JSON array of record IDs.
    #[arg(long, env = "SOURCE_URL")]
    source_url: Option<String>,

    /// Webhook receiving `{"text": ...}` notifications.
    #[arg(long, env = "WEBHOOK_URL", hide_env_values = true)]
    webhook_url: Option<String>,

    /// Poll interval, e.g. 10s, 1m30s, 1.5s, 250ms (default 10s).
    #[arg(long, env = "POLL_INTERVAL")]
    poll_interval: Option<String>,

    /// Timeout for each outbound request (default 30s).
    #[arg(long, env = "REQUEST_TIMEOUT")]
    request_timeout: Option<String>,

    /// Minijinja template for the message text.
    #[arg(long, env = "MESSAGE_TEMPLATE")]
    message_template: Option<String>,
}

impl From<Cli> for RawConfig {
    fn from(cli: Cli) -> Self {
        RawConfig {
            source_url: cli.source_url,
            webhook_url: cli.webhook_url,
            poll_interval: cli.poll_interval,
            request_timeout: cli.request_timeout,
            message_template: cli.message_template,
        }
    }
}

// ── main ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let shutdown = shutdown_signal();
    let cli = Cli::parse();

    let config = Config::resolve(cli.into()).context("invalid configuration")?;
    config.log_summary();

    info!("initializing trigger");
    Trigger::serve_config(&config, shutdown)
        .await
        .context("trigger failed to start")?;

    info!("idwatch exited cleanly");
    Ok(())
}
