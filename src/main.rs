use anyhow::{bail, Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use reel_view_tracker::config::Config;
use reel_view_tracker::report;
use reel_view_tracker::scanner::{ScanError, Scanner};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    init_tracing()?;

    let mut args = std::env::args().skip(1);
    let (Some(username), Some(stop_url)) = (args.next(), args.next()) else {
        bail!("usage: reel-view-tracker <username> <stop-reel-url>");
    };

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!(ig_user_id = %config.ig_user_id, api_version = %config.graph_api_version, "Configuration loaded");

    let scanner = Scanner::from_config(&config).context("Failed to create Graph API client")?;

    match scanner.scan(&username, &stop_url).await {
        Ok(result) => {
            print!("{}", report::render(&result));
            Ok(())
        }
        Err(ScanError::Aborted { source, partial }) => {
            // Keep whatever was counted before the failure.
            if !partial.reels().is_empty() {
                print!("{}", report::render(&partial));
            }
            Err(source).context("Scan did not complete, totals above are partial")
        }
        Err(e) => Err(e.into()),
    }
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reel_view_tracker=debug"));

    // Check if JSON logging is requested
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| matches!(v.to_lowercase().as_str(), "json" | "structured"))
        .unwrap_or(false);

    if use_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    }

    Ok(())
}
