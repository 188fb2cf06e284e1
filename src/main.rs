// Bar roster batch scraper.
//
// Walks the configured bar-number range through a headless browser and
// appends active members to a timestamped CSV file.

use anyhow::{Context, Result};
use log::{error, info};
use tracing_subscriber::EnvFilter;

use barscrape::ScrapeConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .context("usage: barscrape <config.json>")?;
    let config = ScrapeConfig::from_json_file(&config_path)?;

    match barscrape::scrape(config).await {
        Ok(summary) => {
            info!("done: {summary}");
            Ok(())
        }
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    }
}
