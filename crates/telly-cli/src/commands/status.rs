//! Status command handler

use anyhow::{Context, Result};
use chrono::Utc;

use telly_core::{Config, HttpApi, Synchronizer};

use crate::output::{Output, OutputFormat};

/// Show backend and cache status
pub async fn show(
    config: &Config,
    sync: &mut Synchronizer<HttpApi>,
    output: &Output,
) -> Result<()> {
    sync.load_all().await.context("Failed to load shows")?;

    let now = Utc::now();
    let unwatched = sync
        .episodes()
        .iter()
        .filter(|e| e.is_released(now) && !e.watched)
        .count();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "api_url": config.api_url,
                    "authenticated": config.is_authenticated(),
                    "counts": {
                        "shows": sync.shows().len(),
                        "episodes": sync.episodes().len(),
                        "unwatched": unwatched
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!(
                "{}",
                if config.is_authenticated() {
                    "authenticated"
                } else {
                    "unauthenticated"
                }
            );
        }
        OutputFormat::Human => {
            println!("Telly Status");
            println!("============");
            println!();
            println!("Backend:");
            println!("  URL:  {}", config.api_url);
            println!(
                "  Auth: {}",
                if config.is_authenticated() {
                    "authenticated"
                } else {
                    "no token configured"
                }
            );
            println!();
            println!("Contents:");
            println!("  Shows:    {}", sync.shows().len());
            println!(
                "  Episodes: {} ({} released and unwatched)",
                sync.episodes().len(),
                unwatched
            );
        }
    }

    Ok(())
}
