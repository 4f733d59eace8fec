//! Refresh command handler

use anyhow::{Context, Result};

use telly_core::{HttpApi, Synchronizer};

use crate::output::Output;

/// Refresh catalog metadata for all tracked shows, then resynchronize
pub async fn run(sync: &mut Synchronizer<HttpApi>, output: &Output) -> Result<()> {
    output.message("Refreshing catalog metadata...");

    let report = sync
        .refresh_shows()
        .await
        .context("Failed to refresh shows")?;

    output.success(&format!(
        "Refreshed - tracking {} show(s), {} episode(s)",
        sync.shows().len(),
        sync.episodes().len()
    ));

    // Per-show failures are informational; nothing was rolled back
    if let Some(summary) = report.summary() {
        output.message(&summary);
    }

    Ok(())
}
