//! Show command handlers

use anyhow::{bail, Context, Result};

use telly_core::{AddOutcome, HttpApi, Synchronizer};

use crate::output::Output;
use crate::prompt::confirm;

/// Track a show by catalog id; the server resolves the metadata
pub async fn add(
    sync: &mut Synchronizer<HttpApi>,
    catalog_id: String,
    output: &Output,
) -> Result<()> {
    let outcome = sync
        .add_show(&catalog_id)
        .await
        .context("Failed to add show")?;

    match outcome {
        AddOutcome::Added(show) => output.success(&format!("Now tracking: {}", show.name)),
        AddOutcome::Skipped(show) => output.message(&format!("Already tracking: {}", show.name)),
    }

    Ok(())
}

/// Track a show via an explicit catalog metadata fetch
pub async fn import(
    sync: &mut Synchronizer<HttpApi>,
    catalog_id: String,
    output: &Output,
) -> Result<()> {
    sync.load_all().await.context("Failed to load shows")?;

    let outcome = sync
        .import_show(&catalog_id)
        .await
        .context("Failed to import show")?;

    match outcome {
        AddOutcome::Added(show) => output.success(&format!("Now tracking: {}", show.name)),
        AddOutcome::Skipped(show) => output.message(&format!("Already tracking: {}", show.name)),
    }

    Ok(())
}

/// List tracked shows, hiding ignored ones unless asked
pub async fn list(
    sync: &mut Synchronizer<HttpApi>,
    include_ignored: bool,
    output: &Output,
) -> Result<()> {
    sync.load_all().await.context("Failed to load shows")?;

    let shows: Vec<_> = sync
        .shows()
        .iter()
        .filter(|s| include_ignored || !s.ignored)
        .collect();

    output.print_shows(&shows, sync.episodes());
    Ok(())
}

/// Preview catalog metadata for an untracked show
pub async fn info(
    sync: &mut Synchronizer<HttpApi>,
    catalog_id: String,
    output: &Output,
) -> Result<()> {
    let show = sync
        .catalog_preview(&catalog_id)
        .await
        .context("Failed to fetch catalog metadata")?;

    output.print_catalog_show(&show);
    Ok(())
}

/// Stop tracking a show
pub async fn delete(
    sync: &mut Synchronizer<HttpApi>,
    show_id: String,
    output: &Output,
) -> Result<()> {
    sync.load_all().await.context("Failed to load shows")?;

    let Some(show) = sync.show(&show_id) else {
        bail!("Show not tracked: {}", show_id);
    };
    let name = show.name.clone();

    // Confirm deletion
    if output.should_prompt() {
        println!("Delete show: {} - {}", show_id, name);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    sync.delete_show(&show_id)
        .await
        .context("Failed to delete show")?;

    output.success(&format!("Stopped tracking: {}", name));
    Ok(())
}

/// Toggle whether a show is ignored
pub async fn ignore(
    sync: &mut Synchronizer<HttpApi>,
    show_id: String,
    output: &Output,
) -> Result<()> {
    let ignored = sync
        .toggle_show_ignored(&show_id)
        .await
        .context("Failed to toggle ignored flag")?;

    output.success(&format!(
        "Show {} is now {}",
        show_id,
        if ignored { "ignored" } else { "visible" }
    ));
    Ok(())
}
