//! Episode command handlers

use anyhow::{Context, Result};
use chrono::Utc;

use telly_core::{HttpApi, Synchronizer};

use crate::output::Output;

/// List a show's episodes in season/number order
pub async fn list(
    sync: &mut Synchronizer<HttpApi>,
    show_id: String,
    unwatched_only: bool,
    output: &Output,
) -> Result<()> {
    sync.load_all().await.context("Failed to load shows")?;

    if sync.show(&show_id).is_none() {
        output.message(&format!("Show not tracked: {}", show_id));
        return Ok(());
    }

    let now = Utc::now();
    let mut episodes = sync.episodes_of(&show_id);
    episodes.sort_by_key(|e| (e.season, e.number));

    if unwatched_only {
        episodes.retain(|e| e.is_released(now) && !e.watched);
    }

    output.print_episodes(&episodes);
    Ok(())
}

/// Toggle an episode's watched flag
pub async fn watch(
    sync: &mut Synchronizer<HttpApi>,
    episode_id: String,
    output: &Output,
) -> Result<()> {
    sync.load_all().await.context("Failed to load shows")?;

    let watched = sync
        .toggle_episode_watched(&episode_id)
        .await
        .context("Failed to toggle watched flag")?;

    if let Some(episode) = sync.episodes().iter().find(|e| e.id == episode_id) {
        output.success(&format!(
            "{} {} ({}) marked {}",
            episode.show_name,
            episode.label(),
            episode.name,
            if watched { "watched" } else { "unwatched" }
        ));
    }
    Ok(())
}
