//! Client state synchronizer
//!
//! The `Synchronizer` owns the in-memory cache of tracked shows and their
//! episodes, and mediates every mutation through the backend. Deletion is
//! optimistic (apply locally, roll back on failure); everything else waits
//! for the server before touching the cache. The cache is the caller's only
//! source of truth for rendering.
//!
//! ## Usage
//!
//! ```ignore
//! let mut sync = Synchronizer::new(HttpApi::new(&config));
//! sync.load_all().await?;
//!
//! for show in sync.shows() {
//!     println!("{}", show.name);
//! }
//! ```
//!
//! All operations take `&mut self` and run to completion, including their
//! awaited network round-trips, before the next operation's mutations can
//! be applied. No locks are needed.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::{ApiError, ShowsApi};
use crate::models::{AddOutcome, CatalogShow, Episode, NewShow, RefreshReport, Show};

/// Errors surfaced by synchronizer operations
#[derive(Error, Debug)]
pub enum SyncError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The episode id is not in the cache, so its watched flag is unknown
    #[error("episode not found: {0}")]
    UnknownEpisode(String),
}

/// In-memory cache of shows and episodes, kept consistent with the backend
pub struct Synchronizer<A> {
    api: A,
    shows: Vec<Show>,
    episodes: Vec<Episode>,
}

impl<A: ShowsApi> Synchronizer<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            shows: Vec::new(),
            episodes: Vec::new(),
        }
    }

    /// Read-only view of the tracked shows
    pub fn shows(&self) -> &[Show] {
        &self.shows
    }

    /// Read-only view of all cached episodes
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    /// Look up a show by id
    pub fn show(&self, show_id: &str) -> Option<&Show> {
        self.shows.iter().find(|s| s.id == show_id)
    }

    /// Episodes belonging to one show.
    ///
    /// Works off `show_id` alone, so an episode whose show is missing from
    /// the cache never causes a failure; it just isn't listed anywhere.
    pub fn episodes_of(&self, show_id: &str) -> Vec<&Episode> {
        self.episodes
            .iter()
            .filter(|e| e.show_id == show_id)
            .collect()
    }

    /// Access the underlying API client
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Mutable access to the underlying API client
    pub fn api_mut(&mut self) -> &mut A {
        &mut self.api
    }

    // ==================== Loading ====================

    /// Fetch the full show list, then each show's episodes in turn.
    ///
    /// Unauthenticated: clears both collections and returns without any
    /// network call. Per-show episode failures are logged and skipped; the
    /// cache is replaced only after all fetching has finished. If the show
    /// list itself cannot be fetched, the previous cache state is kept.
    pub async fn load_all(&mut self) -> Result<(), SyncError> {
        if !self.api.is_authenticated() {
            debug!("Not authenticated, clearing cache");
            self.shows.clear();
            self.episodes.clear();
            return Ok(());
        }

        let shows = self.api.list_shows().await?;

        // Sequential on purpose: deterministic accumulation order, and no
        // burst of parallel requests against the catalog proxy.
        let mut episodes = Vec::new();
        for show in &shows {
            match self.api.list_episodes(&show.id).await {
                Ok(records) => {
                    episodes.extend(records.into_iter().map(|r| r.into_episode(&show.name)));
                }
                Err(err) => {
                    warn!("Failed to fetch episodes for {}: {}", show.name, err);
                }
            }
        }

        info!("Loaded {} show(s), {} episode(s)", shows.len(), episodes.len());
        self.shows = shows;
        self.episodes = episodes;
        Ok(())
    }

    // ==================== Show Operations ====================

    /// Add a show by catalog id; the server resolves the metadata.
    ///
    /// If the show was already tracked the server reports it skipped and the
    /// cache is untouched. Otherwise the new show is appended and its
    /// episodes fetched; an episode-fetch failure leaves the show tracked
    /// with zero episodes, which self-heals on the next `load_all`.
    pub async fn add_show(&mut self, catalog_id: &str) -> Result<AddOutcome, SyncError> {
        let reply = self.api.add_show(catalog_id).await?;

        if reply.skipped {
            debug!("Show {} already tracked, skipping", catalog_id);
            return Ok(AddOutcome::Skipped(reply.show));
        }

        let show = reply.show;
        self.shows.push(show.clone());
        self.fetch_episodes_for(&show).await;

        Ok(AddOutcome::Added(show))
    }

    /// Two-step add: fetch catalog metadata, then create from it.
    ///
    /// A show already in the cache is skipped without touching the network
    /// beyond the metadata fetch, keeping show ids unique.
    pub async fn import_show(&mut self, catalog_id: &str) -> Result<AddOutcome, SyncError> {
        let catalog = self.api.catalog_show(catalog_id).await?;

        if let Some(existing) = self.show(&catalog.id) {
            debug!("Show {} already tracked, skipping import", catalog.id);
            return Ok(AddOutcome::Skipped(existing.clone()));
        }

        let show = self.api.create_show(&NewShow::from(catalog)).await?;
        self.shows.push(show.clone());
        self.fetch_episodes_for(&show).await;

        Ok(AddOutcome::Added(show))
    }

    /// Fetch and append one show's episodes, tolerating failure
    async fn fetch_episodes_for(&mut self, show: &Show) {
        match self.api.list_episodes(&show.id).await {
            Ok(records) => {
                self.episodes
                    .extend(records.into_iter().map(|r| r.into_episode(&show.name)));
            }
            Err(err) => {
                warn!("Failed to fetch episodes for {}: {}", show.name, err);
            }
        }
    }

    /// Delete a show, optimistically.
    ///
    /// The show and its episodes leave the cache before the request is
    /// issued. On failure both collections are restored from the pre-call
    /// snapshot verbatim; a cache change made while the delete was in
    /// flight would be discarded with it. Known limitation, kept as-is.
    pub async fn delete_show(&mut self, show_id: &str) -> Result<(), SyncError> {
        let shows_snapshot = self.shows.clone();
        let episodes_snapshot = self.episodes.clone();

        self.shows.retain(|s| s.id != show_id);
        self.episodes.retain(|e| e.show_id != show_id);

        if let Err(err) = self.api.delete_show(show_id).await {
            warn!("Delete of show {} failed, rolling back: {}", show_id, err);
            self.shows = shows_snapshot;
            self.episodes = episodes_snapshot;
            return Err(err.into());
        }

        Ok(())
    }

    /// Toggle the ignored flag, pessimistically.
    ///
    /// The server decides the new value; only the matching show is updated,
    /// episodes are untouched.
    pub async fn toggle_show_ignored(&mut self, show_id: &str) -> Result<bool, SyncError> {
        let ignored = self.api.toggle_ignored(show_id).await?;

        if let Some(show) = self.shows.iter_mut().find(|s| s.id == show_id) {
            show.ignored = ignored;
        }

        Ok(ignored)
    }

    // ==================== Episode Operations ====================

    /// Toggle an episode's watched flag, pessimistically.
    ///
    /// The negation of the cached value is sent to the server; on success
    /// the episode collection is rebuilt as a fresh vector with exactly that
    /// episode updated, so observers holding the old one see the change. On
    /// failure the cache is untouched.
    pub async fn toggle_episode_watched(&mut self, episode_id: &str) -> Result<bool, SyncError> {
        let current = self
            .episodes
            .iter()
            .find(|e| e.id == episode_id)
            .map(|e| e.watched)
            .ok_or_else(|| SyncError::UnknownEpisode(episode_id.to_string()))?;

        let watched = !current;
        self.api.set_watched(episode_id, watched).await?;

        let next: Vec<Episode> = self
            .episodes
            .iter()
            .map(|e| {
                if e.id == episode_id {
                    let mut updated = e.clone();
                    updated.watched = watched;
                    updated
                } else {
                    e.clone()
                }
            })
            .collect();
        self.episodes = next;

        Ok(watched)
    }

    // ==================== Bulk Operations ====================

    /// Remove all data for the current user.
    ///
    /// On success both collections are emptied regardless of what the
    /// response payload contained.
    pub async fn clear_all(&mut self) -> Result<(), SyncError> {
        self.api.clear_all().await?;
        self.shows.clear();
        self.episodes.clear();
        info!("Cleared all tracked data");
        Ok(())
    }

    /// Refresh catalog metadata for all tracked shows, then resynchronize.
    ///
    /// Per-show refresh failures are informational only: nothing is rolled
    /// back, the report just names the shows that failed.
    pub async fn refresh_shows(&mut self) -> Result<RefreshReport, SyncError> {
        let reply = self.api.refresh_shows().await?;
        self.load_all().await?;

        Ok(RefreshReport {
            failed: reply.errors.into_iter().map(|e| e.show_name).collect(),
        })
    }

    // ==================== Catalog ====================

    /// Catalog metadata for a show that is not tracked yet. Pure read, the
    /// cache is not involved.
    pub async fn catalog_preview(&self, catalog_id: &str) -> Result<CatalogShow, SyncError> {
        Ok(self.api.catalog_show(catalog_id).await?)
    }
}
