//! Data models for Telly
//!
//! Defines the core data structures: Show and Episode, plus the small
//! value types the synchronizer hands back to callers.
//! Wire names are camelCase to match the backend's JSON.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A tracked show
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Show {
    /// External catalog identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Poster image URL
    #[serde(default)]
    pub image: Option<String>,
    /// Lifecycle status as reported by the catalog ("Running", "Ended", ...)
    #[serde(default)]
    pub status: Option<String>,
    /// User-controlled: hide this show from the default listing
    #[serde(default)]
    pub ignored: bool,
}

impl Show {
    /// Create a show from catalog metadata
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: None,
            status: None,
            ignored: false,
        }
    }
}

/// A single episode of a tracked show
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    /// External catalog identifier
    pub id: String,
    /// Catalog id of the owning show
    pub show_id: String,
    /// Owning show's name, denormalized at load time
    pub show_name: String,
    pub season: u32,
    pub number: u32,
    pub name: String,
    /// Air date; unannounced episodes have none
    #[serde(default, deserialize_with = "de_opt_date")]
    pub airdate: Option<NaiveDate>,
    /// Local air time as reported by the catalog, e.g. "21:00"
    #[serde(default)]
    pub airtime: Option<String>,
    /// Runtime in minutes
    #[serde(default)]
    pub runtime: Option<u32>,
    pub watched: bool,
}

impl Episode {
    /// Whether this episode has aired.
    ///
    /// True iff the air date, taken as midnight UTC of that calendar day,
    /// is strictly earlier than `now`. Episodes without an air date are
    /// never released.
    pub fn is_released(&self, now: DateTime<Utc>) -> bool {
        match self.airdate {
            Some(date) => date.and_time(NaiveTime::MIN).and_utc() < now,
            None => false,
        }
    }

    /// "S02E05"-style label
    pub fn label(&self) -> String {
        format!("S{:02}E{:02}", self.season, self.number)
    }
}

/// An episode as returned by the backend, before the show name is joined in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeRecord {
    pub id: String,
    pub show_id: String,
    pub season: u32,
    pub number: u32,
    pub name: String,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub airdate: Option<NaiveDate>,
    #[serde(default)]
    pub airtime: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub watched: bool,
}

impl EpisodeRecord {
    /// Normalize into the cached episode shape
    pub fn into_episode(self, show_name: &str) -> Episode {
        Episode {
            id: self.id,
            show_id: self.show_id,
            show_name: show_name.to_string(),
            season: self.season,
            number: self.number,
            name: self.name,
            airdate: self.airdate,
            airtime: self.airtime,
            runtime: self.runtime,
            watched: self.watched,
        }
    }
}

/// Catalog metadata for a show that is not tracked yet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogShow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Request body for creating a tracked show from catalog metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewShow {
    pub catalog_id: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl From<CatalogShow> for NewShow {
    fn from(show: CatalogShow) -> Self {
        Self {
            catalog_id: show.id,
            name: show.name,
            image: show.image,
            status: show.status,
        }
    }
}

/// Result of adding a show: either it was created, or it was already tracked
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    Added(Show),
    Skipped(Show),
}

impl AddOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, AddOutcome::Skipped(_))
    }

    pub fn show(&self) -> &Show {
        match self {
            AddOutcome::Added(show) | AddOutcome::Skipped(show) => show,
        }
    }
}

/// Per-show failures reported by a catalog refresh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefreshReport {
    /// Names of shows whose metadata refresh failed
    pub failed: Vec<String>,
}

impl RefreshReport {
    /// Human-readable summary, or `None` when every show refreshed cleanly
    pub fn summary(&self) -> Option<String> {
        if self.failed.is_empty() {
            None
        } else {
            Some(format!(
                "Failed to refresh {} show(s): {}",
                self.failed.len(),
                self.failed.join(", ")
            ))
        }
    }
}

/// Air dates arrive as "YYYY-MM-DD", but unannounced episodes show up as
/// null, a missing field, or an empty string depending on the catalog.
fn de_opt_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
