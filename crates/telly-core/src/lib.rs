//! Telly Core Library
//!
//! This crate provides the core functionality for Telly, a client for a
//! personal TV-show tracking backend: search the catalog, track shows, and
//! mark episodes watched.
//!
//! # Architecture
//!
//! The backend owns persistence; this crate owns an in-memory cache of the
//! two collections (shows, episodes) and mediates every mutation through
//! the backend's REST API. Deletion is optimistic with rollback, everything
//! else is confirmed write-through.
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let mut sync = Synchronizer::new(HttpApi::new(&config));
//!
//! sync.load_all().await?;
//! sync.add_show("82").await?;
//!
//! for show in sync.shows() {
//!     println!("{}", show.name);
//! }
//! ```
//!
//! # Modules
//!
//! - `sync`: the state synchronizer (main entry point)
//! - `api`: REST client, response decoding, error taxonomy
//! - `models`: data structures for shows and episodes
//! - `config`: application configuration

pub mod api;
pub mod config;
pub mod models;
pub mod sync;

pub use api::{ApiError, HttpApi, RawResponse, ShowsApi};
pub use config::Config;
pub use models::{AddOutcome, CatalogShow, Episode, EpisodeRecord, NewShow, RefreshReport, Show};
pub use sync::{SyncError, Synchronizer};
