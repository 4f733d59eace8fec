//! Backend API layer
//!
//! Talks to the tracking backend's REST surface. Every call carries the
//! bearer token from configuration.
//!
//! ## Layout
//!
//! - `client`: the `ShowsApi` seam plus the reqwest implementation
//! - `response`: response decoding (body is readable exactly once)
//! - `error`: the error taxonomy shared by every call

pub mod client;
pub mod error;
pub mod response;

pub use client::{AddShowReply, HttpApi, RefreshErrorEntry, RefreshReply, ShowsApi};
pub use error::ApiError;
pub use response::RawResponse;
