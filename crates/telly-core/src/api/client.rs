//! Backend REST client
//!
//! `ShowsApi` is the seam the synchronizer talks through; `HttpApi` is the
//! reqwest implementation against a configured base URL. Tests substitute
//! their own in-memory implementation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ApiError;
use super::response::RawResponse;
use crate::config::Config;
use crate::models::{CatalogShow, EpisodeRecord, NewShow, Show};

/// Reply to `POST /shows/{catalogId}`
#[derive(Debug, Clone, Deserialize)]
pub struct AddShowReply {
    /// True when the show was already tracked and nothing was created
    pub skipped: bool,
    /// The created (or already existing) show
    pub show: Show,
}

/// Reply to `PUT /shows/{showId}/ignore`
#[derive(Debug, Clone, Deserialize)]
struct ToggleIgnoredReply {
    ignored: bool,
}

/// One failed show inside a refresh reply
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshErrorEntry {
    pub show_name: String,
    #[serde(default)]
    pub error: Option<String>,
}

/// Reply to `PUT /refresh/shows`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshReply {
    #[serde(default)]
    pub errors: Vec<RefreshErrorEntry>,
}

/// Everything the synchronizer needs from the backend.
///
/// One method per REST endpoint; implementations attach the bearer
/// credential themselves.
#[allow(async_fn_in_trait)]
pub trait ShowsApi {
    /// Whether a bearer credential is available at all
    fn is_authenticated(&self) -> bool;

    /// `GET /shows` - list tracked shows
    async fn list_shows(&self) -> Result<Vec<Show>, ApiError>;

    /// `GET /shows/{catalogId}/episodes` - list a show's episodes
    async fn list_episodes(&self, show_id: &str) -> Result<Vec<EpisodeRecord>, ApiError>;

    /// `GET /shows/{catalogId}` - catalog metadata for an untracked show
    async fn catalog_show(&self, catalog_id: &str) -> Result<CatalogShow, ApiError>;

    /// `POST /shows` - create a tracked show from catalog metadata
    async fn create_show(&self, show: &NewShow) -> Result<Show, ApiError>;

    /// `POST /shows/{catalogId}` - add by id, server resolves metadata
    async fn add_show(&self, catalog_id: &str) -> Result<AddShowReply, ApiError>;

    /// `DELETE /shows/{showId}` - remove a tracked show
    async fn delete_show(&self, show_id: &str) -> Result<(), ApiError>;

    /// `PUT /shows/{showId}/ignore` - toggle the ignored flag, returns the new value
    async fn toggle_ignored(&self, show_id: &str) -> Result<bool, ApiError>;

    /// `PATCH /episodes/{episodeId}` - set the watched flag
    async fn set_watched(&self, episode_id: &str, watched: bool) -> Result<(), ApiError>;

    /// `DELETE /admin/clear-all` - remove all data for the current user
    async fn clear_all(&self) -> Result<(), ApiError>;

    /// `PUT /refresh/shows` - refresh catalog metadata for all tracked shows
    async fn refresh_shows(&self) -> Result<RefreshReply, ApiError>;
}

/// reqwest-backed `ShowsApi`
///
/// No request timeout is configured: a slow call simply delays the
/// operation, and the caller decides whether to retry.
#[derive(Debug, Clone)]
pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpApi {
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(&config.api_url, config.token.clone())
    }

    pub fn with_base_url(base_url: &str, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<RawResponse, ApiError> {
        let response = self.authorize(request).send().await?;
        RawResponse::read(response).await
    }
}

impl ShowsApi for HttpApi {
    fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    async fn list_shows(&self) -> Result<Vec<Show>, ApiError> {
        debug!("GET /shows");
        self.send(self.http.get(self.url("/shows"))).await?.decode()
    }

    async fn list_episodes(&self, show_id: &str) -> Result<Vec<EpisodeRecord>, ApiError> {
        debug!("GET /shows/{}/episodes", show_id);
        self.send(
            self.http
                .get(self.url(&format!("/shows/{}/episodes", show_id))),
        )
        .await?
        .decode()
    }

    async fn catalog_show(&self, catalog_id: &str) -> Result<CatalogShow, ApiError> {
        debug!("GET /shows/{}", catalog_id);
        self.send(self.http.get(self.url(&format!("/shows/{}", catalog_id))))
            .await?
            .decode()
    }

    async fn create_show(&self, show: &NewShow) -> Result<Show, ApiError> {
        debug!("POST /shows ({})", show.catalog_id);
        self.send(self.http.post(self.url("/shows")).json(show))
            .await?
            .decode()
    }

    async fn add_show(&self, catalog_id: &str) -> Result<AddShowReply, ApiError> {
        debug!("POST /shows/{}", catalog_id);
        self.send(self.http.post(self.url(&format!("/shows/{}", catalog_id))))
            .await?
            .decode()
    }

    async fn delete_show(&self, show_id: &str) -> Result<(), ApiError> {
        debug!("DELETE /shows/{}", show_id);
        let _: serde_json::Value = self
            .send(self.http.delete(self.url(&format!("/shows/{}", show_id))))
            .await?
            .decode()?;
        Ok(())
    }

    async fn toggle_ignored(&self, show_id: &str) -> Result<bool, ApiError> {
        debug!("PUT /shows/{}/ignore", show_id);
        let reply: ToggleIgnoredReply = self
            .send(
                self.http
                    .put(self.url(&format!("/shows/{}/ignore", show_id))),
            )
            .await?
            .decode()?;
        Ok(reply.ignored)
    }

    async fn set_watched(&self, episode_id: &str, watched: bool) -> Result<(), ApiError> {
        debug!("PATCH /episodes/{} watched={}", episode_id, watched);
        let body = serde_json::json!({ "watched": watched });
        let _: serde_json::Value = self
            .send(
                self.http
                    .patch(self.url(&format!("/episodes/{}", episode_id)))
                    .json(&body),
            )
            .await?
            .decode()?;
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), ApiError> {
        debug!("DELETE /admin/clear-all");
        let _: serde_json::Value = self
            .send(self.http.delete(self.url("/admin/clear-all")))
            .await?
            .decode()?;
        Ok(())
    }

    async fn refresh_shows(&self) -> Result<RefreshReply, ApiError> {
        debug!("PUT /refresh/shows");
        self.send(self.http.put(self.url("/refresh/shows")))
            .await?
            .decode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = HttpApi::with_base_url("http://localhost:3000/api/", None);
        assert_eq!(api.url("/shows"), "http://localhost:3000/api/shows");
    }

    #[test]
    fn test_is_authenticated_tracks_token() {
        let anon = HttpApi::with_base_url("http://localhost:3000/api", None);
        assert!(!anon.is_authenticated());

        let user = HttpApi::with_base_url("http://localhost:3000/api", Some("tok".to_string()));
        assert!(user.is_authenticated());
    }

    #[test]
    fn test_refresh_reply_decodes_errors() {
        let json = r#"{"errors":[{"showName":"Lost","error":"catalog timeout"}]}"#;
        let reply: RefreshReply = serde_json::from_str(json).unwrap();
        assert_eq!(reply.errors.len(), 1);
        assert_eq!(reply.errors[0].show_name, "Lost");
    }

    #[test]
    fn test_add_show_reply_decodes() {
        let json = r#"{"skipped":true,"show":{"id":"82","name":"Game of Thrones","ignored":false}}"#;
        let reply: AddShowReply = serde_json::from_str(json).unwrap();
        assert!(reply.skipped);
        assert_eq!(reply.show.id, "82");
    }
}
