//! Response decoding
//!
//! A `RawResponse` holds the status code and the body text, and the body can
//! be read exactly once. Reading it again is a caller bug and fails with
//! [`ApiError::BodyConsumed`] instead of handing back stale data.
//!
//! The decoding contract, shared by every backend call:
//! - failure status: the body is parsed for an `error`/`message` field; if
//!   that parse fails, the raw text becomes the message
//! - success status: the body is deserialized into the expected type; a
//!   parse failure here is its own error kind, distinct from a
//!   server-reported failure

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::ApiError;

/// A backend response with a consume-once body
#[derive(Debug)]
pub struct RawResponse {
    status: u16,
    body: Option<String>,
}

impl RawResponse {
    /// Wrap an already-read status and body
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: Some(body.into()),
        }
    }

    /// Drain a reqwest response into a `RawResponse`
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self, ApiError> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(Self::new(status, body))
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Take the body text. Fails on the second call.
    pub fn text(&mut self) -> Result<String, ApiError> {
        self.body.take().ok_or(ApiError::BodyConsumed)
    }

    /// Decode the body per the shared contract described in the module docs
    pub fn decode<T: DeserializeOwned>(&mut self) -> Result<T, ApiError> {
        let text = self.text()?;

        if !self.is_success() {
            return Err(ApiError::Server {
                status: self.status,
                message: extract_error_message(&text),
            });
        }

        serde_json::from_str(&text).map_err(|_| ApiError::InvalidResponse)
    }
}

/// Pull a human-readable message out of an error body, falling back to the
/// raw text when the body is not the expected shape.
fn extract_error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        #[serde(default)]
        error: Option<String>,
        #[serde(default)]
        message: Option<String>,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed
            .error
            .or(parsed.message)
            .unwrap_or_else(|| body.to_string()),
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct Payload {
        id: String,
        count: u32,
    }

    #[test]
    fn test_decode_success_returns_data_unchanged() {
        let mut response = RawResponse::new(200, r#"{"id":"82","count":3}"#);
        let payload: Payload = response.decode().unwrap();
        assert_eq!(
            payload,
            Payload {
                id: "82".to_string(),
                count: 3
            }
        );
    }

    #[test]
    fn test_second_read_fails() {
        let mut response = RawResponse::new(200, r#"{"id":"82","count":3}"#);
        let _: Payload = response.decode().unwrap();

        let second: Result<Payload, _> = response.decode();
        assert!(matches!(second, Err(ApiError::BodyConsumed)));
    }

    #[test]
    fn test_text_consumes_body() {
        let mut response = RawResponse::new(200, "hello");
        assert_eq!(response.text().unwrap(), "hello");
        assert!(matches!(response.text(), Err(ApiError::BodyConsumed)));
    }

    #[test]
    fn test_failure_extracts_error_field() {
        let mut response = RawResponse::new(404, r#"{"error":"Show not found"}"#);
        let result: Result<Payload, _> = response.decode();
        match result {
            Err(ApiError::Server { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Show not found");
            }
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[test]
    fn test_failure_extracts_message_field() {
        let mut response = RawResponse::new(500, r#"{"message":"Internal error"}"#);
        let result: Result<Payload, _> = response.decode();
        match result {
            Err(ApiError::Server { message, .. }) => assert_eq!(message, "Internal error"),
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[test]
    fn test_failure_falls_back_to_raw_text() {
        let mut response = RawResponse::new(502, "Bad Gateway");
        let result: Result<Payload, _> = response.decode();
        match result {
            Err(ApiError::Server { message, .. }) => assert_eq!(message, "Bad Gateway"),
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[test]
    fn test_success_with_undecodable_body() {
        let mut response = RawResponse::new(200, "<html>not json</html>");
        let result: Result<Payload, _> = response.decode();
        assert!(matches!(result, Err(ApiError::InvalidResponse)));
    }

    #[test]
    fn test_status_helpers() {
        assert!(RawResponse::new(204, "").is_success());
        assert!(!RawResponse::new(301, "").is_success());
        assert!(!RawResponse::new(401, "").is_success());
        assert_eq!(RawResponse::new(418, "").status(), 418);
    }
}
