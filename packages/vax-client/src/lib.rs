//! Typed REST client for the vaccination-management backend.
//!
//! Covers every endpoint the admin console uses: the OTP-gated auth calls and
//! the doctor/center/vaccine/dose/appointment/user resources.
//!
//! # Example
//!
//! ```rust,ignore
//! use vax_client::{ApiClient, Credentials};
//!
//! let client = ApiClient::new("http://localhost:8080")?;
//!
//! client.register(&Credentials {
//!     email: "nurse@clinic.org".into(),
//!     password: "secret1".into(),
//! }).await?;
//!
//! // OTP arrives by email, out of band
//! client.verify_email("nurse@clinic.org", 482913).await?;
//! ```
//!
//! The backend keeps a session cookie after login; the underlying
//! `reqwest::Client` has a cookie store, so clones of one `ApiClient` share it.

mod auth;
mod catalog;
mod care;
pub mod error;
pub mod types;

pub use error::{extract_message, ApiError, Result};
pub use types::*;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Default base URL of a locally running backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Backend API client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit per-request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into();
        let parsed = reqwest::Url::parse(&base_url)
            .map_err(|e| ApiError::Config(format!("invalid base URL {:?}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "base URL must be http or https, got {}",
                parsed.scheme()
            )));
        }

        let http_client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.http_client.get(self.url(path))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.http_client.post(self.url(path))
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.http_client.put(self.url(path))
    }

    /// Send a request and turn non-2xx responses into `ApiError::Api`.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "Backend responded");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_message(&body);
        warn!(status = status.as_u16(), message = ?message, "Backend rejected request");
        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Send and decode a JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Send and decode a JSON array, treating any non-array body as empty.
    pub(crate) async fn send_list<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Vec<T>> {
        let response = self.send(request).await?;
        let body = response.text().await?;

        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(value @ serde_json::Value::Array(_)) => {
                serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))
            }
            _ => {
                debug!("List endpoint returned a non-array body, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Send and return whatever message the backend put in the body.
    pub(crate) async fn send_for_message(&self, request: RequestBuilder) -> Result<Option<String>> {
        let response = self.send(request).await?;
        let body = response.text().await?;
        Ok(extract_message(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_base_urls() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ApiError::Config(_))
        ));
        assert!(matches!(
            ApiClient::new("ftp://backend.local"),
            Err(ApiError::Config(_))
        ));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(
            client.url("/doctor/getAll"),
            "http://localhost:8080/doctor/getAll"
        );
    }
}
