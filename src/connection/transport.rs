//! Live HTTP transport
//!
//! Owns a pooled reqwest [`Client`] that is reused for every request and
//! released when the connection is dropped. Connection-level send failures are
//! retried up to a fixed bound; HTTP error statuses never are.

use super::types::{Connection, JsonBody, QueryStringArgs};
use crate::auth::AuthScheme;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

/// Default base URL of the 2degrees API
pub const API_URL: &str = "https://www.2degreesnetwork.com/api";

/// Fixed bound on transport-level retries. Applies to connection failures
/// only, never to HTTP statuses.
const HTTP_CONNECTION_MAX_RETRIES: u32 = 3;

/// Live connection to the 2degrees API
///
/// Created once per logical session and reused sequentially for any number of
/// requests. The underlying channel is not safe for concurrent callers.
pub struct HttpConnection {
    client: Client,
    base_url: String,
    auth: AuthScheme,
    timeout: Option<Duration>,
}

impl HttpConnection {
    /// Create a connection against the default API URL with basic-auth
    /// credentials
    pub fn new(email_address: impl Into<String>, password: impl Into<String>) -> Self {
        Self::builder()
            .auth(AuthScheme::basic(email_address, password))
            .build()
    }

    /// Create a connection builder
    pub fn builder() -> HttpConnectionBuilder {
        HttpConnectionBuilder::default()
    }

    /// The base URL request paths are resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send_request(
        &self,
        method: Method,
        url: &str,
        query_string_args: Option<QueryStringArgs>,
        body: JsonBody,
    ) -> Result<JsonBody> {
        let url = self.resolve_url(url);

        let mut attempt = 0;
        let response = loop {
            let mut req = self.client.request(method.clone(), &url);

            if let Some(ref query) = query_string_args {
                req = req.query(query);
            }

            // Serializing the body via .json() also attaches
            // `content-type: application/json`; bodiless requests carry
            // neither.
            if let Some(ref body) = body {
                req = req.json(body);
            }

            if let Some(timeout) = self.timeout {
                req = req.timeout(timeout);
            }

            req = self.auth.apply(req);

            match req.send().await {
                Ok(response) => break response,
                Err(e) if e.is_connect() && attempt < HTTP_CONNECTION_MAX_RETRIES => {
                    attempt += 1;
                    warn!(
                        "connection failure sending {} {}, retry {}/{}",
                        method, url, attempt, HTTP_CONNECTION_MAX_RETRIES
                    );
                }
                Err(e) => return Err(Error::Transport(e)),
            }
        };

        debug!("{} {} -> {}", method, url, response.status());
        deserialize_response_body(response).await
    }

    fn resolve_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url.to_string();
        }

        let base = self.base_url.trim_end_matches('/');
        let path = url.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

#[async_trait]
impl Connection for HttpConnection {
    async fn get(
        &self,
        url: &str,
        query_string_args: Option<QueryStringArgs>,
    ) -> Result<JsonBody> {
        self.send_request(Method::GET, url, query_string_args, None)
            .await
    }

    async fn head(&self, url: &str, query_string_args: Option<QueryStringArgs>) -> Result<()> {
        self.send_request(Method::HEAD, url, query_string_args, None)
            .await?;
        Ok(())
    }

    async fn post(&self, url: &str, body: JsonBody) -> Result<JsonBody> {
        self.send_request(Method::POST, url, None, body).await
    }

    async fn put(&self, url: &str, body: JsonBody) -> Result<JsonBody> {
        self.send_request(Method::PUT, url, None, body).await
    }

    async fn delete(&self, url: &str) -> Result<JsonBody> {
        self.send_request(Method::DELETE, url, None, None).await
    }
}

impl std::fmt::Debug for HttpConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpConnection")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Builder for [`HttpConnection`]
pub struct HttpConnectionBuilder {
    base_url: String,
    auth: Option<AuthScheme>,
    timeout: Option<Duration>,
}

impl Default for HttpConnectionBuilder {
    fn default() -> Self {
        Self {
            base_url: API_URL.to_string(),
            auth: None,
            timeout: None,
        }
    }
}

impl HttpConnectionBuilder {
    /// Override the base API URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the authentication scheme
    #[must_use]
    pub fn auth(mut self, auth: AuthScheme) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Set a timeout applied uniformly to every request's transport wait
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the connection
    ///
    /// # Panics
    ///
    /// Panics if no authentication scheme was configured.
    pub fn build(self) -> HttpConnection {
        let auth = self.auth.expect("an authentication scheme is required");
        let user_agent = format!("{}/{}", crate::NAME, crate::VERSION);
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .expect("Failed to build HTTP client");

        HttpConnection {
            client,
            base_url: self.base_url,
            auth,
            timeout: self.timeout,
        }
    }
}

/// Classify a response and deserialize its body
///
/// Mirrors the remote's contract: 4xx statuses map to specific errors without
/// the body being read, 5xx carries the status and reason phrase, and only
/// 200/204 responses with a JSON (or empty) body produce a value.
async fn deserialize_response_body(response: Response) -> Result<JsonBody> {
    let status = response.status();

    if status.is_client_error() {
        return Err(match status {
            StatusCode::UNAUTHORIZED => Error::Authentication,
            StatusCode::FORBIDDEN => Error::AccessDenied,
            StatusCode::NOT_FOUND => Error::NotFound,
            _ => Error::Client {
                status: status.as_u16(),
            },
        });
    }

    if status.is_server_error() {
        let reason = status.canonical_reason().unwrap_or_default();
        return Err(Error::server(status.as_u16(), reason));
    }

    if status != StatusCode::OK && status != StatusCode::NO_CONTENT {
        return Err(Error::unsupported(format!(
            "Unsupported response status {}",
            status.as_u16()
        )));
    }

    // The header must be captured before the body consumes the response.
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned);

    let body = response.bytes().await?;
    if body.is_empty() {
        return Ok(None);
    }

    require_json_content_type(content_type.as_deref())?;

    let deserialized = serde_json::from_slice(&body)?;
    Ok(Some(deserialized))
}

/// Require a non-empty body to declare `application/json`, ignoring case and
/// any `; charset=...` suffix
fn require_json_content_type(content_type: Option<&str>) -> Result<()> {
    let Some(header_value) = content_type else {
        return Err(Error::unsupported(
            "Response does not specify a Content-Type",
        ));
    };

    let media_type = header_value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if media_type == "application/json" {
        Ok(())
    } else {
        Err(Error::unsupported(format!(
            "Unsupported response content type {media_type}"
        )))
    }
}
