//! Graph API client over `reqwest`.
//!
//! Implements the `ApiClient` port: every call resolves
//! `{base_url}/{api_version}{path}`, authenticates with a bearer token and
//! returns the decoded JSON body.

mod envelope;
mod retry;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use serde_json::{Value, json};
use tracing::{debug, warn};

use waba_core::application::{ApiError, ClientError, ports::ApiClient};

use crate::error::AdapterError;

pub use envelope::UNKNOWN_API_ERROR;
pub use retry::RetryPolicy;

pub const DEFAULT_BASE_URL: &str = "https://graph.facebook.com";
pub const DEFAULT_API_VERSION: &str = "v21.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for [`HttpApiClient`].
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub base_url: String,
    pub api_version: String,
    pub access_token: String,
    pub timeout_secs: u64,
    pub retry: RetryPolicy,
}

impl HttpClientConfig {
    /// Defaults for everything but the token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            access_token: access_token.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// HTTP implementation of the `ApiClient` port.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    http: Client,
    /// `{base_url}/{api_version}`, no trailing slash.
    root: String,
    access_token: String,
    retry: RetryPolicy,
}

impl HttpApiClient {
    pub fn new(config: HttpClientConfig) -> Result<Self, AdapterError> {
        if config.access_token.trim().is_empty() {
            return Err(AdapterError::MissingAccessToken);
        }

        let base = Url::parse(&config.base_url).map_err(|e| AdapterError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(AdapterError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: "scheme must be http or https".into(),
            });
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("waba/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let root = format!(
            "{}/{}",
            config.base_url.trim_end_matches('/'),
            config.api_version.trim_matches('/')
        );

        Ok(Self {
            http,
            root,
            access_token: config.access_token,
            retry: config.retry,
        })
    }

    /// Full URL for an endpoint path such as `/123/messages`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.root, path.trim_start_matches('/'))
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        let url = self.url(path);
        let mut attempt = 0;

        loop {
            match self.send_once(method.clone(), &url, query, body).await {
                Err(err) if self.retry.should_retry(&err, attempt) => {
                    let delay = self.retry.backoff(attempt);
                    warn!(
                        target: "waba",
                        %method,
                        path,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Retrying request"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn send_once(
        &self,
        method: Method,
        url: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        let mut request = self
            .http
            .request(method.clone(), url)
            .bearer_auth(&self.access_token);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(network_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(network_error)?;
        debug!(target: "waba", %method, url, status = status.as_u16(), "Response received");

        if status.is_success() {
            decode(&bytes)
        } else {
            Err(envelope::api_error(status.as_u16(), &bytes).into())
        }
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, ClientError> {
        self.execute(Method::GET, path, query, None).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        self.execute(Method::POST, path, &[], Some(body)).await
    }

    async fn delete(&self, path: &str, query: &[(String, String)]) -> Result<Value, ClientError> {
        self.execute(Method::DELETE, path, query, None).await
    }
}

/// Empty 2xx bodies count as `{"success": true}`.
fn decode(bytes: &[u8]) -> Result<Value, ClientError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(json!({ "success": true }));
    }
    Ok(serde_json::from_slice(bytes)?)
}

fn network_error(err: reqwest::Error) -> ClientError {
    let message = if err.is_timeout() {
        format!("Request timed out: {err}")
    } else if err.is_connect() {
        format!("Could not connect: {err}")
    } else {
        format!("Request failed: {err}")
    };
    ApiError::network(message).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str, version: &str) -> HttpApiClient {
        HttpApiClient::new(
            HttpClientConfig::new("token")
                .with_base_url(base)
                .with_api_version(version),
        )
        .unwrap()
    }

    #[test]
    fn url_joins_base_version_and_path() {
        let c = client("https://graph.facebook.com/", "v21.0");
        assert_eq!(
            c.url("/123/messages"),
            "https://graph.facebook.com/v21.0/123/messages"
        );
    }

    #[test]
    fn empty_token_is_rejected() {
        let err = HttpApiClient::new(HttpClientConfig::new("  ")).unwrap_err();
        assert!(matches!(err, AdapterError::MissingAccessToken));
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let err = HttpApiClient::new(HttpClientConfig::new("t").with_base_url("not a url"))
            .unwrap_err();
        assert!(matches!(err, AdapterError::InvalidBaseUrl { .. }));

        let err = HttpApiClient::new(HttpClientConfig::new("t").with_base_url("ftp://x"))
            .unwrap_err();
        assert!(matches!(err, AdapterError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn empty_body_decodes_to_success() {
        assert_eq!(decode(b"").unwrap(), json!({"success": true}));
        assert_eq!(decode(b" \n").unwrap(), json!({"success": true}));
    }

    #[test]
    fn invalid_body_is_decode_error() {
        assert!(matches!(decode(b"{oops"), Err(ClientError::Decode(_))));
    }
}
