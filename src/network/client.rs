//! HTTP client for the upstream open APIs

use crate::config::OutgoingSettings;
use crate::error::SearchError;
use reqwest::{Client, Response};
use std::time::Duration;

const USER_AGENT: &str = concat!("hansearch/", env!("CARGO_PKG_VERSION"));

/// A GET request to one upstream endpoint. Query parameters keep their
/// insertion order so built URLs are deterministic.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub url: String,
    pub params: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: Vec::new(),
        }
    }

    /// Add a query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Look up a previously added parameter, used by tests.
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Response from an upstream call.
#[derive(Debug)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

impl ApiResponse {
    /// Check if the response is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client wrapper with hansearch-specific configuration.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    default_timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with default settings.
    pub fn new() -> Result<Self, SearchError> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings.
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self, SearchError> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs_f64(settings.request_timeout))
            .pool_max_idle_per_host(settings.pool_maxsize)
            .user_agent(USER_AGENT)
            .gzip(true);

        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            default_timeout: Duration::from_secs_f64(settings.request_timeout),
        })
    }

    /// Execute a request with the default timeout.
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, SearchError> {
        self.execute_with_timeout(request, self.default_timeout)
            .await
    }

    /// Execute a request with a custom timeout.
    pub async fn execute_with_timeout(
        &self,
        request: ApiRequest,
        timeout: Duration,
    ) -> Result<ApiResponse, SearchError> {
        let mut req_builder = self.client.get(&request.url).timeout(timeout);

        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }

        let response = req_builder.send().await?;

        Self::parse_response(response).await
    }

    async fn parse_response(response: Response) -> Result<ApiResponse, SearchError> {
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let text = response.text().await?;

        Ok(ApiResponse { status, text, url })
    }
}
