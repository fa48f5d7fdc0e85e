//! HTTP transport abstraction
//!
//! Every Keystone call is a single request/response exchange. The
//! [`Transport`] trait captures exactly that, so the client can run against
//! `reqwest` in production and against canned responses in tests.

use crate::config::ClientConfig;
use crate::error::{KeystoneError, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Header carrying the Keystone token
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Join a base URL and an absolute path without doubling the slash
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Outgoing request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// Value for `X-Auth-Token`, if the request is authenticated
    pub auth_token: Option<String>,
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            auth_token: None,
            body: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_json_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Response status and raw body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Send one request and return the response, whatever its status
///
/// Implementations only fail when no response was received at all;
/// non-2xx statuses are returned as ordinary responses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// [`Transport`] backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport from client configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Self::with_timeouts(
            &config.user_agent,
            config.timeout(),
            config.connect_timeout(),
        )
    }

    /// Create a transport with explicit timeouts
    pub fn with_timeouts(
        user_agent: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .user_agent(user_agent)
            .build()
            .map_err(KeystoneError::Transport)?;

        Ok(Self { http_client })
    }

    /// Wrap an already configured `reqwest::Client`
    pub fn from_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!(method = %request.method, url = %request.url, "Sending Keystone request");

        let mut builder = self
            .http_client
            .request(request.method, &request.url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = &request.auth_token {
            builder = builder.header(AUTH_TOKEN_HEADER, token);
        }
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await.map_err(KeystoneError::Transport)?;
        let status = response.status();
        let body = response.text().await.map_err(KeystoneError::Transport)?;
        debug!(status = %status, "Received Keystone response");

        Ok(HttpResponse { status, body })
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::from_client(reqwest::Client::new())
    }
}
