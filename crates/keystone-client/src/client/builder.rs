//! Builder pattern for constructing KeystoneClient

use crate::{
    auth::{self, Credentials},
    client::KeystoneClient,
    config::ClientConfig,
    error::{KeystoneError, Result},
    transport::{ReqwestTransport, Transport},
};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Builder that authenticates and returns a ready [`KeystoneClient`]
#[derive(Default)]
pub struct ClientBuilder {
    auth_url: Option<String>,
    credentials: Option<Credentials>,
    config: ClientConfig,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Keystone URL to authenticate against (e.g. `http://host:35357/v2.0`)
    pub fn auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = Some(url.into());
        self
    }

    /// Set the username, password and tenant to authenticate with
    pub fn credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
        tenant_name: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials::new(username, password, tenant_name));
        self
    }

    /// Use a loaded configuration
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Send requests through a custom transport instead of `reqwest`
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Authenticate and build the client
    pub async fn authenticate(self) -> Result<KeystoneClient> {
        let auth_url = self.auth_url.ok_or_else(|| KeystoneError::InvalidRequest {
            message: "auth_url is required".into(),
        })?;
        Url::parse(&auth_url).map_err(|e| KeystoneError::InvalidRequest {
            message: format!("invalid auth_url {auth_url:?}: {e}"),
        })?;
        let credentials = self
            .credentials
            .ok_or_else(|| KeystoneError::InvalidRequest {
                message: "credentials are required".into(),
            })?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::with_timeouts(
                &self.config.user_agent,
                self.timeout.unwrap_or_else(|| self.config.timeout()),
                self.connect_timeout
                    .unwrap_or_else(|| self.config.connect_timeout()),
            )?),
        };

        let session = auth::authenticate(transport.as_ref(), &credentials, &auth_url).await?;
        Ok(KeystoneClient::from_session(
            transport,
            session,
            &self.config,
        ))
    }
}
