//! Client configuration

use crate::error::{KeystoneError, Result};
use figment::{
    providers::{Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Where administrative calls (tenants, users, roles, credentials) are sent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminEndpoint {
    /// The URL the client authenticated against
    #[default]
    AuthUrl,
    /// The identity service's admin endpoint from the catalog, falling back to the auth URL
    Catalog,
}

/// Configuration for the Keystone client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,

    /// User-Agent header value
    pub user_agent: String,

    /// Base URL selection for administrative calls
    pub admin_endpoint: AdminEndpoint,

    /// Catalog type of the identity service
    pub identity_service_type: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            user_agent: concat!("keystone-client/", env!("CARGO_PKG_VERSION")).to_string(),
            admin_endpoint: AdminEndpoint::AuthUrl,
            identity_service_type: "identity".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file layered over the defaults
    pub fn load_from_file(path: &Path) -> Result<Self> {
        Self::from_figment(Figment::new().merge(Toml::file(path)))
    }

    /// Extract configuration from a caller-provided figment, layered over the defaults
    pub fn from_figment(figment: Figment) -> Result<Self> {
        Figment::from(Serialized::defaults(ClientConfig::default()))
            .merge(figment)
            .extract()
            .map_err(|e| KeystoneError::Config {
                message: e.to_string(),
            })
    }

    /// Generate example configuration file
    pub fn generate_example() -> Result<String> {
        toml::to_string_pretty(&Self::default()).map_err(|e| KeystoneError::Config {
            message: format!("Failed to serialize config: {e}"),
        })
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get connect timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
