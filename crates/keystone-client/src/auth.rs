//! Password authentication and the resulting session
//!
//! A successful `POST /tokens` yields a [`Session`]: the token, the URL it
//! was obtained from and the service catalog. Sessions are never refreshed
//! or mutated; authenticate again to get a new one.

use crate::catalog::{self, CatalogEntry};
use crate::error::{ErrorResponse, KeystoneError, Result, CATALOG_PARSE_MESSAGE};
use crate::transport::{join_url, HttpRequest, HttpResponse, Transport};
use crate::types::{AuthPayload, AuthRequest, PasswordCredentials};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Username/password pair scoped to a tenant
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub tenant_name: String,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        tenant_name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            tenant_name: tenant_name.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("tenant_name", &self.tenant_name)
            .finish()
    }
}

/// Authenticated session
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    auth_url: String,
    catalog: Vec<CatalogEntry>,
}

impl Session {
    pub(crate) fn new(
        token: impl Into<String>,
        auth_url: impl Into<String>,
        catalog: Vec<CatalogEntry>,
    ) -> Self {
        Self {
            token: token.into(),
            auth_url: auth_url.into(),
            catalog,
        }
    }

    /// Token sent as `X-Auth-Token`
    pub fn token(&self) -> &str {
        &self.token
    }

    /// URL the session was authenticated against
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    /// Service catalog in server order
    pub fn catalog(&self) -> &[CatalogEntry] {
        &self.catalog
    }

    /// First catalog entry of the given service type
    pub fn catalog_entry(&self, service_type: &str) -> Option<&CatalogEntry> {
        catalog::find_entry(&self.catalog, service_type)
    }

    /// Endpoint URL for a service type and interface, or an empty string
    ///
    /// `admin`/`adminURL` (and the public/internal pairs) are interchangeable.
    pub fn endpoint(&self, service_type: &str, interface: &str) -> String {
        catalog::resolve(&self.catalog, service_type, interface)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("auth_url", &self.auth_url)
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

/// Authenticate against `{auth_url}/tokens`
pub async fn authenticate(
    transport: &dyn Transport,
    credentials: &Credentials,
    auth_url: &str,
) -> Result<Session> {
    let body = AuthRequest {
        auth: AuthPayload {
            password_credentials: PasswordCredentials {
                username: &credentials.username,
                password: &credentials.password,
            },
            tenant_name: &credentials.tenant_name,
        },
    };

    debug!(
        username = %credentials.username,
        tenant = %credentials.tenant_name,
        "Authenticating with Keystone"
    );

    let request = HttpRequest::new(Method::POST, join_url(auth_url, "/tokens"))
        .with_json_body(serde_json::to_value(&body)?);
    let response = transport.send(request).await?;

    if !response.is_success() {
        warn!(status = %response.status, "Keystone authentication rejected");
        return Err(auth_error(response));
    }

    let session = parse_access(&response.body, auth_url)?;
    info!(
        catalog_entries = session.catalog.len(),
        "Successfully authenticated with Keystone"
    );
    Ok(session)
}

fn auth_error(response: HttpResponse) -> KeystoneError {
    if let Ok(payload) = serde_json::from_str::<ErrorResponse>(&response.body) {
        let summary = payload.error.summary();
        if !summary.is_empty() {
            return KeystoneError::AuthFailure {
                message: summary.to_string(),
            };
        }
    }

    if response.status == StatusCode::UNAUTHORIZED {
        KeystoneError::AuthFailure {
            message: "Unauthorized".into(),
        }
    } else {
        KeystoneError::request_failure(response)
    }
}

fn parse_access(body: &str, auth_url: &str) -> Result<Session> {
    let catalog_error = || KeystoneError::ParseFailure {
        message: CATALOG_PARSE_MESSAGE.into(),
    };

    let value: Value = serde_json::from_str(body).map_err(|_| catalog_error())?;
    let access = value.get("access");

    let catalog = access
        .and_then(|access| access.get("serviceCatalog"))
        .cloned()
        .ok_or_else(catalog_error)?;
    let catalog: Vec<CatalogEntry> =
        serde_json::from_value(catalog).map_err(|_| catalog_error())?;

    let token = access
        .and_then(|access| access.get("token"))
        .and_then(|token| token.get("id"))
        .and_then(Value::as_str)
        .ok_or_else(|| KeystoneError::missing_key("token"))?;

    Ok(Session::new(token, auth_url, catalog))
}
