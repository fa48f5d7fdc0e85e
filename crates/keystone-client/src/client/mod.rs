//! Keystone admin client
//!
//! [`KeystoneClient`] wraps an authenticated [`Session`] and a [`Transport`]
//! and exposes the identity v2.0 administrative calls: tenants, users, EC2
//! credentials and role assignments. Every call is a single request carrying
//! the session token in `X-Auth-Token`.
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use keystone_client::KeystoneClient;
//!
//! # async fn example() -> keystone_client::Result<()> {
//! let client = KeystoneClient::builder()
//!     .auth_url("http://keystone.mycloud.com:35357/v2.0")
//!     .credentials("admin", "secret", "admin")
//!     .authenticate()
//!     .await?;
//!
//! let tenant = client.create_tenant("acme", "ACME Corp", true).await?;
//! let user = client
//!     .create_user("wile", "s3cret", "wile@acme.com", &tenant.id, "member-role-id", true)
//!     .await?;
//! let creds = client.create_ec2_credential(&user.id, &tenant.id).await?;
//! println!("access key: {}", creds.access);
//! # Ok(())
//! # }
//! ```

mod builder;

pub use builder::ClientBuilder;

use crate::{
    auth::Session,
    config::{AdminEndpoint, ClientConfig},
    error::{KeystoneError, Result},
    transport::{join_url, HttpRequest, HttpResponse, Transport},
    types::{
        CreateEc2Request, CreateTenantRequest, CreateUserRequest, Ec2Credential, NewTenant,
        NewUser, Tenant, User,
    },
};
use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, warn};

/// Client for the Keystone identity admin API
pub struct KeystoneClient {
    transport: Arc<dyn Transport>,
    session: Session,
    admin_url: String,
}

impl KeystoneClient {
    /// Create a new client using the builder pattern
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Authenticate with default settings
    pub async fn authenticate(
        username: &str,
        password: &str,
        tenant_name: &str,
        auth_url: &str,
    ) -> Result<Self> {
        ClientBuilder::default()
            .auth_url(auth_url)
            .credentials(username, password, tenant_name)
            .authenticate()
            .await
    }

    /// Wrap an existing session
    pub fn from_session(
        transport: Arc<dyn Transport>,
        session: Session,
        config: &ClientConfig,
    ) -> Self {
        let admin_url = admin_base_url(&session, config);
        Self {
            transport,
            session,
            admin_url,
        }
    }

    /// The authenticated session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Token sent with every request
    pub fn token(&self) -> &str {
        self.session.token()
    }

    /// Base URL administrative calls are sent to
    pub fn admin_url(&self) -> &str {
        &self.admin_url
    }

    /// Endpoint URL from the catalog, or an empty string when absent
    pub fn endpoint(&self, service_type: &str, interface: &str) -> String {
        self.session.endpoint(service_type, interface)
    }

    // ===== Tenants =====

    /// Create a tenant
    pub async fn create_tenant(
        &self,
        name: &str,
        description: &str,
        enabled: bool,
    ) -> Result<Tenant> {
        let body = CreateTenantRequest {
            tenant: NewTenant {
                name,
                description,
                enabled,
            },
        };
        let response = self.send(Method::POST, "/tenants", Some(&body)).await?;
        unwrap_key(&response, "tenant")
    }

    /// Delete a tenant
    pub async fn remove_tenant(&self, tenant_id: &str) -> Result<()> {
        let path = format!("/tenants/{}", segment(tenant_id));
        self.send_empty(Method::DELETE, &path).await
    }

    // ===== Users =====

    /// Create a user and, when `role_id` is non-empty, grant it that role on `tenant_id`
    ///
    /// The two steps are not atomic. If the role cannot be assigned the user
    /// still exists; it is returned inside [`KeystoneError::RoleAssignment`].
    pub async fn create_user(
        &self,
        name: &str,
        password: &str,
        email: &str,
        tenant_id: &str,
        role_id: &str,
        enabled: bool,
    ) -> Result<User> {
        let body = CreateUserRequest {
            user: NewUser {
                name,
                password,
                tenant_id,
                email,
                enabled,
            },
        };
        let response = self.send(Method::POST, "/users", Some(&body)).await?;
        let user: User = unwrap_key(&response, "user")?;

        if role_id.is_empty() {
            return Ok(user);
        }

        if let Err(source) = self.add_role_to_user(tenant_id, &user.id, role_id).await {
            warn!(
                user_id = %user.id,
                role_id,
                error = %source,
                "User created but role assignment failed"
            );
            return Err(KeystoneError::RoleAssignment {
                user: Box::new(user),
                role_id: role_id.to_string(),
                source: Box::new(source),
            });
        }

        Ok(user)
    }

    /// Delete a user
    pub async fn remove_user(&self, user_id: &str) -> Result<()> {
        let path = format!("/users/{}", segment(user_id));
        self.send_empty(Method::DELETE, &path).await
    }

    /// Revoke a user's role on a tenant, then delete the user
    ///
    /// Stops at the first failure: if the role cannot be revoked the user is kept.
    pub async fn remove_user_with_role(
        &self,
        tenant_id: &str,
        user_id: &str,
        role_id: &str,
    ) -> Result<()> {
        self.remove_role_from_user(tenant_id, user_id, role_id)
            .await?;
        self.remove_user(user_id).await
    }

    // ===== EC2 credentials =====

    /// Issue an EC2 access/secret pair for a user on a tenant
    pub async fn create_ec2_credential(
        &self,
        user_id: &str,
        tenant_id: &str,
    ) -> Result<Ec2Credential> {
        let path = format!("/users/{}/credentials/OS-EC2", segment(user_id));
        let body = CreateEc2Request { tenant_id };
        let response = self.send(Method::POST, &path, Some(&body)).await?;
        unwrap_key(&response, "credential")
    }

    /// Delete an EC2 credential by access key
    pub async fn remove_ec2_credential(&self, user_id: &str, access_key: &str) -> Result<()> {
        let path = format!(
            "/users/{}/credentials/OS-EC2/{}",
            segment(user_id),
            segment(access_key)
        );
        self.send_empty(Method::DELETE, &path).await
    }

    // ===== Roles =====

    /// Grant a role to a user on a tenant
    pub async fn add_role_to_user(
        &self,
        tenant_id: &str,
        user_id: &str,
        role_id: &str,
    ) -> Result<()> {
        let path = role_path(tenant_id, user_id, role_id);
        self.send_empty(Method::PUT, &path).await
    }

    /// Revoke a role from a user on a tenant
    pub async fn remove_role_from_user(
        &self,
        tenant_id: &str,
        user_id: &str,
        role_id: &str,
    ) -> Result<()> {
        let path = role_path(tenant_id, user_id, role_id);
        self.send_empty(Method::DELETE, &path).await
    }

    // ===== Private Helper Methods =====

    /// Send an authenticated request; non-2xx responses become `RequestFailure`
    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<HttpResponse> {
        let mut request = HttpRequest::new(method, join_url(&self.admin_url, path))
            .with_token(self.session.token());
        if let Some(body) = body {
            request = request.with_json_body(serde_json::to_value(body)?);
        }

        let method = request.method.clone();
        let response = self.transport.send(request).await?;
        if response.is_success() {
            Ok(response)
        } else {
            warn!(%method, path, status = %response.status, "Keystone request failed");
            Err(KeystoneError::request_failure(response))
        }
    }

    /// Request whose success body is ignored
    async fn send_empty(&self, method: Method, path: &str) -> Result<()> {
        self.send::<Value>(method, path, None).await?;
        Ok(())
    }
}

impl std::fmt::Debug for KeystoneClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeystoneClient")
            .field("session", &self.session)
            .field("admin_url", &self.admin_url)
            .finish_non_exhaustive()
    }
}

fn admin_base_url(session: &Session, config: &ClientConfig) -> String {
    match config.admin_endpoint {
        AdminEndpoint::AuthUrl => session.auth_url().to_string(),
        AdminEndpoint::Catalog => {
            let url = session.endpoint(&config.identity_service_type, "admin");
            if url.is_empty() {
                debug!(
                    service_type = %config.identity_service_type,
                    "No admin endpoint in catalog, using auth URL"
                );
                session.auth_url().to_string()
            } else {
                url
            }
        }
    }
}

fn role_path(tenant_id: &str, user_id: &str, role_id: &str) -> String {
    format!(
        "/tenants/{}/users/{}/roles/OS-KSADM/{}",
        segment(tenant_id),
        segment(user_id),
        segment(role_id)
    )
}

fn segment(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}

/// Decode the object stored under `key` in a JSON response body
fn unwrap_key<T: DeserializeOwned>(response: &HttpResponse, key: &str) -> Result<T> {
    let mut value: Value =
        serde_json::from_str(&response.body).map_err(|_| KeystoneError::missing_key(key))?;
    let inner = value
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| KeystoneError::missing_key(key))?;
    serde_json::from_value(inner).map_err(|_| KeystoneError::missing_key(key))
}
