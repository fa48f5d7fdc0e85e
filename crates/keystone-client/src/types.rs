//! Type definitions for the Keystone identity API

use serde::{Deserialize, Deserializer, Serialize};

/// Tenant (project) returned by the identity service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    /// Server-assigned tenant ID
    pub id: String,

    /// Tenant name
    pub name: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Whether the tenant is enabled
    #[serde(default, deserialize_with = "lenient_bool")]
    pub enabled: bool,
}

/// User returned by the identity service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned user ID
    pub id: String,

    /// Login name
    pub name: String,

    /// Contact email
    #[serde(default)]
    pub email: String,

    /// Whether the user is enabled
    #[serde(default, deserialize_with = "lenient_bool")]
    pub enabled: bool,
}

/// EC2-compatible access/secret key pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ec2Credential {
    /// Access key
    pub access: String,

    /// Secret key
    pub secret: String,
}

// Request bodies

#[derive(Debug, Serialize)]
pub(crate) struct AuthRequest<'a> {
    pub auth: AuthPayload<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthPayload<'a> {
    pub password_credentials: PasswordCredentials<'a>,
    pub tenant_name: &'a str,
}

#[derive(Serialize)]
pub(crate) struct PasswordCredentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl std::fmt::Debug for PasswordCredentials<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateTenantRequest<'a> {
    pub tenant: NewTenant<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewTenant<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub enabled: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateUserRequest<'a> {
    pub user: NewUser<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewUser<'a> {
    pub name: &'a str,
    pub password: &'a str,
    pub tenant_id: &'a str,
    pub email: &'a str,
    pub enabled: bool,
}

impl std::fmt::Debug for NewUser<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("tenant_id", &self.tenant_id)
            .field("email", &self.email)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateEc2Request<'a> {
    pub tenant_id: &'a str,
}

/// Accepts `true`, `"true"`, `"True"`; everything else is `false`
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    })
}
