//! Error types for the Keystone client

use crate::transport::HttpResponse;
use crate::types::User;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message returned when a successful auth response has no usable catalog
pub const CATALOG_PARSE_MESSAGE: &str = "Error while accessing serviceCatalog key in returned json";

/// Main error type for the Keystone client
#[derive(Debug, Error)]
pub enum KeystoneError {
    /// Authentication rejected by the identity service
    #[error("{message}")]
    AuthFailure { message: String },

    /// A success response did not have the expected structure
    #[error("{message}")]
    ParseFailure { message: String },

    /// Any other non-2xx response
    #[error("Error while performing request: {status}{}", body_detail(.body))]
    RequestFailure { status: StatusCode, body: String },

    /// The user was created but the requested role could not be assigned
    #[error("User {} was created but role {role_id} could not be assigned: {source}", .user.id)]
    RoleAssignment {
        user: Box<User>,
        role_id: String,
        #[source]
        source: Box<KeystoneError>,
    },

    /// HTTP exchange failed before a response was received
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid request
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, KeystoneError>;

fn body_detail(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

impl KeystoneError {
    /// Build a parse failure for a missing wrapper key in a response body
    pub(crate) fn missing_key(key: &str) -> Self {
        KeystoneError::ParseFailure {
            message: format!("Error while accessing {key} key in returned json"),
        }
    }

    /// Build a request failure from a non-2xx response
    pub(crate) fn request_failure(response: HttpResponse) -> Self {
        KeystoneError::RequestFailure {
            status: response.status,
            body: response.body,
        }
    }

    /// Get error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            KeystoneError::AuthFailure { .. } => "KEYSTONE_AUTH_FAILURE",
            KeystoneError::ParseFailure { .. } => "KEYSTONE_PARSE_FAILURE",
            KeystoneError::RequestFailure { .. } => "KEYSTONE_REQUEST_FAILURE",
            KeystoneError::RoleAssignment { .. } => "KEYSTONE_ROLE_ASSIGNMENT_FAILURE",
            KeystoneError::Transport(_) => "KEYSTONE_TRANSPORT_ERROR",
            KeystoneError::Serialization(_) => "KEYSTONE_SERIALIZATION_ERROR",
            KeystoneError::InvalidRequest { .. } => "KEYSTONE_INVALID_REQUEST",
            KeystoneError::Config { .. } => "KEYSTONE_CONFIG_ERROR",
        }
    }

    /// HTTP status of the failed response, when one was received
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            KeystoneError::RequestFailure { status, .. } => Some(*status),
            KeystoneError::RoleAssignment { source, .. } => source.status(),
            KeystoneError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Check if error was caused by the caller's request
    pub fn is_client_error(&self) -> bool {
        match self {
            KeystoneError::AuthFailure { .. } | KeystoneError::InvalidRequest { .. } => true,
            _ => self.status().is_some_and(|s| s.is_client_error()),
        }
    }

    /// The user left behind by a partially failed `create_user`
    pub fn partial_user(&self) -> Option<&User> {
        match self {
            KeystoneError::RoleAssignment { user, .. } => Some(user.as_ref()),
            _ => None,
        }
    }
}

/// Error payload returned by Keystone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorDetails,
}

/// Error details structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Human-readable error message
    #[serde(default)]
    pub message: String,

    /// HTTP status code echoed by the server
    #[serde(default)]
    pub code: Option<u16>,

    /// Short error title (e.g. "Not Authorized")
    #[serde(default)]
    pub title: String,
}

impl ErrorDetails {
    /// Title if present, otherwise the message
    pub fn summary(&self) -> &str {
        if self.title.is_empty() {
            &self.message
        } else {
            &self.title
        }
    }
}
