//! Client library for the OpenStack Keystone identity service
//!
//! Authenticates a user/tenant pair, exposes the returned service catalog and
//! performs the identity v2.0 admin calls for tenants, users, EC2 credentials
//! and role assignments.

pub mod auth;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;
pub mod types;

pub use auth::{authenticate, Credentials, Session};
pub use catalog::{CatalogEntry, Endpoints};
pub use client::{ClientBuilder, KeystoneClient};
pub use config::{AdminEndpoint, ClientConfig};
pub use error::{ErrorDetails, ErrorResponse, KeystoneError, Result};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use types::{Ec2Credential, Tenant, User};
