//! Service catalog returned at authentication time
//!
//! The catalog is a list of services, each with one or more endpoint maps
//! keyed by interface name. Identity v2.0 names interfaces `adminURL`,
//! `publicURL` and `internalURL`; later versions use `admin`, `public` and
//! `internal`. Lookups accept either spelling.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Endpoint URLs of one region, keyed by interface name
pub type Endpoints = BTreeMap<String, String>;

/// One service in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Human-readable service name (e.g. "Compute Service")
    pub name: String,

    /// Service type (e.g. "compute", "identity")
    #[serde(rename = "type")]
    pub service_type: String,

    /// Endpoint maps in the order returned by the server
    #[serde(deserialize_with = "string_endpoints")]
    pub endpoints: Vec<Endpoints>,
}

impl CatalogEntry {
    /// URL for `interface`, trying the exact key first and then its alias
    pub fn url(&self, interface: &str) -> Option<&str> {
        self.lookup(interface)
            .or_else(|| interface_alias(interface).and_then(|alias| self.lookup(alias)))
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        self.endpoints
            .iter()
            .find_map(|endpoints| endpoints.get(key))
            .map(String::as_str)
    }
}

/// First entry whose type matches `service_type`
pub fn find_entry<'a>(
    catalog: &'a [CatalogEntry],
    service_type: &str,
) -> Option<&'a CatalogEntry> {
    catalog.iter().find(|entry| entry.service_type == service_type)
}

/// Resolve an endpoint URL; empty string when the service or interface is absent
pub fn resolve(catalog: &[CatalogEntry], service_type: &str, interface: &str) -> String {
    find_entry(catalog, service_type)
        .and_then(|entry| entry.url(interface))
        .unwrap_or_default()
        .to_string()
}

fn interface_alias(interface: &str) -> Option<&'static str> {
    match interface {
        "admin" => Some("adminURL"),
        "adminURL" => Some("admin"),
        "public" => Some("publicURL"),
        "publicURL" => Some("public"),
        "internal" => Some("internalURL"),
        "internalURL" => Some("internal"),
        _ => None,
    }
}

// Endpoint objects also carry ids, regions and sometimes nulls; only string values are kept.
fn string_endpoints<'de, D>(deserializer: D) -> Result<Vec<Endpoints>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|map| {
            map.into_iter()
                .filter_map(|(key, value)| match value {
                    serde_json::Value::String(s) => Some((key, s)),
                    _ => None,
                })
                .collect()
        })
        .collect())
}
