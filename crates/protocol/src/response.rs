//! Response envelopes returned by the auth, config, and console endpoints.
//!
//! The service has two independent success layers: the HTTP status, and for
//! console endpoints an embedded `code` field that can report failure inside
//! an HTTP 200. Both are surfaced here as plain data; the client decides
//! what counts as an error.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::ConfigEntry;

/// Deserialize helper: treat an explicit JSON `null` as the type's default.
///
/// `#[serde(default)]` alone only applies when a field is absent; a present
/// `null` would otherwise fail to deserialize into a non-`Option` type.
fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let opt = Option::<T>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// Body of a successful `POST /nacos/v1/auth/users/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Opaque bearer credential. An empty string here is a login failure
    /// even under HTTP 200.
    pub access_token: String,
    /// Server-assigned time-to-live in seconds.
    pub token_ttl: u64,
    /// Whether the authenticated user has the global admin role.
    #[serde(default)]
    pub global_admin: bool,
}

/// Paginated envelope returned by the config search endpoint.
///
/// Callers page manually; nothing in the client walks `pages_available`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPage {
    /// Total entries matching the filter, across all pages.
    pub total_count: u64,
    /// 1-based index of this page.
    pub page_number: u64,
    /// Number of pages at the requested page size.
    pub pages_available: u64,
    /// Entries on this page. Absent on an empty result set.
    #[serde(default)]
    pub page_items: Vec<ConfigEntry>,
}

/// Console RPC envelope: `{code, message, data}`.
///
/// `code` is the API-level result and is checked separately from the HTTP
/// status; `data` may be `null` when the call failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Default + Deserialize<'de>"))]
pub struct ConsoleEnvelope<T: Default> {
    /// API result code; 200 means success.
    pub code: i64,
    /// Failure description, if the server provided one.
    #[serde(default)]
    pub message: Option<String>,
    /// Payload, defaulted when missing or `null`.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub data: T,
}
