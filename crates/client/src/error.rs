//! Error types for the Nacos client.

use thiserror::Error;

use crate::transport::TransportError;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur talking to the configuration service.
///
/// Nothing in this crate retries; every variant is propagated to the
/// immediate caller. Batch export/import isolates failures per item and
/// collects them instead of returning the first one.
#[derive(Debug, Error)]
pub enum Error {
    /// Login could not reach the server at all.
    #[error("login failed: {0}")]
    AuthTransport(#[source] TransportError),

    /// Login reached the server and was refused.
    #[error("login rejected with status {status}: {body}")]
    AuthStatus { status: u16, body: String },

    /// Login answered 200 with a body that is not the expected JSON shape.
    #[error("malformed login response: {0}")]
    AuthMalformed(#[source] serde_json::Error),

    /// Login response parsed but carried an empty access token.
    #[error("login returned an empty access token")]
    AuthEmptyToken,

    /// The configured server URL cannot be parsed.
    #[error("invalid server url '{url}': {source}")]
    ServerUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A protocol call could not reach the server.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered a protocol call with a non-success status.
    #[error("server returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// HTTP succeeded but the embedded console result code did not.
    ///
    /// The console endpoints have two independent failure layers; this is
    /// the inner one, surfaced even under HTTP 200.
    #[error("api call failed with code {code}: {message}")]
    Api { code: i64, message: String },

    /// The requested configuration entry does not exist (HTTP 404 on get).
    #[error("config {data_id}@{group} not found")]
    NotFound { data_id: String, group: String },

    /// An import file name does not have the `group@dataId` shape.
    #[error("file name must look like 'group@dataId', got '{name}'")]
    ArchiveName { name: String },

    /// I/O error reading or writing transfer files.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A response envelope could not be decoded.
    #[error("malformed response body: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true for the missing-entry outcome of a get, as opposed to
    /// any other non-success status.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
