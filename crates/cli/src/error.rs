use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// The invocation itself is wrong (missing/conflicting arguments at a
    /// level clap cannot express).
    #[error("invalid usage: {0}")]
    Usage(String),

    /// The persisted settings are missing something the command needs.
    #[error("{0}")]
    Settings(String),

    #[error(transparent)]
    Client(#[from] nacos::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
