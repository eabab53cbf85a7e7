//! Persisted connection settings shared across invocations.
//!
//! One JSON file under the user config directory holds everything a later
//! invocation needs to pick up where the last one left off: server
//! coordinates, credentials (plaintext - encryption is out of scope), the
//! namespace scope, and the access token with its expiry. The file is
//! written with owner-only permissions because of the password.
//!
//! Settings are loaded once per invocation and passed into commands
//! explicitly; nothing reads or writes the file behind the caller's back.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub server_url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Namespace (tenant) scope; empty string is the default scope.
    #[serde(default)]
    pub namespace: String,
    /// Access token from the last login, empty when logged out.
    #[serde(default)]
    pub token: String,
    /// Unix epoch seconds; 0 when logged out.
    #[serde(default)]
    pub token_expiry: u64,
}

impl Settings {
    /// Loads from `path`, falling back to defaults when the file is missing
    /// or unreadable. A corrupt file is treated as absent rather than fatal;
    /// the next save rewrites it.
    pub fn load(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    pub fn clear_token(&mut self) {
        self.token.clear();
        self.token_expiry = 0;
    }
}

/// Default settings file location: `<config dir>/nacosctl/settings.json`.
pub fn settings_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("nacosctl").join(SETTINGS_FILE))
        .ok_or_else(|| CliError::Settings("could not determine a config directory".into()))
}
