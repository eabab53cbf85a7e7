//! Session state: server coordinates, credentials, and the bearer token.
//!
//! A [`Session`] is owned exclusively by whoever drives the client; nothing
//! here is synchronized. Callers wanting concurrent batches use independent
//! sessions (the service itself documents no locking for simultaneous
//! writes to one key either).

use std::time::{SystemTime, UNIX_EPOCH};

/// Credential and token state for one server.
///
/// Only three things mutate a session: a successful login, adopting a token
/// persisted by an earlier process, and logout. The token is usable iff it
/// is non-empty and the current time is before its expiry.
#[derive(Debug, Clone)]
pub struct Session {
    server_url: String,
    username: String,
    password: String,
    namespace: String,
    token: String,
    token_expiry: u64,
}

impl Session {
    /// Creates an unauthenticated session. A trailing `/` on the server URL
    /// is trimmed so endpoint paths concatenate cleanly.
    pub fn new(server_url: &str, username: &str, password: &str, namespace: &str) -> Self {
        Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
            namespace: namespace.to_string(),
            token: String::new(),
            token_expiry: 0,
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// Namespace (tenant) scope; empty string means the default scope.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Current token, or `None` while unauthenticated.
    pub fn token(&self) -> Option<&str> {
        if self.token.is_empty() {
            None
        } else {
            Some(&self.token)
        }
    }

    /// Absolute expiry of the current token, unix epoch seconds. Zero while
    /// unauthenticated.
    pub fn token_expiry(&self) -> u64 {
        self.token_expiry
    }

    /// Installs a token, either fresh from login or persisted by an earlier
    /// invocation.
    pub fn adopt_token(&mut self, token: String, expiry: u64) {
        self.token = token;
        self.token_expiry = expiry;
    }

    /// Discards the token and its expiry.
    pub fn logout(&mut self) {
        self.token.clear();
        self.token_expiry = 0;
    }

    /// Token usability at an arbitrary instant, for callers that bring
    /// their own clock.
    pub fn token_valid_at(&self, now: u64) -> bool {
        !self.token.is_empty() && now < self.token_expiry
    }

    /// Token usability right now. The CLI checks this at startup to decide
    /// whether a persisted token lets it skip a fresh login.
    pub fn is_token_valid(&self) -> bool {
        self.token_valid_at(now_ts())
    }
}

/// Seconds since the unix epoch.
pub(crate) fn now_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new("http://localhost:8848/", "nacos", "nacos", "")
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        assert_eq!(session().server_url(), "http://localhost:8848");
    }

    #[test]
    fn fresh_session_has_no_usable_token() {
        let session = session();
        assert_eq!(session.token(), None);
        assert!(!session.token_valid_at(0));
    }

    #[test]
    fn token_expires_at_the_boundary() {
        let mut session = session();
        session.adopt_token("tok".into(), 1_000);

        assert!(session.token_valid_at(0));
        assert!(session.token_valid_at(999));
        // expiry instant itself is already stale
        assert!(!session.token_valid_at(1_000));
        assert!(!session.token_valid_at(2_000));
    }

    #[test]
    fn empty_token_is_never_valid() {
        let mut session = session();
        session.adopt_token(String::new(), u64::MAX);
        assert!(!session.token_valid_at(0));
    }

    #[test]
    fn logout_clears_token_and_expiry() {
        let mut session = session();
        session.adopt_token("tok".into(), u64::MAX);
        session.logout();
        assert_eq!(session.token(), None);
        assert_eq!(session.token_expiry(), 0);
        assert!(!session.is_token_valid());
    }
}
