mod auth;
mod config;
mod namespace;

use std::path::PathBuf;

use nacos::{Client, Session};
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use crate::settings::{self, Settings};

/// Command context: the persisted settings, this invocation's effective
/// view of them (persisted + CLI overrides), and where to save.
///
/// Commands mutate and save `store` only; overrides never leak into the
/// file.
pub struct App {
    pub store: Settings,
    pub effective: Settings,
    pub path: PathBuf,
}

impl App {
    pub fn save(&self) -> Result<()> {
        self.store.save(&self.path)
    }

    /// Builds a client from the effective settings, adopting a persisted
    /// token when one is present.
    pub fn client(&self) -> Result<Client> {
        if self.effective.server_url.is_empty() {
            return Err(CliError::Settings(
                "no server configured; run 'nacosctl auth server <url>' first".into(),
            ));
        }
        let mut session = Session::new(
            &self.effective.server_url,
            &self.effective.username,
            &self.effective.password,
            &self.effective.namespace,
        );
        if !self.effective.token.is_empty() {
            session.adopt_token(self.effective.token.clone(), self.effective.token_expiry);
        }
        Ok(Client::connect(session)?)
    }

    /// Makes sure the client holds a usable token: a still-valid adopted
    /// token is reused as-is, otherwise one fresh login runs and its token
    /// is persisted for the next invocation.
    pub fn ensure_login(&mut self, client: &mut Client) -> Result<()> {
        if client.session().is_token_valid() {
            debug!(target: "nacosctl", "reusing persisted token");
            return Ok(());
        }
        client.login()?;
        self.remember_token(client.session());
        self.save()
    }

    pub fn remember_token(&mut self, session: &Session) {
        self.store.token = session.token().unwrap_or_default().to_string();
        self.store.token_expiry = session.token_expiry();
    }
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let path = settings::settings_path()?;
    let store = Settings::load(&path);

    let mut effective = store.clone();
    if let Some(server) = cli.server {
        effective.server_url = server.trim_end_matches('/').to_string();
    }
    if let Some(username) = cli.username {
        effective.username = username;
    }
    if let Some(password) = cli.password {
        effective.password = password;
    }
    if let Some(namespace) = cli.namespace {
        effective.namespace = namespace;
    }

    let mut app = App {
        store,
        effective,
        path,
    };

    match cli.command {
        Commands::Auth(args) => auth::run(args.action, &mut app),
        Commands::Config(args) => config::run(args.action, &mut app),
        Commands::Namespace(args) => namespace::run(args.action, &mut app),
    }
}
