//! Credential and session commands.

use chrono::TimeZone;

use crate::cli::AuthAction;
use crate::commands::App;
use crate::error::Result;
use crate::output;

pub fn run(action: AuthAction, app: &mut App) -> Result<()> {
    match action {
        AuthAction::Login => login(app),
        AuthAction::Logout => logout(app),
        AuthAction::Set { username, password } => set(app, username, password),
        AuthAction::Server { url } => server(app, url),
        AuthAction::Status => status(app),
    }
}

/// Forces a fresh login even when a persisted token is still valid, so the
/// user gets a full-ttl token on demand.
fn login(app: &mut App) -> Result<()> {
    let mut client = app.client()?;
    client.login()?;
    app.remember_token(client.session());
    app.save()?;

    output::success("login succeeded");
    println!(
        "token expires at {}",
        format_expiry(client.session().token_expiry())
    );
    Ok(())
}

fn logout(app: &mut App) -> Result<()> {
    app.store.clear_token();
    app.save()?;
    output::success("logged out");
    Ok(())
}

fn set(app: &mut App, username: String, password: String) -> Result<()> {
    app.store.username = username;
    app.store.password = password;
    app.save()?;
    output::success(&format!("credentials saved to {}", app.path.display()));
    Ok(())
}

fn server(app: &mut App, url: String) -> Result<()> {
    app.store.server_url = url.trim_end_matches('/').to_string();
    app.save()?;
    output::success(&format!("server set to {}", app.store.server_url));
    Ok(())
}

fn status(app: &mut App) -> Result<()> {
    let settings = &app.effective;
    println!("server:    {}", settings.server_url);
    println!("username:  {}", settings.username);
    println!("password:  {}", output::mask_password(&settings.password));
    if settings.namespace.is_empty() {
        println!("namespace: public (default)");
    } else {
        println!("namespace: {}", settings.namespace);
    }

    let mut session = nacos::Session::new("", "", "", "");
    session.adopt_token(settings.token.clone(), settings.token_expiry);
    if session.is_token_valid() {
        println!("token:     valid until {}", format_expiry(settings.token_expiry));
    } else {
        println!("token:     none (will log in on next command)");
    }
    Ok(())
}

fn format_expiry(expiry: u64) -> String {
    chrono::Local
        .timestamp_opt(expiry as i64, 0)
        .single()
        .map(|when| when.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| format!("epoch {expiry}"))
}
