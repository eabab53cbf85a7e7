//! Namespace commands: remote CRUD plus the persisted scope selection.

use crate::cli::NamespaceAction;
use crate::commands::App;
use crate::error::Result;
use crate::output;

pub fn run(action: NamespaceAction, app: &mut App) -> Result<()> {
    match action {
        NamespaceAction::List => list(app),
        NamespaceAction::Create { id, name, desc } => create(app, &id, &name, &desc),
        NamespaceAction::Delete { id } => delete(app, &id),
        NamespaceAction::Use { id } => use_namespace(app, id),
        NamespaceAction::Show => show(app),
        NamespaceAction::Clear => clear(app),
    }
}

fn list(app: &mut App) -> Result<()> {
    let mut client = app.client()?;
    app.ensure_login(&mut client)?;

    let namespaces = client.list_namespaces()?;
    if namespaces.is_empty() {
        println!("no namespaces found");
        return Ok(());
    }
    print!("{}", output::namespace_table(&namespaces));
    Ok(())
}

fn create(app: &mut App, id: &str, name: &str, desc: &str) -> Result<()> {
    let mut client = app.client()?;
    app.ensure_login(&mut client)?;
    client.create_namespace(id, name, desc)?;
    output::success(&format!("namespace {name} ({id}) created"));
    Ok(())
}

fn delete(app: &mut App, id: &str) -> Result<()> {
    let mut client = app.client()?;
    app.ensure_login(&mut client)?;
    client.delete_namespace(id)?;
    output::success(&format!("namespace {id} deleted"));
    Ok(())
}

fn use_namespace(app: &mut App, id: String) -> Result<()> {
    app.store.namespace = id;
    app.save()?;
    output::success(&format!("namespace set to {}", app.store.namespace));
    Ok(())
}

fn show(app: &mut App) -> Result<()> {
    if app.effective.namespace.is_empty() {
        println!("current namespace: public (default)");
    } else {
        println!("current namespace: {}", app.effective.namespace);
    }
    Ok(())
}

fn clear(app: &mut App) -> Result<()> {
    app.store.namespace.clear();
    app.save()?;
    output::success("namespace cleared, using the default scope");
    Ok(())
}
