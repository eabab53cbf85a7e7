//! Configuration entry commands: CRUD plus bulk export/import.

use std::fs;
use std::path::PathBuf;

use anyhow::Context as _;
use nacos::transfer;
use nacos_protocol::{ConfigEntry, ConfigType};

use crate::cli::{ConfigAction, TypeArg};
use crate::commands::App;
use crate::error::{CliError, Result};
use crate::output;

pub fn run(action: ConfigAction, app: &mut App) -> Result<()> {
    match action {
        ConfigAction::Get { data_id, group } => get(app, &data_id, &group),
        ConfigAction::Set {
            data_id,
            group,
            content,
            file,
            config_type,
        } => set(app, data_id, group, content, file, config_type),
        ConfigAction::Delete { data_id, group } => delete(app, &data_id, &group),
        ConfigAction::List { page, size } => list(app, page, size),
        ConfigAction::Export {
            dir,
            data_id,
            group,
        } => export(app, dir, data_id, group),
        ConfigAction::Import { dir, file } => import(app, dir, file),
    }
}

fn get(app: &mut App, data_id: &str, group: &str) -> Result<()> {
    let mut client = app.client()?;
    app.ensure_login(&mut client)?;

    let entry = client.get_config(data_id, group)?;
    print!("{}", output::render_entry(&entry));
    Ok(())
}

fn set(
    app: &mut App,
    data_id: String,
    group: String,
    content: Option<String>,
    file: Option<PathBuf>,
    config_type: Option<TypeArg>,
) -> Result<()> {
    let content = match (content, file) {
        (_, Some(path)) => fs::read_to_string(&path)
            .with_context(|| format!("reading content from {}", path.display()))?,
        (Some(content), None) => content,
        (None, None) => {
            return Err(CliError::Usage(
                "provide content as an argument or via --file".into(),
            ));
        }
    };

    let resolved = config_type
        .map(ConfigType::from)
        .unwrap_or_else(|| ConfigType::infer(&data_id));
    let entry = ConfigEntry {
        content,
        config_type: Some(resolved),
        data_id,
        group,
    };

    let mut client = app.client()?;
    app.ensure_login(&mut client)?;
    client.publish_config(&entry)?;

    output::success(&format!("config {}@{} published", entry.data_id, entry.group));
    Ok(())
}

fn delete(app: &mut App, data_id: &str, group: &str) -> Result<()> {
    let mut client = app.client()?;
    app.ensure_login(&mut client)?;
    client.delete_config(data_id, group)?;
    output::success(&format!("config {data_id}@{group} deleted"));
    Ok(())
}

fn list(app: &mut App, page: u32, size: u32) -> Result<()> {
    let mut client = app.client()?;
    app.ensure_login(&mut client)?;

    let entries = client.list_configs(page, size)?;
    if entries.is_empty() {
        println!("no configurations found");
        return Ok(());
    }
    print!("{}", output::config_table(&entries));
    Ok(())
}

fn export(
    app: &mut App,
    dir: PathBuf,
    data_id: Option<String>,
    group: Option<String>,
) -> Result<()> {
    let mut client = app.client()?;
    app.ensure_login(&mut client)?;

    if let (Some(data_id), Some(group)) = (data_id, group) {
        fs::create_dir_all(&dir)?;
        let entry = client.get_config(&data_id, &group)?;
        let path = transfer::export_entry(&dir, &entry)?;
        output::success(&format!("exported {group}@{data_id} to {}", path.display()));
        return Ok(());
    }

    let report = transfer::export_dir(&client, &dir)?;
    output::report_failures(&report);
    output::success(&format!(
        "exported {} of {} configs to {}",
        report.succeeded,
        report.attempted(),
        dir.display()
    ));
    Ok(())
}

fn import(app: &mut App, dir: PathBuf, file: Option<PathBuf>) -> Result<()> {
    let mut client = app.client()?;
    app.ensure_login(&mut client)?;

    if let Some(file) = file {
        let entry = transfer::import_file(&client, &dir.join(file))?;
        output::success(&format!("imported {}@{}", entry.group, entry.data_id));
        return Ok(());
    }

    let report = transfer::import_dir(&client, &dir)?;
    output::report_failures(&report);
    output::success(&format!(
        "imported {} of {} configs from {}",
        report.succeeded,
        report.attempted(),
        dir.display()
    ));
    Ok(())
}
