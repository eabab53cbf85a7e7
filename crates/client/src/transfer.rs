//! File-based bulk transfer: export entries to a directory, import them back.
//!
//! One entry becomes one file named `group@dataId`. The body is the raw
//! content, preceded - when the resolved type has a comment syntax - by a
//! small metadata header naming the DataID, Group, and Type. Import reverses
//! this: the identifying fields come from the filename, the type from the
//! dataId extension, and the header is removed by a purely syntactic prefix
//! scan.
//!
//! The scan is a heuristic, not a parser: real content whose first line is
//! blank or comment-shaped will lose that prefix on import. That is a
//! documented approximation, kept for compatibility with existing exported
//! trees.

use std::fs;
use std::path::{Path, PathBuf};

use nacos_protocol::{ConfigEntry, ConfigType};
use tracing::warn;

use crate::client::Client;
use crate::error::{Error, Result};
use crate::transport::HttpTransport;

/// Page size for the single listing call a batch export makes. Not a page
/// walk; entries beyond this are not exported.
pub const EXPORT_PAGE_SIZE: u32 = 1000;

/// Outcome of a batch export or import: best-effort, with each failure
/// recorded rather than aborting the rest.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Items written (export) or published (import).
    pub succeeded: usize,
    /// Items skipped, with the error that skipped them.
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// Total items the batch attempted.
    pub fn attempted(&self) -> usize {
        self.succeeded + self.failures.len()
    }
}

/// One skipped item of a batch.
#[derive(Debug)]
pub struct BatchFailure {
    /// `group@dataId` (export) or file name (import).
    pub item: String,
    pub error: Error,
}

/// The export file name for an entry: `group@dataId`, verbatim.
///
/// No escaping: a `@` inside dataId keeps round-tripping (import splits at
/// the first `@`), a `@` inside group does not. Known ambiguity, kept for
/// compatibility.
pub fn archive_name(entry: &ConfigEntry) -> String {
    format!("{}@{}", entry.group, entry.data_id)
}

/// Splits an export file name back into `(group, data_id)` at the first `@`.
pub fn split_archive_name(name: &str) -> Result<(String, String)> {
    match name.split_once('@') {
        Some((group, data_id)) if !group.is_empty() && !data_id.is_empty() => {
            Ok((group.to_string(), data_id.to_string()))
        }
        _ => Err(Error::ArchiveName {
            name: name.to_string(),
        }),
    }
}

/// Encodes an entry into an export file body: metadata header (by resolved
/// type) followed by the raw content.
pub fn encode_entry(entry: &ConfigEntry) -> String {
    let resolved = entry.resolved_type();
    let header = match resolved {
        // JSON has no comment syntax; the body is the bare content.
        ConfigType::Json => String::new(),
        // One comment per line so the import scan strips every header line.
        ConfigType::Xml => format!(
            "<!-- DataID: {} -->\n<!-- Group: {} -->\n<!-- Type: {} -->\n\n",
            entry.data_id, entry.group, resolved
        ),
        ConfigType::Yaml | ConfigType::Properties | ConfigType::Text => format!(
            "# DataID: {}\n# Group: {}\n# Type: {}\n\n",
            entry.data_id, entry.group, resolved
        ),
    };
    format!("{header}{}", entry.content)
}

/// Decodes an export file back into an entry.
///
/// The filename supplies group and dataId; the type comes from the dataId
/// extension alone (never from the content); the header is stripped by the
/// prefix scan.
pub fn decode_entry(file_name: &str, body: &str) -> Result<ConfigEntry> {
    let (group, data_id) = split_archive_name(file_name)?;
    let config_type = ConfigType::infer(&data_id);
    Ok(ConfigEntry {
        content: strip_header(body),
        data_id,
        group,
        config_type: Some(config_type),
    })
}

/// Drops the metadata header: skips every leading line that trims to empty,
/// starts with `#`, or starts with `<!--`; the first line matching none of
/// these starts the content. A file of nothing but such lines decodes to
/// empty content.
fn strip_header(body: &str) -> String {
    let lines: Vec<&str> = body.split('\n').collect();
    let start = lines.iter().position(|line| {
        let trimmed = line.trim();
        !(trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("<!--"))
    });
    match start {
        Some(index) => lines[index..].join("\n"),
        None => String::new(),
    }
}

/// Writes one entry into `dir` under its archive name.
pub fn export_entry(dir: &Path, entry: &ConfigEntry) -> Result<PathBuf> {
    let path = dir.join(archive_name(entry));
    fs::write(&path, encode_entry(entry))?;
    Ok(path)
}

/// Exports every entry in the session's namespace into `dir` (created if
/// absent). One listing call at [`EXPORT_PAGE_SIZE`], then one fetch and one
/// file per entry; a failing entry is recorded and the batch continues.
pub fn export_dir<T: HttpTransport>(client: &Client<T>, dir: &Path) -> Result<BatchReport> {
    fs::create_dir_all(dir)?;
    let entries = client.list_configs(1, EXPORT_PAGE_SIZE)?;

    let mut report = BatchReport::default();
    for item in entries {
        let name = archive_name(&item);
        match export_one(client, dir, &item) {
            Ok(()) => report.succeeded += 1,
            Err(error) => {
                warn!(target: "nacos", item = %name, %error, "export failed, continuing");
                report.failures.push(BatchFailure { item: name, error });
            }
        }
    }
    Ok(report)
}

fn export_one<T: HttpTransport>(
    client: &Client<T>,
    dir: &Path,
    item: &ConfigEntry,
) -> Result<()> {
    // Listing does not carry full content; fetch each entry before writing.
    let mut entry = client.get_config(&item.data_id, &item.group)?;
    entry.config_type = item.config_type;
    export_entry(dir, &entry)?;
    Ok(())
}

/// Imports one file: decode per the naming and header rules, then publish.
pub fn import_file<T: HttpTransport>(client: &Client<T>, path: &Path) -> Result<ConfigEntry> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::ArchiveName {
            name: path.display().to_string(),
        })?;
    let body = fs::read_to_string(path)?;
    let entry = decode_entry(name, &body)?;
    client.publish_config(&entry)?;
    Ok(entry)
}

/// Imports every regular file in `dir`. A failing file is recorded and the
/// batch continues; directories and other non-files are skipped silently.
pub fn import_dir<T: HttpTransport>(client: &Client<T>, dir: &Path) -> Result<BatchReport> {
    let mut report = BatchReport::default();
    for dirent in fs::read_dir(dir)? {
        let path = dirent?.path();
        if !path.is_file() {
            continue;
        }
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        match import_file(client, &path) {
            Ok(_) => report.succeeded += 1,
            Err(error) => {
                warn!(target: "nacos", item = %name, %error, "import failed, continuing");
                report.failures.push(BatchFailure { item: name, error });
            }
        }
    }
    Ok(report)
}
