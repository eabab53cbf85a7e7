//! Human-facing rendering: tables, success lines, error chains.

use colored::Colorize;
use nacos::BatchReport;
use nacos_protocol::{ConfigEntry, Namespace};

pub fn success(message: &str) {
    println!("{}", message.green());
}

/// Prints the error and its source chain to stderr.
pub fn print_error(error: &dyn std::error::Error) {
    eprintln!("{} {error}", "error:".red().bold());
    let mut source = error.source();
    while let Some(cause) = source {
        eprintln!("  {} {cause}", "caused by:".dimmed());
        source = cause.source();
    }
}

/// Prints each skipped item of a best-effort batch to stderr.
pub fn report_failures(report: &BatchReport) {
    for failure in &report.failures {
        eprintln!("{} {}: {}", "skipped".yellow(), failure.item, failure.error);
    }
}

pub fn render_entry(entry: &ConfigEntry) -> String {
    format!(
        "DataID: {}\nGroup: {}\nContent:\n{}\n",
        entry.data_id, entry.group, entry.content
    )
}

/// Fixed-width listing of entries; blank declared types show the inferred one.
pub fn config_table(entries: &[ConfigEntry]) -> String {
    let mut out = format!("{:<40} {:<20} {:<10}\n", "DataID", "Group", "Type");
    out.push_str(&"-".repeat(70));
    out.push('\n');
    for entry in entries {
        out.push_str(&format!(
            "{:<40} {:<20} {:<10}\n",
            entry.data_id,
            entry.group,
            entry.resolved_type()
        ));
    }
    out
}

pub fn namespace_table(namespaces: &[Namespace]) -> String {
    let mut out = format!("{:<40} {:<20} {:<50}\n", "ID", "Name", "Description");
    out.push_str(&"-".repeat(110));
    out.push('\n');
    for namespace in namespaces {
        out.push_str(&format!(
            "{:<40} {:<20} {:<50}\n",
            namespace.id,
            namespace.display_name,
            namespace.description.as_deref().unwrap_or("")
        ));
    }
    out
}

/// First character plus `****`; empty passwords stay empty.
pub fn mask_password(password: &str) -> String {
    match password.chars().next() {
        Some(first) => format!("{first}****"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(data_id: &str) -> ConfigEntry {
        ConfigEntry {
            data_id: data_id.into(),
            group: "DEFAULT_GROUP".into(),
            content: String::new(),
            config_type: None,
        }
    }

    #[test]
    fn mask_keeps_only_the_first_character() {
        assert_eq!(mask_password("secret"), "s****");
        assert_eq!(mask_password("x"), "x****");
        assert_eq!(mask_password(""), "");
    }

    #[test]
    fn config_table_shows_inferred_types() {
        let table = config_table(&[entry("app.yaml"), entry("flags")]);
        assert!(table.contains("app.yaml"));
        assert!(table.contains("yaml"));
        assert!(table.contains("text"));
        assert!(table.starts_with("DataID"));
    }

    #[test]
    fn config_table_pads_columns() {
        let table = config_table(&[entry("a.json")]);
        let row = table.lines().nth(2).unwrap();
        assert!(row.starts_with("a.json "));
        // dataId column is 40 wide plus the separating space
        assert_eq!(&row[41..61], "DEFAULT_GROUP       ");
    }

    #[test]
    fn namespace_table_handles_missing_description() {
        let table = namespace_table(&[Namespace {
            id: "dev".into(),
            display_name: "Development".into(),
            description: None,
            quota: 200,
            config_count: 0,
            kind: 2,
        }]);
        assert!(table.contains("dev"));
        assert!(table.contains("Development"));
    }

    #[test]
    fn render_entry_prints_content_block() {
        let mut e = entry("app.yaml");
        e.content = "a: 1".into();
        assert_eq!(
            render_entry(&e),
            "DataID: app.yaml\nGroup: DEFAULT_GROUP\nContent:\na: 1\n"
        );
    }
}
