//! Core entities exchanged with the configuration service.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Format of a configuration entry's content.
///
/// The service stores this as a free-form string; only a small set of values
/// is meaningful. Anything else - including an empty string - degrades to
/// [`Text`](ConfigType::Text) on our side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigType {
    /// YAML document (`.yml` / `.yaml`)
    Yaml,
    /// Java properties file (`.properties`)
    Properties,
    /// JSON document (`.json`)
    Json,
    /// XML document (`.xml`)
    Xml,
    /// Plain text, the fallback for everything else
    Text,
}

impl ConfigType {
    /// Infers the type from a dataId-like string.
    ///
    /// Pure function of the trailing extension, case-sensitive: `a.yml` and
    /// `a.yaml` are YAML, `a.YAML` is not. No extension means [`Text`](Self::Text).
    ///
    /// List display, export, and import all route through this one function;
    /// do not reimplement the suffix match elsewhere.
    pub fn infer(data_id: &str) -> ConfigType {
        if data_id.ends_with(".yml") || data_id.ends_with(".yaml") {
            ConfigType::Yaml
        } else if data_id.ends_with(".properties") {
            ConfigType::Properties
        } else if data_id.ends_with(".json") {
            ConfigType::Json
        } else if data_id.ends_with(".xml") {
            ConfigType::Xml
        } else {
            ConfigType::Text
        }
    }

    /// Maps a server-side type string to a [`ConfigType`].
    ///
    /// The console UI historically wrote both `yaml` and `yml`; unknown
    /// values map to [`Text`](Self::Text) rather than failing the envelope parse.
    pub fn from_name(name: &str) -> ConfigType {
        match name {
            "yaml" | "yml" => ConfigType::Yaml,
            "properties" => ConfigType::Properties,
            "json" => ConfigType::Json,
            "xml" => ConfigType::Xml,
            _ => ConfigType::Text,
        }
    }

    /// Wire name of this type, as the publish endpoint expects it.
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigType::Yaml => "yaml",
            ConfigType::Properties => "properties",
            ConfigType::Json => "json",
            ConfigType::Xml => "xml",
            ConfigType::Text => "text",
        }
    }
}

impl fmt::Display for ConfigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad so the type slots into fixed-width table columns
        f.pad(self.as_str())
    }
}

/// One configuration entry.
///
/// `(dataId, group, tenant)` is the unique key the service indexes by; the
/// tenant (namespace) lives on the session, not here. `content` is opaque
/// text. Entries are constructed from a server response or by a caller about
/// to publish - they are never cached across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigEntry {
    /// Identifier, conventionally filename-shaped (`app.yaml`).
    pub data_id: String,
    /// Grouping key (`DEFAULT_GROUP` unless the deployment says otherwise).
    pub group: String,
    /// Raw configuration text. List responses may omit it.
    #[serde(default)]
    pub content: String,
    /// Declared content type; `None` when the server left it blank.
    #[serde(
        rename = "type",
        default,
        deserialize_with = "de_config_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub config_type: Option<ConfigType>,
}

impl ConfigEntry {
    /// The declared type if set, otherwise the dataId-extension inference.
    pub fn resolved_type(&self) -> ConfigType {
        self.config_type
            .unwrap_or_else(|| ConfigType::infer(&self.data_id))
    }
}

/// Accepts `null`, `""`, and arbitrary strings where the wire declares a type.
fn de_config_type<'de, D>(deserializer: D) -> Result<Option<ConfigType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .filter(|name| !name.is_empty())
        .map(ConfigType::from_name))
}

/// One namespace (tenant) record from the console endpoint.
///
/// Listing returns a snapshot, not a live view; `config_count` is whatever
/// the server knew at response time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Namespace {
    /// Immutable identifier. Empty string is the default (public) scope.
    #[serde(rename = "namespace")]
    pub id: String,
    /// Human-facing name shown by the console.
    #[serde(rename = "namespaceShowName")]
    pub display_name: String,
    /// Optional free-form description.
    #[serde(rename = "namespaceDesc", default)]
    pub description: Option<String>,
    /// Maximum number of entries the namespace may hold.
    pub quota: i64,
    /// Entries currently stored in the namespace.
    pub config_count: i64,
    /// Server-side namespace classification (0 = global, 2 = custom).
    #[serde(rename = "type")]
    pub kind: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inference_is_case_sensitive_and_total() {
        assert_eq!(ConfigType::infer("a.yml"), ConfigType::Yaml);
        assert_eq!(ConfigType::infer("a.yaml"), ConfigType::Yaml);
        assert_eq!(ConfigType::infer("a.YAML"), ConfigType::Text);
        assert_eq!(ConfigType::infer("a.properties"), ConfigType::Properties);
        assert_eq!(ConfigType::infer("a.json"), ConfigType::Json);
        assert_eq!(ConfigType::infer("a.xml"), ConfigType::Xml);
        assert_eq!(ConfigType::infer("a"), ConfigType::Text);
        assert_eq!(ConfigType::infer(""), ConfigType::Text);
    }

    #[test]
    fn resolved_type_prefers_declared_over_inferred() {
        let entry = ConfigEntry {
            data_id: "app.json".into(),
            group: "DEFAULT_GROUP".into(),
            content: String::new(),
            config_type: Some(ConfigType::Yaml),
        };
        assert_eq!(entry.resolved_type(), ConfigType::Yaml);

        let inferred = ConfigEntry {
            config_type: None,
            ..entry
        };
        assert_eq!(inferred.resolved_type(), ConfigType::Json);
    }

    #[test]
    fn entry_deserializes_blank_type_as_none() {
        let entry: ConfigEntry =
            serde_json::from_str(r#"{"dataId":"a.yaml","group":"g","content":"x","type":""}"#)
                .unwrap();
        assert_eq!(entry.config_type, None);

        let entry: ConfigEntry =
            serde_json::from_str(r#"{"dataId":"a","group":"g","type":null}"#).unwrap();
        assert_eq!(entry.config_type, None);
        assert_eq!(entry.content, "");
    }

    #[test]
    fn entry_deserializes_unknown_type_as_text() {
        let entry: ConfigEntry =
            serde_json::from_str(r#"{"dataId":"a","group":"g","type":"html"}"#).unwrap();
        assert_eq!(entry.config_type, Some(ConfigType::Text));
    }

    #[test]
    fn namespace_uses_console_field_names() {
        let json = r#"{
            "namespace": "dev",
            "namespaceShowName": "Development",
            "namespaceDesc": "dev scope",
            "quota": 200,
            "configCount": 7,
            "type": 2
        }"#;
        let ns: Namespace = serde_json::from_str(json).unwrap();
        assert_eq!(ns.id, "dev");
        assert_eq!(ns.display_name, "Development");
        assert_eq!(ns.description.as_deref(), Some("dev scope"));
        assert_eq!(ns.config_count, 7);
        assert_eq!(ns.kind, 2);
    }
}
