//! Command-line definition for `nacosctl`.

use std::path::PathBuf;

use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{Args, Parser, Subcommand, ValueEnum};
use nacos_protocol::ConfigType;

/// Root CLI.
#[derive(Parser, Debug)]
#[command(name = "nacosctl")]
#[command(about = "Nacos configuration management from the command line")]
#[command(version)]
#[command(styles = cli_styles())]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Server base URL, overriding the stored setting for this invocation
    #[arg(long, global = true, value_name = "URL")]
    pub server: Option<String>,

    /// Username override
    #[arg(long, global = true, value_name = "NAME")]
    pub username: Option<String>,

    /// Password override
    #[arg(long, global = true, value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Namespace (tenant) override; empty means the default scope
    #[arg(long, global = true, value_name = "ID")]
    pub namespace: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage credentials and the login session.
    Auth(AuthArgs),
    /// Create, read, update, and transfer configuration entries.
    Config(ConfigArgs),
    /// Manage namespaces and the active namespace scope.
    Namespace(NamespaceArgs),
}

#[derive(Args, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub action: AuthAction,
}

#[derive(Subcommand, Debug)]
pub enum AuthAction {
    /// Log in now and persist the access token for later invocations.
    Login,
    /// Discard the persisted access token.
    Logout,
    /// Store credentials for later invocations.
    Set {
        username: String,
        password: String,
    },
    /// Store the server base URL.
    Server {
        #[arg(value_name = "URL")]
        url: String,
    },
    /// Show the stored connection settings.
    Status,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Fetch one entry and print it.
    Get {
        data_id: String,
        group: String,
    },
    /// Create or update one entry.
    Set {
        data_id: String,
        group: String,
        /// Inline content; for anything non-trivial prefer --file.
        content: Option<String>,
        /// Read content from a file instead of the argument.
        #[arg(short, long, value_name = "FILE", conflicts_with = "content")]
        file: Option<PathBuf>,
        /// Declared content type; inferred from the dataId extension when omitted.
        #[arg(long = "type", value_enum, value_name = "TYPE")]
        config_type: Option<TypeArg>,
    },
    /// Delete one entry.
    Delete {
        data_id: String,
        group: String,
    },
    /// List one page of entries.
    List {
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Page size
        #[arg(long, default_value_t = 20)]
        size: u32,
    },
    /// Export entries to a directory, one `group@dataId` file each.
    Export {
        dir: PathBuf,
        /// Export a single entry instead of the whole namespace.
        #[arg(short = 'd', long, requires = "group")]
        data_id: Option<String>,
        /// Group of the single entry to export.
        #[arg(short = 'g', long, requires = "data_id")]
        group: Option<String>,
    },
    /// Import `group@dataId` files and publish them.
    Import {
        dir: PathBuf,
        /// Import a single file (relative to DIR) instead of every file.
        #[arg(short, long, value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct NamespaceArgs {
    #[command(subcommand)]
    pub action: NamespaceAction,
}

#[derive(Subcommand, Debug)]
pub enum NamespaceAction {
    /// List all namespaces on the server.
    List,
    /// Create a namespace.
    Create {
        id: String,
        name: String,
        /// Free-form description.
        #[arg(short, long, default_value = "")]
        desc: String,
    },
    /// Delete a namespace.
    Delete {
        id: String,
    },
    /// Select the namespace scope for later invocations.
    Use {
        id: String,
    },
    /// Show the active namespace scope.
    Show,
    /// Reset to the default scope.
    Clear,
}

/// Content type flag (CLI wrapper for [`ConfigType`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TypeArg {
    Yaml,
    Properties,
    Json,
    Xml,
    Text,
}

impl From<TypeArg> for ConfigType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Yaml => ConfigType::Yaml,
            TypeArg::Properties => ConfigType::Properties,
            TypeArg::Json => ConfigType::Json,
            TypeArg::Xml => ConfigType::Xml,
            TypeArg::Text => ConfigType::Text,
        }
    }
}

/// Help styling along the lines of cargo's: bold green headers, cyan
/// literals and placeholders.
fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Cyan.on_default())
}
