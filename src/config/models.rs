use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub views: ViewsConfig,
    /// Presenters keyed by the name actions pass to `using`
    #[serde(default = "default_presenters")]
    pub presenters: BTreeMap<String, PresenterConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            dispatch: DispatchConfig::default(),
            views: ViewsConfig::default(),
            presenters: default_presenters(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

/// Registry-wide dispatch options
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DispatchConfig {
    /// Stripped from the start of controller identifiers when deriving views
    #[serde(default)]
    pub controller_prefix: String,
    /// Stripped from the end of controller identifiers when deriving views
    #[serde(default = "default_controller_suffix")]
    pub controller_suffix: String,
    /// Extra registry options; nested tables flatten to dotted keys
    #[serde(default)]
    pub options: Map<String, Value>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            controller_prefix: String::new(),
            controller_suffix: default_controller_suffix(),
            options: Map::new(),
        }
    }
}

fn default_controller_suffix() -> String {
    "Controller".to_string()
}

/// View engine configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ViewsConfig {
    /// Directory holding `<view>/<segments>.html` templates
    #[serde(default = "default_views_path")]
    pub path: PathBuf,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            path: default_views_path(),
        }
    }
}

fn default_views_path() -> PathBuf {
    PathBuf::from("views")
}

/// Built-in presenter implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenterKind {
    Html,
    Json,
}

/// One presenter registration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PresenterConfig {
    pub kind: PresenterKind,
    /// Values accepted by the `presentUsing` route parameter
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Content types answered during negotiation
    #[serde(default)]
    pub mimes: Vec<String>,
    /// Options merged into the registry; nested tables flatten to dotted keys
    #[serde(default)]
    pub options: Map<String, Value>,
}

fn default_presenters() -> BTreeMap<String, PresenterConfig> {
    BTreeMap::from([
        (
            "html".to_string(),
            PresenterConfig {
                kind: PresenterKind::Html,
                extensions: Vec::new(),
                mimes: vec!["text/html".to_string(), "application/xhtml+xml".to_string()],
                options: Map::new(),
            },
        ),
        (
            "json".to_string(),
            PresenterConfig {
                kind: PresenterKind::Json,
                extensions: vec!["json".to_string()],
                mimes: vec!["application/json".to_string()],
                options: Map::new(),
            },
        ),
    ])
}
