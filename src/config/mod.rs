use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::{AppMeta, NetworkKind, NetworkRegistry};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppSection {
    pub name: Option<String>,
    pub logo_url: Option<String>,
}

/// Per-network overrides; the chain id is fixed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkOverride {
    pub rpc: Option<String>,
    pub explorer: Option<String>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworksSection {
    pub mainnet: Option<NetworkOverride>,
    pub sepolia: Option<NetworkOverride>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletSection {
    /// JSON-RPC wallet endpoint; defaults to the active network's RPC
    pub rpc: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogSection {
    pub level: Option<String>,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppSection,

    #[serde(default)]
    pub networks: NetworksSection,

    #[serde(default)]
    pub wallet: WalletSection,

    #[serde(default)]
    pub log: LogSection,
}

impl Config {
    pub fn app_meta(&self) -> AppMeta {
        let defaults = AppMeta::default();
        AppMeta {
            name: non_empty(self.app.name.as_deref()).unwrap_or(defaults.name),
            logo_url: non_empty(self.app.logo_url.as_deref()).unwrap_or(defaults.logo_url),
        }
    }

    pub fn network_registry(&self) -> NetworkRegistry {
        NetworkRegistry::new(
            self.network_override(NetworkKind::Mainnet),
            self.network_override(NetworkKind::Sepolia),
        )
    }

    pub fn network_override(&self, kind: NetworkKind) -> Option<&NetworkOverride> {
        match kind {
            NetworkKind::Mainnet => self.networks.mainnet.as_ref(),
            NetworkKind::Sepolia => self.networks.sepolia.as_ref(),
        }
    }

    pub fn wallet_rpc(&self) -> Option<String> {
        non_empty(self.wallet.rpc.as_deref())
    }

    pub fn log_level(&self) -> String {
        non_empty(self.log.level.as_deref()).unwrap_or_else(|| "info".to_string())
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        non_empty(self.log.file.as_deref())
            .map(PathBuf::from)
            .or_else(|| data_dir().map(|dir| dir.join("base-pulse.log")))
    }
}

pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    load_from(&path)
}

pub fn load_from(path: &Path) -> Config {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    parse(&content)
}

pub fn parse(content: &str) -> Config {
    toml::from_str::<Config>(content).unwrap_or_default()
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("BASE_PULSE_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("base-pulse").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("base-pulse").join("config.toml"));
    }

    directories::ProjectDirs::from("org", "base-pulse", "base-pulse")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("base-pulse"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("base-pulse"));
    }
    directories::ProjectDirs::from("org", "base-pulse", "base-pulse")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
