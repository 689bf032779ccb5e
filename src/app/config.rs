use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub timing: TimingConfig,
    pub interface: InterfaceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Empty host keeps the client offline.
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub announce_debounce_ms: u64,
    pub multiletter_idle_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceConfig {
    pub bell: bool,
    /// Backspace on this menu never navigates away.
    pub root_menu_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            timing: TimingConfig::default(),
            interface: InterfaceConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 5000,
            username: String::new(),
            password: String::new(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            announce_debounce_ms: 300,
            multiletter_idle_ms: 150,
        }
    }
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            bell: true,
            root_menu_id: "main".to_string(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn announce_debounce(&self) -> Duration {
        Duration::from_millis(self.timing.announce_debounce_ms)
    }

    #[must_use]
    pub fn multiletter_idle(&self) -> Duration {
        Duration::from_millis(self.timing.multiletter_idle_ms)
    }
}

pub fn config_dir() -> Option<PathBuf> {
    home::home_dir().map(|mut path| {
        path.push(".config");
        path.push("parlor");
        path
    })
}

pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|mut path| {
        path.push("config.toml");
        path
    })
}

pub fn load() -> Config {
    config_path()
        .and_then(|path| load_from(&path))
        .unwrap_or_default()
}

pub fn load_from(path: &Path) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(err) => {
            tracing::warn!(error = %err, path = %path.display(), "ignoring malformed config");
            None
        }
    }
}

/// Best-effort write; a read-only home directory is not worth failing over.
pub fn save(config: &Config) {
    if let Some(path) = config_path() {
        save_to(&path, config);
    }
}

pub fn save_to(path: &Path, config: &Config) {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Ok(content) = toml::to_string_pretty(config) {
        let _ = std::fs::write(path, content);
    }
}
