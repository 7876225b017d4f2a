use crate::models::error::SError;
use crate::models::mod_dto::ModConfig;
use crate::utils::json::Json;
use crate::utils::toml::Toml;
use camino::{Utf8Path, Utf8PathBuf};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const APP_NAME: &str = "mod_switch";
const DEFAULT_CONFIG_FILE: &str = "mods.json";

/// Per-user settings stored by confy; remembers which mod config to use by default.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub version: u8,
    pub config_path: Utf8PathBuf,
}

impl Default for AppSettings {
    fn default() -> Self {
        let base_dir = ProjectDirs::from("com", "martes", APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
            .or_else(|| {
                std::env::current_exe()
                    .ok()
                    .and_then(|exe_path| exe_path.parent().map(|p| p.to_path_buf()))
            })
            .and_then(|p| Utf8PathBuf::from_path_buf(p).ok())
            .unwrap_or_else(|| Utf8PathBuf::from("."));

        Self {
            version: 0,
            config_path: base_dir.join(DEFAULT_CONFIG_FILE),
        }
    }
}

impl AppSettings {
    pub fn load() -> Result<AppSettings, SError> {
        Ok(confy::load(APP_NAME, None)?)
    }

    pub fn save(&self) -> Result<(), SError> {
        Ok(confy::store(APP_NAME, None, self)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Utf8Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

impl ModConfig {
    /// Reads the whole config. Any read or parse failure is a [`SError::Config`].
    pub fn load(path: &Utf8Path) -> Result<Self, SError> {
        let mut config: ModConfig = match ConfigFormat::from_path(path) {
            ConfigFormat::Json => Json::read(path)?,
            ConfigFormat::Toml => Toml::read(path)?,
        };
        config.fill_defaults();
        debug!("loaded {} mod(s) from {path}", config.mods.len());
        Ok(config)
    }

    /// Like [`ModConfig::load`] but falls back to an empty config, handing the error back
    /// for display instead of failing.
    pub fn load_or_default(path: &Utf8Path) -> (Self, Option<SError>) {
        match Self::load(path) {
            Ok(config) => (config, None),
            Err(e) => {
                warn!("falling back to an empty config: {e}");
                (Self::default(), Some(e))
            }
        }
    }

    /// Writes the whole config, creating the parent directory if needed.
    pub fn save(&self, path: &Utf8Path) -> Result<(), SError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| SError::Config(format!("{parent}: {e}")))?;
        }

        match ConfigFormat::from_path(path) {
            ConfigFormat::Json => Json::write(path, self),
            ConfigFormat::Toml => Toml::write(path, self),
        }
    }
}
