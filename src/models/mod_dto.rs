use camino::{Utf8Path, Utf8PathBuf};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Install layout label assigned to a mod when it is added.
///
/// `Unknown` means the archive was scanned and carried no marker;
/// `Unrecognized` means the archive could not be scanned at all.
#[derive(Serialize, Deserialize, Display, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ModType {
    ClientMod,
    ServerMod,
    PluginMod,
    CombinedMod,
    PluginType,
    Unknown,
    #[default]
    #[serde(other)]
    Unrecognized,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Mod {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub archive_path: Utf8PathBuf,
    #[serde(default)]
    pub mod_type: ModType,
    #[serde(default)]
    pub enabled: bool,
}

impl Mod {
    pub fn new(archive_path: &Utf8Path, mod_type: ModType) -> Self {
        Self {
            name: Self::default_name(archive_path),
            archive_path: archive_path.to_owned(),
            mod_type,
            enabled: false,
        }
    }

    /// Archive file name without its extension.
    pub fn default_name(archive_path: &Utf8Path) -> String {
        archive_path
            .file_stem()
            .or_else(|| archive_path.file_name())
            .unwrap_or_default()
            .to_string()
    }
}

/// Persisted form of the mod list and the game it installs into.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModConfig {
    #[serde(default)]
    pub game_path: Utf8PathBuf,
    #[serde(default)]
    pub mods: Vec<Mod>,
}

impl ModConfig {
    pub fn new(game_path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            game_path: game_path.into(),
            mods: Vec::new(),
        }
    }

    /// Fills in values a hand-edited or older config may be missing.
    pub fn fill_defaults(&mut self) {
        for m in self.mods.iter_mut().filter(|m| m.name.trim().is_empty()) {
            m.name = Mod::default_name(&m.archive_path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let json = r#"{"gamePath": "/games/spt", "mods": [{"archivePath": "/mods/Weather.zip"}]}"#;
        let mut config: ModConfig = serde_json::from_str(json).unwrap();
        config.fill_defaults();

        let m = &config.mods[0];
        assert_eq!(m.name, "Weather");
        assert_eq!(m.mod_type, ModType::Unrecognized);
        assert!(!m.enabled);
    }

    #[test]
    fn unknown_mod_type_loads_as_unrecognized() {
        let json = r#"{"name": "x", "archivePath": "x.zip", "modType": "ShaderPack", "enabled": true}"#;
        let m: Mod = serde_json::from_str(json).unwrap();
        assert_eq!(m.mod_type, ModType::Unrecognized);
        assert!(m.enabled);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"{"gamePath": "g", "theme": "dark", "mods": []}"#;
        let config: ModConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.game_path, "g");
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let m = Mod::new(Utf8Path::new("mods/SAIN.7z"), ModType::ClientMod);
        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(value["archivePath"], "mods/SAIN.7z");
        assert_eq!(value["modType"], "ClientMod");
        assert_eq!(value["name"], "SAIN");
    }
}
