use crate::models::error::SError;
use camino::Utf8Path;

pub struct Json;

impl Json {
    pub fn write<T: serde::Serialize>(path: &Utf8Path, data: &T) -> Result<(), SError> {
        let text = serde_json::to_string_pretty(data)?;
        std::fs::write(path, text).map_err(|e| SError::Config(format!("{path}: {e}")))
    }

    pub fn read<T: serde::de::DeserializeOwned>(path: &Utf8Path) -> Result<T, SError> {
        let s = std::fs::read_to_string(path).map_err(|e| SError::Config(format!("{path}: {e}")))?;
        serde_json::from_str::<T>(&s).map_err(|e| SError::Config(format!("{path}: {e}")))
    }
}
