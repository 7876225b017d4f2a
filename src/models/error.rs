use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum SError {
    #[error("unable to open archive {path}: {reason}")]
    ArchiveOpen { path: String, reason: String },
    #[error("unable to read archive entry {entry}: {reason}")]
    ArchiveRead { entry: String, reason: String },
    #[error("unable to write {path}: {reason}")]
    FilesystemWrite { path: String, reason: String },
    #[error("unable to delete {path}: {reason}")]
    FilesystemDelete { path: String, reason: String },
    #[error("configuration error: {0}")]
    Config(String),
    #[error("no mod matches '{0}'")]
    ModNotFound(String),
    #[error("io error: {0}")]
    IOError(String),
}

impl SError {
    pub fn archive_open(path: impl ToString, reason: impl ToString) -> Self {
        Self::ArchiveOpen {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn archive_read(entry: impl ToString, reason: impl ToString) -> Self {
        Self::ArchiveRead {
            entry: entry.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn fs_write(path: impl ToString, reason: impl ToString) -> Self {
        Self::FilesystemWrite {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn fs_delete(path: impl ToString, reason: impl ToString) -> Self {
        Self::FilesystemDelete {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    /// True for errors that come from reading or parsing the config store.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl From<std::io::Error> for SError {
    fn from(e: std::io::Error) -> Self {
        Self::IOError(e.to_string())
    }
}

impl From<serde_json::Error> for SError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<toml::de::Error> for SError {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for SError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<confy::ConfyError> for SError {
    fn from(e: confy::ConfyError) -> Self {
        Self::Config(e.to_string())
    }
}
