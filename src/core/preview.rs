use crate::core::archive::Archive;
use crate::core::mapper::map_entry;
use crate::models::error::SError;
use crate::models::mod_dto::Mod;
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where one archive entry would land, without touching the game directory.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PlannedEntry {
    pub entry: String,
    pub destination: Option<Utf8PathBuf>,
}

impl fmt::Display for PlannedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.destination {
            Some(dst) => write!(f, "{} -> {}", self.entry, dst),
            None => write!(f, "{} (skipped)", self.entry),
        }
    }
}

/// Dry run of [`crate::core::installer::install`]: the same mapping, no writes.
pub fn plan(game_root: &Utf8Path, mod_entry: &Mod) -> Result<Vec<PlannedEntry>, SError> {
    let mut planned = Vec::new();

    Archive::open(&mod_entry.archive_path)?.for_each_entry(|entry| {
        if let Ok(entry) = entry.as_ref() {
            if entry.is_dir {
                return;
            }
            planned.push(PlannedEntry {
                destination: map_entry(mod_entry.mod_type, &entry.name).map(|rel| game_root.join(rel)),
                entry: entry.name.clone(),
            });
        }
    })?;

    Ok(planned)
}
