use crate::core::archive::Archive;
use crate::models::error::SError;
use crate::models::mod_dto::ModType;
use crate::models::paths::SPTPathRules;
use camino::Utf8Path;
use tracing::{debug, warn};

/// Marker flags collected over an archive's file entries.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Markers {
    pub has_client: bool,
    pub has_server: bool,
    pub has_dll: bool,
}

impl Markers {
    pub fn observe(&mut self, entry_path: &str) {
        let (client, server) = SPTPathRules::default().markers();
        let path = entry_path.replace('\\', "/").to_lowercase();

        self.has_client |= has_segment(&path, &client);
        self.has_server |= has_segment(&path, &server);
        self.has_dll |= path.ends_with(".dll");
    }

    pub fn mod_type(&self) -> ModType {
        match (self.has_client, self.has_server, self.has_dll) {
            (true, true, _) => ModType::CombinedMod,
            (true, false, _) => ModType::ClientMod,
            (false, true, _) => ModType::ServerMod,
            (false, false, true) => ModType::PluginType,
            (false, false, false) => ModType::Unknown,
        }
    }
}

/// `marker` is a lowercased `dir/`; it matches at the start of the path or after any `/`.
fn has_segment(path: &str, marker: &str) -> bool {
    path.starts_with(marker) || path.contains(&format!("/{marker}"))
}

/// Scans the archive's file entries without extracting anything.
pub fn scan(archive_path: &Utf8Path) -> Result<Markers, SError> {
    let mut markers = Markers::default();

    Archive::open(archive_path)?.for_each_entry(|entry| match entry {
        Ok(entry) if !entry.is_dir => markers.observe(&entry.name),
        Ok(_) => {}
        Err(e) => debug!("classifier skipped unreadable entry: {e}"),
    })?;

    Ok(markers)
}

/// Labels an archive by the layout markers it contains.
/// Returns [`ModType::Unrecognized`] when the archive cannot be scanned.
pub fn classify(archive_path: &Utf8Path) -> ModType {
    match scan(archive_path) {
        Ok(markers) => {
            let mod_type = markers.mod_type();
            debug!("classified {archive_path} as {mod_type}");
            mod_type
        }
        Err(e) => {
            warn!("unable to classify {archive_path}: {e}");
            ModType::Unrecognized
        }
    }
}
