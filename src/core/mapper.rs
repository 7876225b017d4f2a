//! Archive entry to game-directory layout.
//!
//! Install, uninstall and preview all resolve destinations through
//! [`map_entry`], so whatever install writes, uninstall finds again.

use crate::models::mod_dto::ModType;
use crate::models::paths::SPTPathRules;
use camino::{Utf8Path, Utf8PathBuf};

/// Normalizes an archive entry path to `a/b/c` form.
///
/// Returns `None` for paths that are empty or could escape the game root
/// (`..` segments, drive prefixes).
pub fn normalize_entry_path(raw: &str) -> Option<String> {
    let unified = raw.replace('\\', "/");
    let mut parts = Vec::new();

    for (i, segment) in unified.split('/').enumerate() {
        match segment {
            "" | "." => continue,
            ".." => return None,
            s if i == 0 && s.ends_with(':') => return None,
            s => parts.push(s),
        }
    }

    (!parts.is_empty()).then(|| parts.join("/"))
}

/// Destination of `entry_path` relative to the game root, or `None` when the
/// mod type places nothing for it.
pub fn map_entry(mod_type: ModType, entry_path: &str) -> Option<Utf8PathBuf> {
    let rules = SPTPathRules::default();
    let entry = normalize_entry_path(entry_path)?;

    match mod_type {
        ModType::ClientMod => Some(keep_or_prefix(entry, &rules.client_root, &rules.client_plugins)),
        ModType::ServerMod => Some(keep_or_prefix(entry, &rules.server_root, &rules.server_mods)),
        ModType::PluginType => {
            let file_name = entry.rsplit('/').next()?;
            Some(rules.client_plugins.join(file_name))
        }
        ModType::CombinedMod => [&rules.client_root, &rules.server_root]
            .into_iter()
            .any(|root| starts_with_dir(&entry, root))
            .then(|| Utf8PathBuf::from(entry)),
        ModType::PluginMod | ModType::Unknown | ModType::Unrecognized => None,
    }
}

fn keep_or_prefix(entry: String, root: &Utf8Path, prefix: &Utf8Path) -> Utf8PathBuf {
    if starts_with_dir(&entry, root) {
        Utf8PathBuf::from(entry)
    } else {
        prefix.join(entry)
    }
}

/// Case-insensitive `dir/` prefix test on a normalized entry path.
fn starts_with_dir(entry: &str, dir: &Utf8Path) -> bool {
    let prefix = format!("{dir}/");
    entry
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(&prefix))
}
