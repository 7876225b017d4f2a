use crate::core::archive::Archive;
use crate::core::mapper::map_entry;
use crate::models::error::SError;
use crate::models::mod_dto::Mod;
use crate::models::report::ModReport;
use crate::utils::file::FileUtils;
use camino::Utf8Path;
use std::fs;
use tracing::{debug, info, instrument, warn};

/// Deletes every file the mod's archive maps to under `game_root`, then prunes
/// directories left empty, never removing `game_root` itself.
///
/// Uses the mod's recorded type; it must match the type it was installed with.
/// Destinations that are already gone are counted as missing, not as failures.
#[instrument(skip_all, fields(name = %mod_entry.name, mod_type = %mod_entry.mod_type))]
pub fn uninstall(game_root: &Utf8Path, mod_entry: &Mod) -> Result<ModReport, SError> {
    let archive = Archive::open(&mod_entry.archive_path)?;
    let mut report = ModReport::default();

    archive.for_each_entry(|entry| {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("{e}");
                report.fail_unnamed(e);
                return;
            }
        };

        if entry.is_dir {
            return;
        }

        let Some(rel) = map_entry(mod_entry.mod_type, &entry.name) else {
            report.skipped += 1;
            return;
        };

        let dst = game_root.join(&rel);
        if !dst.exists() && !dst.is_symlink() {
            report.missing += 1;
            return;
        }

        match fs::remove_file(&dst) {
            Ok(()) => {
                debug!("removed {dst}");
                FileUtils::prune_empty_ancestors(&dst, game_root);
                report.applied.push(rel);
            }
            Err(e) => {
                warn!("failed to remove {dst}: {e}");
                report.fail(entry.name, SError::fs_delete(&dst, e));
            }
        }
    })?;

    info!(
        removed = report.applied.len(),
        missing = report.missing,
        failed = report.failures.len(),
        "uninstall finished"
    );
    Ok(report)
}
