use crate::core::archive::Archive;
use crate::core::mapper::map_entry;
use crate::models::error::SError;
use crate::models::mod_dto::Mod;
use crate::models::report::ModReport;
use crate::utils::file::FileUtils;
use camino::Utf8Path;
use tracing::{debug, info, instrument, warn};

/// Extracts every mapped file of the mod's archive under `game_root`, overwriting.
///
/// Only a failure to open the archive is returned as `Err`; per-entry read
/// and write failures are logged, collected in the report, and the remaining
/// entries are still processed.
#[instrument(skip_all, fields(name = %mod_entry.name, mod_type = %mod_entry.mod_type))]
pub fn install(game_root: &Utf8Path, mod_entry: &Mod) -> Result<ModReport, SError> {
    let archive = Archive::open(&mod_entry.archive_path)?;
    let mut report = ModReport::default();

    archive.for_each_entry(|entry| {
        let mut entry = match entry {
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
            debug!("no destination for {}", entry.name);
            report.skipped += 1;
            return;
        };

        let dst = game_root.join(&rel);
        let name = entry.name.clone();
        match FileUtils::write_entry(&name, &mut entry, &dst) {
            Ok(()) => {
                debug!("wrote {dst}");
                report.applied.push(rel);
            }
            Err(e) => {
                warn!("failed to install {name}: {e}");
                report.fail(name, e);
            }
        }
    })?;

    info!(
        written = report.applied.len(),
        skipped = report.skipped,
        failed = report.failures.len(),
        "install finished"
    );
    Ok(report)
}
