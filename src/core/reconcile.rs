use crate::core::{installer, uninstaller};
use crate::models::error::SError;
use crate::models::mod_dto::{Mod, ModConfig};
use crate::models::report::{ModAction, ModOutcome, ReconcileReport};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{error, info, instrument, warn};

/// Applies the desired state of every configured mod, in registry order.
///
/// Enabled mods are installed, disabled ones uninstalled. A mod that fails is
/// recorded and the pass moves on; the pass itself never fails.
#[instrument(skip_all, fields(game = %config.game_path, mods = config.mods.len()))]
pub fn reconcile(config: &ModConfig) -> ReconcileReport {
    if config.game_path.as_str().trim().is_empty() {
        error!("gamePath is not set; nothing applied");
        let outcomes = config
            .mods
            .iter()
            .map(|m| ModOutcome {
                name: m.name.clone(),
                action: action_for(m),
                result: Err(SError::Config("gamePath is not set".into())),
            })
            .collect();
        return ReconcileReport { outcomes };
    }

    let game_root = resolve_game_root(&config.game_path);
    info!("reconciling into {game_root}");

    let outcomes = config
        .mods
        .iter()
        .map(|m| apply_mod(&game_root, m))
        .collect();

    ReconcileReport { outcomes }
}

/// Installs or uninstalls a single mod according to its `enabled` flag.
pub fn apply_mod(game_root: &Utf8Path, mod_entry: &Mod) -> ModOutcome {
    let action = action_for(mod_entry);
    let result = match action {
        ModAction::Install => installer::install(game_root, mod_entry),
        ModAction::Uninstall => uninstaller::uninstall(game_root, mod_entry),
    };

    match &result {
        Err(e) => error!("{} {action} failed: {e}", mod_entry.name),
        Ok(report) if !report.is_success() => warn!(
            "{} {action} finished with {} failed entries",
            mod_entry.name,
            report.failures.len()
        ),
        Ok(_) => info!("{} {action} ok", mod_entry.name),
    }

    ModOutcome {
        name: mod_entry.name.clone(),
        action,
        result,
    }
}

fn action_for(mod_entry: &Mod) -> ModAction {
    if mod_entry.enabled {
        ModAction::Install
    } else {
        ModAction::Uninstall
    }
}

/// Resolves the game root once per pass so every destination shares one prefix.
/// A root that does not exist yet is used as given.
fn resolve_game_root(game_path: &Utf8Path) -> Utf8PathBuf {
    dunce::canonicalize(game_path)
        .ok()
        .and_then(|p| Utf8PathBuf::from_path_buf(p).ok())
        .unwrap_or_else(|| game_path.to_owned())
}
