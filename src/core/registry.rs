use crate::core::classifier;
use crate::models::error::SError;
use crate::models::mod_dto::{Mod, ModType};
use camino::Utf8Path;
use tracing::{debug, info};

/// Ordered list of known mods. Order is the order reconciliation runs in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModRegistry {
    mods: Vec<Mod>,
}

impl ModRegistry {
    pub fn from_mods(mods: Vec<Mod>) -> Self {
        Self { mods }
    }

    pub fn mods(&self) -> &[Mod] {
        &self.mods
    }

    pub fn into_mods(self) -> Vec<Mod> {
        self.mods
    }

    /// Immutable copy of the current state, to diff against later.
    pub fn snapshot(&self) -> Vec<Mod> {
        self.mods.clone()
    }

    /// Classifies the archive and appends it. The type is fixed from here on.
    pub fn add_archive(&mut self, archive_path: &Utf8Path, name: Option<String>, enabled: bool) -> &Mod {
        let mod_type = classifier::classify(archive_path);
        let mut entry = Mod::new(archive_path, mod_type);
        if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
            entry.name = name;
        }
        entry.enabled = enabled;

        info!("added {} ({mod_type})", entry.name);
        self.mods.push(entry);
        &self.mods[self.mods.len() - 1]
    }

    /// Resolves a selector: a 0-based index, otherwise the first mod with that name.
    pub fn find(&self, selector: &str) -> Result<usize, SError> {
        if let Ok(index) = selector.parse::<usize>() {
            if index < self.mods.len() {
                return Ok(index);
            }
        }

        self.mods
            .iter()
            .position(|m| m.name == selector)
            .ok_or_else(|| SError::ModNotFound(selector.to_string()))
    }

    pub fn remove(&mut self, selector: &str) -> Result<Mod, SError> {
        let index = self.find(selector)?;
        let removed = self.mods.remove(index);
        info!("removed {}", removed.name);
        Ok(removed)
    }

    pub fn set_enabled(&mut self, selector: &str, enabled: bool) -> Result<&Mod, SError> {
        let index = self.find(selector)?;
        let entry = &mut self.mods[index];
        entry.enabled = enabled;
        debug!("{} enabled={enabled}", entry.name);
        Ok(entry)
    }

    /// Re-runs classification for mods whose archive could not be read before.
    /// `Unknown` is a final answer and is left alone. Returns how many changed.
    pub fn retry_unrecognized(&mut self) -> usize {
        self.mods
            .iter_mut()
            .filter(|m| m.mod_type == ModType::Unrecognized)
            .map(|m| {
                let mod_type = classifier::classify(&m.archive_path);
                let changed = mod_type != ModType::Unrecognized;
                if changed {
                    info!("{} is now {mod_type}", m.name);
                    m.mod_type = mod_type;
                }
                changed
            })
            .filter(|changed| *changed)
            .count()
    }
}

/// Difference between two registry snapshots.
///
/// Mods are matched by (name, archive path); duplicates pair up in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegistryDiff {
    pub added: Vec<Mod>,
    pub removed: Vec<Mod>,
    pub toggled: Vec<Mod>,
    pub reclassified: Vec<Mod>,
    pub reordered: bool,
}

impl RegistryDiff {
    pub fn between(original: &[Mod], current: &[Mod]) -> Self {
        let mut diff = Self::default();
        let mut matched = vec![false; original.len()];
        let mut order = Vec::new();

        for m in current {
            let found = (0..original.len()).find(|&i| !matched[i] && same_mod(&original[i], m));

            let Some(i) = found else {
                diff.added.push(m.clone());
                continue;
            };

            matched[i] = true;
            order.push(i);
            if original[i].enabled != m.enabled {
                diff.toggled.push(m.clone());
            }
            if original[i].mod_type != m.mod_type {
                diff.reclassified.push(m.clone());
            }
        }

        diff.removed = original
            .iter()
            .zip(&matched)
            .filter(|(_, hit)| !**hit)
            .map(|(m, _)| m.clone())
            .collect();
        diff.reordered = order.windows(2).any(|w| w[0] > w[1]);
        diff
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.toggled.is_empty()
            && self.reclassified.is_empty()
            && !self.reordered
    }
}

fn same_mod(a: &Mod, b: &Mod) -> bool {
    a.name == b.name && a.archive_path == b.archive_path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(name: &str, enabled: bool) -> Mod {
        Mod {
            name: name.into(),
            archive_path: format!("/archives/{name}.zip").into(),
            mod_type: ModType::ClientMod,
            enabled,
        }
    }

    fn registry() -> ModRegistry {
        ModRegistry::from_mods(vec![m("Alpha", true), m("Beta", false), m("Alpha", false)])
    }

    #[test]
    fn find_by_index_then_name() {
        let reg = registry();
        assert_eq!(reg.find("1").unwrap(), 1);
        assert_eq!(reg.find("Alpha").unwrap(), 0);
        assert_eq!(reg.find("Gamma"), Err(SError::ModNotFound("Gamma".into())));
    }

    #[test]
    fn unchanged_registry_has_empty_diff() {
        let reg = registry();
        let snap = reg.snapshot();
        assert!(RegistryDiff::between(&snap, reg.mods()).is_empty());
    }

    #[test]
    fn toggle_shows_up_in_diff_and_reverting_clears_it() {
        let mut reg = registry();
        let snap = reg.snapshot();

        reg.set_enabled("Beta", true).unwrap();
        let diff = RegistryDiff::between(&snap, reg.mods());
        assert_eq!(diff.toggled.len(), 1);
        assert_eq!(diff.toggled[0].name, "Beta");

        reg.set_enabled("Beta", false).unwrap();
        assert!(RegistryDiff::between(&snap, reg.mods()).is_empty());
    }

    #[test]
    fn duplicate_names_pair_in_order() {
        let mut reg = registry();
        let snap = reg.snapshot();

        reg.remove("2").unwrap();
        let diff = RegistryDiff::between(&snap, reg.mods());
        assert_eq!(diff.removed.len(), 1);
        assert!(!diff.removed[0].enabled);
        assert!(diff.toggled.is_empty());
        assert!(!diff.reordered);
    }

    #[test]
    fn reorder_is_a_change() {
        let reg = registry();
        let snap = reg.snapshot();
        let mut mods = reg.into_mods();
        mods.swap(0, 1);

        let diff = RegistryDiff::between(&snap, &mods);
        assert!(diff.reordered);
        assert!(!diff.is_empty());
    }
}
