use crate::models::error::SError;
use camino::Utf8PathBuf;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Display, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModAction {
    #[display("install")]
    Install,
    #[display("uninstall")]
    Uninstall,
}

/// An archive entry that could not be applied.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EntryFailure {
    pub entry: String,
    pub error: SError,
}

/// Per-entry result of installing or uninstalling one archive.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ModReport {
    /// Destinations written (install) or deleted (uninstall), relative to the game root.
    pub applied: Vec<Utf8PathBuf>,
    /// Entries the path mapping has no destination for.
    pub skipped: usize,
    /// Uninstall only: mapped destinations that were already absent.
    pub missing: usize,
    pub failures: Vec<EntryFailure>,
}

impl ModReport {
    pub fn fail(&mut self, entry: impl Into<String>, error: SError) {
        self.failures.push(EntryFailure {
            entry: entry.into(),
            error,
        });
    }

    /// Records an error raised before the entry's name was known, labelled with
    /// whatever the error itself carries.
    pub fn fail_unnamed(&mut self, error: SError) {
        let entry = match &error {
            SError::ArchiveRead { entry, .. } => entry.clone(),
            other => other.to_string(),
        };
        self.fail(entry, error);
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ModOutcome {
    pub name: String,
    pub action: ModAction,
    pub result: Result<ModReport, SError>,
}

impl ModOutcome {
    pub fn is_success(&self) -> bool {
        self.result.as_ref().is_ok_and(ModReport::is_success)
    }

    /// One line per problem, prefixed with the mod name.
    pub fn error_lines(&self) -> Vec<String> {
        match &self.result {
            Err(e) => vec![format!("{}: {} failed: {}", self.name, self.action, e)],
            Ok(report) => report
                .failures
                .iter()
                .map(|f| format!("{}: {} failed for {}: {}", self.name, self.action, f.entry, f.error))
                .collect(),
        }
    }
}

impl fmt::Display for ModOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Err(e) => write!(f, "[failed] {} ({}): {}", self.name, self.action, e),
            Ok(r) => {
                let status = if r.is_success() { "ok" } else { "partial" };
                write!(
                    f,
                    "[{status}] {} ({}): {} applied, {} skipped",
                    self.name,
                    self.action,
                    r.applied.len(),
                    r.skipped
                )?;
                if r.missing > 0 {
                    write!(f, ", {} already absent", r.missing)?;
                }
                if !r.is_success() {
                    write!(f, ", {} failed", r.failures.len())?;
                }
                Ok(())
            }
        }
    }
}

/// Aggregate result of one reconciliation pass, in registry order.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ReconcileReport {
    pub outcomes: Vec<ModOutcome>,
}

impl ReconcileReport {
    pub fn failed(&self) -> impl Iterator<Item = &ModOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn is_success(&self) -> bool {
        self.failed().next().is_none()
    }
}

impl fmt::Display for ReconcileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            writeln!(f, "{outcome}")?;
        }
        let failed = self.failed().count();
        write!(f, "{} mod(s) processed, {} failed", self.outcomes.len(), failed)
    }
}
