use crate::config::AppSettings;
use crate::core::registry::{ModRegistry, RegistryDiff};
use crate::core::{classifier, preview, reconcile};
use crate::models::error::SError;
use crate::models::mod_dto::ModConfig;
use crate::utils::logging;
use camino::Utf8PathBuf;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::ffi::OsString;
use std::process::ExitCode;
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(name = "mod_switch", author, version, about)]
pub struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Also write logs to a daily rolling file in this directory.
    #[arg(long, value_name = "DIR", global = true)]
    log_dir: Option<Utf8PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct ConfigArg {
    /// Mod config file (.json or .toml). Defaults to the remembered one.
    #[arg(short, long, value_name = "PATH")]
    config: Option<Utf8PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Install every enabled mod and uninstall every disabled one.
    Reconcile {
        #[command(flatten)]
        config: ConfigArg,
    },
    /// Create an empty mod config for a game directory and remember it.
    Init {
        game_path: Utf8PathBuf,
        #[command(flatten)]
        config: ConfigArg,
    },
    /// Print the mod type detected for an archive.
    Classify { archive: Utf8PathBuf },
    /// List configured mods in reconcile order.
    List {
        #[command(flatten)]
        config: ConfigArg,
    },
    /// Classify an archive and append it to the mod list.
    Add {
        archive: Utf8PathBuf,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        enable: bool,
        #[command(flatten)]
        config: ConfigArg,
    },
    /// Drop a mod from the list (files stay until a reconcile with it disabled).
    Remove {
        /// Index or name.
        selector: String,
        #[command(flatten)]
        config: ConfigArg,
    },
    /// Mark a mod enabled.
    Enable {
        selector: String,
        #[command(flatten)]
        config: ConfigArg,
    },
    /// Mark a mod disabled.
    Disable {
        selector: String,
        #[command(flatten)]
        config: ConfigArg,
    },
    /// Show where each entry of a mod's archive would be installed.
    Preview {
        selector: String,
        #[command(flatten)]
        config: ConfigArg,
    },
    /// Retry classification of mods whose archive could not be read when added.
    Reclassify {
        #[command(flatten)]
        config: ConfigArg,
    },
}

/// Process exit status of a CLI invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
    ConfigError,
    Usage(u8),
}

impl Status {
    pub fn code(self) -> u8 {
        match self {
            Status::Success => 0,
            Status::Failure => 1,
            Status::ConfigError => 2,
            Status::Usage(code) => code,
        }
    }
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        ExitCode::from(status.code())
    }
}

impl From<&SError> for Status {
    fn from(e: &SError) -> Self {
        if e.is_config() {
            Status::ConfigError
        } else {
            Status::Failure
        }
    }
}

/// Parses `args` (program name first) and runs the command.
pub fn run_from<I, T>(args: I) -> Status
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return Status::Usage(e.exit_code().clamp(0, 255) as u8);
        }
    };

    let _guard = logging::init(cli.verbose, cli.log_dir.as_deref());
    debug!("{:?}", cli.command);

    match execute(cli.command) {
        Ok(status) => status,
        Err(e) => {
            eprintln!("error: {e}");
            Status::from(&e)
        }
    }
}

fn execute(command: Command) -> Result<Status, SError> {
    match command {
        Command::Reconcile { config } => {
            let path = resolve_config_path(config)?;
            let mod_config = ModConfig::load(&path)?;
            let report = reconcile::reconcile(&mod_config);

            println!("{report}");
            for outcome in report.failed() {
                for line in outcome.error_lines() {
                    eprintln!("{line}");
                }
            }

            Ok(if report.is_success() { Status::Success } else { Status::Failure })
        }
        Command::Init { game_path, config } => {
            let path = match config.config {
                Some(path) => path,
                None => AppSettings::load()?.config_path,
            };
            ModConfig::new(game_path).save(&path)?;

            let mut settings = AppSettings::load()?;
            settings.config_path = path.clone();
            settings.save()?;

            println!("created {path}");
            Ok(Status::Success)
        }
        Command::Classify { archive } => {
            let mod_type = classifier::classify(&archive);
            println!("{mod_type}");
            Ok(Status::Success)
        }
        Command::List { config } => {
            let path = resolve_config_path(config)?;
            let mod_config = ModConfig::load(&path)?;

            println!("game: {}", mod_config.game_path);
            for (i, m) in mod_config.mods.iter().enumerate() {
                let mark = if m.enabled { "x" } else { " " };
                println!("{i:>3} [{mark}] {} ({}) {}", m.name, m.mod_type, m.archive_path);
            }
            Ok(Status::Success)
        }
        Command::Add {
            archive,
            name,
            enable,
            config,
        } => edit_registry(config, |registry| {
            let added = registry.add_archive(&archive, name, enable);
            println!("added {} as {}", added.name, added.mod_type);
            Ok(())
        }),
        Command::Remove { selector, config } => edit_registry(config, |registry| {
            let removed = registry.remove(&selector)?;
            println!("removed {}", removed.name);
            Ok(())
        }),
        Command::Enable { selector, config } => {
            edit_registry(config, |registry| registry.set_enabled(&selector, true).map(|_| ()))
        }
        Command::Disable { selector, config } => {
            edit_registry(config, |registry| registry.set_enabled(&selector, false).map(|_| ()))
        }
        Command::Preview { selector, config } => {
            let path = resolve_config_path(config)?;
            let mod_config = ModConfig::load(&path)?;
            let registry = ModRegistry::from_mods(mod_config.mods);
            let target = &registry.mods()[registry.find(&selector)?];

            println!("{} ({})", target.name, target.mod_type);
            for planned in preview::plan(&mod_config.game_path, target)? {
                println!("  {planned}");
            }
            Ok(Status::Success)
        }
        Command::Reclassify { config } => edit_registry(config, |registry| {
            let changed = registry.retry_unrecognized();
            println!("{changed} mod(s) reclassified");
            Ok(())
        }),
    }
}

/// Loads the config, applies `edit` to its registry and saves only if something changed.
fn edit_registry<F>(config: ConfigArg, edit: F) -> Result<Status, SError>
where
    F: FnOnce(&mut ModRegistry) -> Result<(), SError>,
{
    let path = resolve_config_path(config)?;
    let mut mod_config = ModConfig::load(&path)?;

    let mut registry = ModRegistry::from_mods(std::mem::take(&mut mod_config.mods));
    let original = registry.snapshot();
    edit(&mut registry)?;

    if RegistryDiff::between(&original, registry.mods()).is_empty() {
        println!("no changes");
        return Ok(Status::Success);
    }

    mod_config.mods = registry.into_mods();
    mod_config.save(&path)?;
    info!("saved {path}");
    Ok(Status::Success)
}

fn resolve_config_path(arg: ConfigArg) -> Result<Utf8PathBuf, SError> {
    match arg.config {
        Some(path) => Ok(path),
        None => Ok(AppSettings::load()?.config_path),
    }
}
