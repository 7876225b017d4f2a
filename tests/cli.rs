mod common;

use camino::Utf8PathBuf;
use common::{build_zip, setup_test_env, test_mod, write_file};
use mod_switch_lib::cli::{run_from, Status};
use mod_switch_lib::models::mod_dto::{ModConfig, ModType};

fn config_path(tmp: &tempfile::TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(tmp.path().join("mods.json")).unwrap()
}

#[test]
fn test_reconcile_exit_codes() {
    let (tmp, game_root, archives) = setup_test_env();
    let path = config_path(&tmp);
    let client = archives.join("Client.zip");
    build_zip(&client, &[("Client.dll", "c")]);

    let mut config = ModConfig::new(game_root.clone());
    config.mods = vec![test_mod("Client", &client, ModType::ClientMod, true)];
    config.save(&path).unwrap();

    assert_eq!(run_from(["mod_switch", "reconcile", "--config", path.as_str()]), Status::Success);
    assert!(game_root.join("BepInEx/plugins/Client.dll").is_file());

    config
        .mods
        .push(test_mod("Gone", &archives.join("gone.zip"), ModType::ServerMod, true));
    config.save(&path).unwrap();

    let status = run_from(["mod_switch", "reconcile", "--config", path.as_str()]);
    assert_eq!(status, Status::Failure);
    assert_eq!(status.code(), 1);
}

#[test]
fn test_bad_config_exits_with_two() {
    let (tmp, _game_root, _archives) = setup_test_env();
    let path = config_path(&tmp);

    let missing = run_from(["mod_switch", "reconcile", "--config", path.as_str()]);
    assert_eq!(missing, Status::ConfigError);

    write_file(&path, "{ broken");
    let malformed = run_from(["mod_switch", "list", "-c", path.as_str()]);
    assert_eq!(malformed.code(), 2);
}

#[test]
fn test_unknown_subcommand_is_a_usage_error() {
    let status = run_from(["mod_switch", "explode"]);
    assert!(matches!(status, Status::Usage(code) if code != 0));
}

#[test]
fn test_registry_editing_flow() {
    let (tmp, game_root, archives) = setup_test_env();
    let path = config_path(&tmp);
    ModConfig::new(game_root.clone()).save(&path).unwrap();

    let server = archives.join("Weather.zip");
    build_zip(&server, &[("user/mods/Weather/package.json", "{}")]);
    let cfg = path.as_str();

    assert_eq!(run_from(["mod_switch", "add", server.as_str(), "-c", cfg]), Status::Success);
    assert_eq!(
        run_from(["mod_switch", "add", archives.join("Late.zip").as_str(), "--name", "Late", "-c", cfg]),
        Status::Success
    );

    let config = ModConfig::load(&path).unwrap();
    assert_eq!(config.mods.len(), 2);
    assert_eq!(config.mods[0].name, "Weather");
    assert_eq!(config.mods[0].mod_type, ModType::ServerMod);
    assert!(!config.mods[0].enabled);
    assert_eq!(config.mods[1].mod_type, ModType::Unrecognized);

    assert_eq!(run_from(["mod_switch", "enable", "Weather", "-c", cfg]), Status::Success);
    assert_eq!(run_from(["mod_switch", "preview", "0", "-c", cfg]), Status::Success);
    assert_eq!(run_from(["mod_switch", "remove", "1", "-c", cfg]), Status::Success);
    assert_eq!(run_from(["mod_switch", "enable", "Nope", "-c", cfg]), Status::Failure);

    let config = ModConfig::load(&path).unwrap();
    assert_eq!(config.mods.len(), 1);
    assert!(config.mods[0].enabled);

    assert_eq!(run_from(["mod_switch", "reconcile", "-c", cfg]), Status::Success);
    assert!(game_root.join("user/mods/Weather/package.json").is_file());

    assert_eq!(run_from(["mod_switch", "disable", "0", "-c", cfg]), Status::Success);
    assert_eq!(run_from(["mod_switch", "reconcile", "-c", cfg]), Status::Success);
    assert!(!game_root.join("user").exists());
}

#[test]
fn test_unchanged_registry_is_not_rewritten() {
    let (tmp, game_root, archives) = setup_test_env();
    let path = config_path(&tmp);
    let mut config = ModConfig::new(game_root);
    config.mods = vec![test_mod("Client", &archives.join("Client.zip"), ModType::ClientMod, true)];
    config.save(&path).unwrap();
    // Compact JSON: a rewrite would pretty-print it.
    let compact = serde_json::to_string(&config).unwrap();
    std::fs::write(&path, &compact).unwrap();

    assert_eq!(run_from(["mod_switch", "enable", "Client", "-c", path.as_str()]), Status::Success);
    assert_eq!(run_from(["mod_switch", "reclassify", "-c", path.as_str()]), Status::Success);

    assert_eq!(std::fs::read_to_string(&path).unwrap(), compact);
}
