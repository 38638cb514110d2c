//! Configuration loading across layers and its effect on installation

use super::test_utils::{with_xdg_env, write_file};
use modroot::config::ConfigLoader;
use modroot::game::{CheckerKind, GameProfile};
use modroot::installer::{AutoAccept, GuessedName, Installer, SimpleInstaller};
use modroot::tree::builder::from_listing;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_global_config_is_loaded() {
    let test_dir = TempDir::new().unwrap();
    write_file(
        test_dir.path(),
        "modroot/config.toml",
        r#"
[game]
name = "Morrowind"
data_dir_name = "Data Files"
checker = "non-empty"
"#,
    );
    let workspace = TempDir::new().unwrap();

    let config = with_xdg_env(&test_dir, || ConfigLoader::load(workspace.path()).unwrap());
    assert_eq!(config.game.name, "Morrowind");
    assert_eq!(config.game.resolved_data_dir_name(), "Data Files");
    assert_eq!(config.game.checker, CheckerKind::NonEmpty);
}

#[test]
fn test_workspace_config_overrides_global() {
    let test_dir = TempDir::new().unwrap();
    write_file(
        test_dir.path(),
        "modroot/config.toml",
        r#"
[installer]
priority = 10
keep_documents = true
"#,
    );
    let workspace = TempDir::new().unwrap();
    write_file(
        workspace.path(),
        "config/config.toml",
        r#"
[installer]
priority = 99
"#,
    );

    let config = with_xdg_env(&test_dir, || ConfigLoader::load(workspace.path()).unwrap());
    assert_eq!(config.installer.priority, 99);
    assert!(config.installer.keep_documents);
}

#[test]
fn test_environment_specific_workspace_file() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    write_file(
        workspace.path(),
        "config/config.toml",
        "[scan]\nhash_contents = false\n",
    );
    write_file(
        workspace.path(),
        "config/ci.toml",
        "[scan]\nhash_contents = true\n",
    );

    let config = with_xdg_env(&test_dir, || {
        std::env::set_var("MODROOT_ENV", "ci");
        ConfigLoader::load(workspace.path()).unwrap()
    });
    assert!(config.scan.hash_contents);
}

#[test]
fn test_environment_name_must_be_a_file_stem() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    write_file(workspace.path(), "secrets.toml", "[installer]\npriority = 1\n");

    let result = with_xdg_env(&test_dir, || {
        std::env::set_var("MODROOT_ENV", "../secrets");
        ConfigLoader::load(workspace.path())
    });
    let err = result.unwrap_err();
    assert!(err.to_string().contains("MODROOT_ENV"));
}

#[test]
fn test_configured_game_drives_installation() {
    let test_dir = TempDir::new().unwrap();
    let config_file = test_dir.path().join("morrowind.toml");
    write_file(
        test_dir.path(),
        "morrowind.toml",
        r#"
[game]
name = "Morrowind"
data_path = "/games/Morrowind/Data Files"

[game.layout]
folders = ["meshes", "textures", "icons", "bookart"]
extensions = ["esp", "esm", "bsa"]
strippable = ["txt"]
"#,
    );

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    assert!(config.validate().is_ok());
    let game = Arc::new(GameProfile::from_config(&config.game));
    assert_eq!(game.data_dir_name(), "Data Files");

    let installer = SimpleInstaller::new(game, config.installer.clone());
    let tree = from_listing([
        "Wrapper/Data Files/icons/a.dds",
        "Wrapper/Data Files/mod.esp",
        "Wrapper/readme.txt",
    ])
    .unwrap();
    let installed = installer
        .install(&mut GuessedName::default(), tree, &mut AutoAccept)
        .into_tree()
        .unwrap();
    assert_eq!(
        installed.walk(installed.root()),
        vec!["icons/", "icons/a.dds", "mod.esp"]
    );
}

#[test]
fn test_missing_config_file_is_error() {
    let dir = TempDir::new().unwrap();
    assert!(ConfigLoader::load_from_file(&dir.path().join("absent.toml")).is_err());
}
