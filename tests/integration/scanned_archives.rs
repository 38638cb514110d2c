//! Installing archives scanned from disk

use super::test_utils::{extract_listing, layout_game, write_file};
use modroot::installer::{AutoAccept, GuessedName, Installer, InstallerConfig, SimpleInstaller};
use modroot::tree::builder::TreeBuilder;
use modroot::tree::hasher;
use modroot::tree::walker::WalkerConfig;
use tempfile::TempDir;

#[test]
fn test_scanned_wrapped_archive_installs_data_folder() {
    let temp = TempDir::new().unwrap();
    extract_listing(
        temp.path(),
        &[
            "Cool Armor v1.2/Data/meshes/armor.nif",
            "Cool Armor v1.2/Data/CoolArmor.esp",
            "Cool Armor v1.2/Readme.txt",
        ],
    );

    let tree = TreeBuilder::new(temp.path().to_path_buf()).build().unwrap();
    let installer = SimpleInstaller::new(layout_game(), InstallerConfig::default());
    let outcome = installer.install(&mut GuessedName::default(), tree, &mut AutoAccept);
    let installed = outcome.into_tree().unwrap();

    let files: Vec<String> = installed
        .files(installed.root())
        .into_iter()
        .map(|(path, meta)| {
            assert!(meta.source.as_ref().unwrap().exists());
            path
        })
        .collect();
    assert_eq!(files, vec!["CoolArmor.esp", "meshes/armor.nif"]);
}

#[test]
fn test_os_junk_is_ignored() {
    let temp = TempDir::new().unwrap();
    extract_listing(
        temp.path(),
        &["MyMod/meshes/a.nif", "MyMod/.DS_Store", "__MACOSX/MyMod/._a.nif"],
    );

    let tree = TreeBuilder::new(temp.path().to_path_buf()).build().unwrap();
    let installer = SimpleInstaller::new(layout_game(), InstallerConfig::default());
    assert!(installer.is_archive_supported(&tree));

    let installed = installer
        .install(&mut GuessedName::default(), tree, &mut AutoAccept)
        .into_tree()
        .unwrap();
    assert_eq!(
        installed.walk(installed.root()),
        vec!["meshes/", "meshes/a.nif"]
    );
}

#[test]
fn test_junk_breaks_detection_without_ignore_patterns() {
    let temp = TempDir::new().unwrap();
    extract_listing(temp.path(), &["MyMod/meshes/a.nif", "__MACOSX/MyMod/._a.nif"]);

    let config = WalkerConfig {
        ignore_patterns: vec![],
        ..WalkerConfig::default()
    };
    let tree = TreeBuilder::new(temp.path().to_path_buf())
        .with_walker_config(config)
        .build()
        .unwrap();
    let installer = SimpleInstaller::new(layout_game(), InstallerConfig::default());
    assert!(!installer.is_archive_supported(&tree));
}

#[test]
fn test_content_hashing_distinguishes_archives() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write_file(first.path(), "Data/plugin.esp", "version one");
    write_file(second.path(), "Data/plugin.esp", "version two");

    let hashed = |dir: &TempDir| {
        let tree = TreeBuilder::new(dir.path().to_path_buf())
            .with_content_hashing(true)
            .build()
            .unwrap();
        hasher::digest(&tree, tree.root())
    };
    let unhashed = |dir: &TempDir| {
        let tree = TreeBuilder::new(dir.path().to_path_buf()).build().unwrap();
        hasher::digest(&tree, tree.root())
    };

    assert_ne!(hashed(&first), hashed(&second));
    // Same names and sizes: only content hashing tells them apart.
    assert_eq!(unhashed(&first), unhashed(&second));
}

#[test]
fn test_empty_directories_survive_install() {
    let temp = TempDir::new().unwrap();
    extract_listing(temp.path(), &["pkg/textures/", "pkg/plugin.esp"]);

    let tree = TreeBuilder::new(temp.path().to_path_buf()).build().unwrap();
    let installer = SimpleInstaller::new(layout_game(), InstallerConfig::default());
    let installed = installer
        .install(&mut GuessedName::default(), tree, &mut AutoAccept)
        .into_tree()
        .unwrap();
    assert_eq!(
        installed.walk(installed.root()),
        vec!["plugin.esp", "textures/"]
    );
}

#[test]
fn test_case_colliding_documents_still_install() {
    let temp = TempDir::new().unwrap();
    extract_listing(temp.path(), &["Data/x.esp", "readme.txt", "README.TXT"]);
    if std::fs::read_dir(temp.path()).unwrap().count() < 3 {
        return;
    }

    let tree = TreeBuilder::new(temp.path().to_path_buf()).build().unwrap();
    let installer = SimpleInstaller::new(layout_game(), InstallerConfig::default());
    let installed = installer
        .install(&mut GuessedName::default(), tree, &mut AutoAccept)
        .into_tree()
        .unwrap();
    assert_eq!(installed.walk(installed.root()), vec!["x.esp"]);
}
