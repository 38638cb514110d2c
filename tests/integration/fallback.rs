//! Installer fallback ordering

use super::test_utils::layout_game;
use modroot::installer::{
    install_with_fallback, AutoAccept, GuessQuality, GuessedName, InstallOutcome, InstallPrompt,
    Installer, InstallerConfig, PromptDecision, SimpleInstaller,
};
use modroot::tree::builder::from_listing;
use modroot::tree::FileTree;
use std::cell::Cell;

/// Installer that supports everything and records whether it ran
struct Recording {
    name: &'static str,
    priority: i32,
    manual: bool,
    supports: bool,
    ran: Cell<bool>,
}

impl Recording {
    fn new(name: &'static str, priority: i32) -> Self {
        Self {
            name,
            priority,
            manual: false,
            supports: true,
            ran: Cell::new(false),
        }
    }
}

impl Installer for Recording {
    fn name(&self) -> &str {
        self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn is_manual_installer(&self) -> bool {
        self.manual
    }

    fn is_active(&self) -> bool {
        true
    }

    fn is_archive_supported(&self, _tree: &FileTree) -> bool {
        self.supports
    }

    fn install(
        &self,
        _name: &mut GuessedName,
        tree: FileTree,
        _prompt: &mut dyn InstallPrompt,
    ) -> InstallOutcome {
        self.ran.set(true);
        InstallOutcome::Installed(tree)
    }
}

fn name() -> GuessedName {
    GuessedName::new("Some Mod", GuessQuality::Good)
}

#[test]
fn test_higher_priority_installer_wins() {
    let simple = SimpleInstaller::new(layout_game(), InstallerConfig::default());
    let low = Recording::new("Low", 10);
    let tree = from_listing(["meshes/a.nif"]).unwrap();

    let dispatch = install_with_fallback(&[&low, &simple], &mut name(), &tree, &mut AutoAccept);
    assert_eq!(dispatch.installer.as_deref(), Some("Simple Installer"));
    assert!(matches!(dispatch.outcome, InstallOutcome::Installed(_)));
    assert!(!low.ran.get());
}

#[test]
fn test_unsupported_archive_falls_through() {
    let simple = SimpleInstaller::new(layout_game(), InstallerConfig::default());
    let low = Recording::new("Low", 10);
    let tree = from_listing(["docs/a.txt", "docs2/b.txt"]).unwrap();

    let dispatch = install_with_fallback(&[&simple, &low], &mut name(), &tree, &mut AutoAccept);
    assert_eq!(dispatch.installer.as_deref(), Some("Low"));
    assert!(low.ran.get());
}

#[test]
fn test_manual_and_inactive_installers_are_skipped() {
    let disabled = SimpleInstaller::new(
        layout_game(),
        InstallerConfig {
            enabled: false,
            ..InstallerConfig::default()
        },
    );
    let mut manual = Recording::new("Manual", 1000);
    manual.manual = true;
    let tree = from_listing(["meshes/a.nif"]).unwrap();

    let dispatch = install_with_fallback(&[&disabled, &manual], &mut name(), &tree, &mut AutoAccept);
    assert!(dispatch.installer.is_none());
    assert!(matches!(dispatch.outcome, InstallOutcome::NotSupported));
    assert!(!manual.ran.get());
}

#[test]
fn test_cancel_is_final() {
    struct CancelAll;
    impl InstallPrompt for CancelAll {
        fn confirm(&mut self, _name: &GuessedName) -> PromptDecision {
            PromptDecision::Cancel
        }
    }

    let simple = SimpleInstaller::new(layout_game(), InstallerConfig::default());
    let low = Recording::new("Low", 10);
    let tree = from_listing(["meshes/a.nif"]).unwrap();

    let dispatch = install_with_fallback(&[&simple, &low], &mut name(), &tree, &mut CancelAll);
    assert_eq!(dispatch.installer.as_deref(), Some("Simple Installer"));
    assert!(matches!(dispatch.outcome, InstallOutcome::Cancelled));
    assert!(!low.ran.get());
}

#[test]
fn test_equal_priorities_keep_given_order() {
    let first = Recording::new("First", 50);
    let second = Recording::new("Second", 50);
    let mut skipped = Recording::new("Unsupported", 90);
    skipped.supports = false;
    let tree = from_listing(["x.esp"]).unwrap();

    let dispatch = install_with_fallback(
        &[&skipped, &first, &second],
        &mut name(),
        &tree,
        &mut AutoAccept,
    );
    assert_eq!(dispatch.installer.as_deref(), Some("First"));
    assert!(!second.ran.get());
}
