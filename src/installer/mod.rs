//! Installers
//!
//! An installer takes the tree of an extracted archive and either hands back
//! the tree to install or reports why it did not. Installers are tried by
//! priority; one that does not support an archive lets the next one try.

pub mod heuristic;
pub mod locator;
pub mod normalizer;
pub mod prompt;
pub mod simple;

pub use locator::{locate, locate_archive_base, Acceptance, Located};
pub use normalizer::{normalize, NormalizeOptions};
pub use prompt::{AutoAccept, GuessQuality, GuessedName, InstallPrompt, PromptDecision};
pub use simple::{InstallerConfig, SimpleInstaller};

use crate::error::InstallError;
use crate::tree::FileTree;
use tracing::{debug, info};

/// Outcome of an installation attempt
#[derive(Debug)]
pub enum InstallOutcome {
    /// Tree to install, rooted at the game's data layout
    Installed(FileTree),
    /// This installer cannot handle the archive; another one may
    NotSupported,
    /// Installation of this archive must be aborted
    Failed(InstallError),
    Cancelled,
    ManualRequested,
}

impl InstallOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallOutcome::Installed(_) => "installed",
            InstallOutcome::NotSupported => "not_supported",
            InstallOutcome::Failed(_) => "failed",
            InstallOutcome::Cancelled => "cancelled",
            InstallOutcome::ManualRequested => "manual_requested",
        }
    }

    pub fn tree(&self) -> Option<&FileTree> {
        match self {
            InstallOutcome::Installed(tree) => Some(tree),
            _ => None,
        }
    }

    pub fn into_tree(self) -> Option<FileTree> {
        match self {
            InstallOutcome::Installed(tree) => Some(tree),
            _ => None,
        }
    }
}

/// Installer working directly on archive trees
pub trait Installer {
    fn name(&self) -> &str;

    /// Higher priority installers are tried first
    fn priority(&self) -> i32;

    fn is_manual_installer(&self) -> bool {
        false
    }

    fn is_active(&self) -> bool;

    fn is_archive_supported(&self, tree: &FileTree) -> bool;

    fn install(
        &self,
        name: &mut GuessedName,
        tree: FileTree,
        prompt: &mut dyn InstallPrompt,
    ) -> InstallOutcome;
}

/// Result of [`install_with_fallback`]
#[derive(Debug)]
pub struct Dispatch {
    /// Name of the installer that produced the outcome
    pub installer: Option<String>,
    pub outcome: InstallOutcome,
}

/// Run the highest-priority active installer that supports the archive.
///
/// `NotSupported` falls through to the next candidate; every other outcome is
/// final. Manual installers are skipped. Ties keep the given order.
pub fn install_with_fallback(
    installers: &[&dyn Installer],
    name: &mut GuessedName,
    tree: &FileTree,
    prompt: &mut dyn InstallPrompt,
) -> Dispatch {
    let mut candidates: Vec<&dyn Installer> = installers
        .iter()
        .copied()
        .filter(|installer| installer.is_active() && !installer.is_manual_installer())
        .collect();
    candidates.sort_by_key(|installer| std::cmp::Reverse(installer.priority()));

    for installer in candidates {
        if !installer.is_archive_supported(tree) {
            debug!(installer = installer.name(), "Archive not supported");
            continue;
        }
        let outcome = installer.install(name, tree.clone(), prompt);
        if matches!(outcome, InstallOutcome::NotSupported) {
            debug!(installer = installer.name(), "Installer declined archive");
            continue;
        }
        info!(
            installer = installer.name(),
            outcome = outcome.as_str(),
            "Installation attempt finished"
        );
        return Dispatch {
            installer: Some(installer.name().to_string()),
            outcome,
        };
    }

    info!("No installer supports this archive");
    Dispatch {
        installer: None,
        outcome: InstallOutcome::NotSupported,
    }
}
