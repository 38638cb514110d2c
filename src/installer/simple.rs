//! Installer for simple archives
//!
//! Handles archives that are already laid out like the game's data directory,
//! possibly under wrapper folders, and archives holding a single data folder
//! next to `txt`/`pdf` documents.

use crate::checker::{CheckReturn, DataChecker};
use crate::error::InstallError;
use crate::game::GameProfile;
use crate::installer::locator::locate_archive_base;
use crate::installer::normalizer::{normalize, NormalizeOptions};
use crate::installer::prompt::{GuessQuality, GuessedName, InstallPrompt, PromptDecision};
use crate::installer::{InstallOutcome, Installer};
use crate::tree::FileTree;
use crate::types::EntryId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Settings of the simple installer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallerConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Installers with a higher priority are tried first
    #[serde(default = "default_priority")]
    pub priority: i32,

    /// Keep loose documents of data-text archives inside the data folder
    #[serde(default)]
    pub keep_documents: bool,
}

fn default_true() -> bool {
    true
}

fn default_priority() -> i32 {
    55
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            priority: default_priority(),
            keep_documents: false,
        }
    }
}

pub struct SimpleInstaller {
    game: Arc<GameProfile>,
    config: InstallerConfig,
}

impl SimpleInstaller {
    pub const NAME: &'static str = "Simple Installer";

    pub fn new(game: Arc<GameProfile>, config: InstallerConfig) -> Self {
        Self { game, config }
    }

    pub fn game(&self) -> &GameProfile {
        &self.game
    }

    pub fn config(&self) -> &InstallerConfig {
        &self.config
    }

    /// Locate the archive base inside `tree`
    pub fn archive_base(&self, tree: &FileTree) -> Option<EntryId> {
        locate_archive_base(
            tree,
            tree.root(),
            self.game.data_dir_name(),
            self.game.checker(),
        )
    }

    /// Rewrite `tree` so that its root is the install root
    fn finish(
        &self,
        mut tree: FileTree,
        base: EntryId,
        checker: &dyn DataChecker,
    ) -> Result<FileTree, InstallError> {
        let options = NormalizeOptions {
            keep_documents: self.config.keep_documents,
        };
        let new_root = normalize(&mut tree, base, self.game.data_dir_name(), options)?;
        tree.set_root(new_root)?;

        let root = tree.root();
        if checker.classify(&tree, root) == CheckReturn::Fixable {
            debug!("Installed tree is fixable, applying checker fix");
            let fixed = checker.fix(&mut tree, root)?;
            tree.set_root(fixed)?;
        }

        Ok(tree.compact())
    }
}

impl Installer for SimpleInstaller {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn priority(&self) -> i32 {
        self.config.priority
    }

    fn is_active(&self) -> bool {
        self.config.enabled
    }

    fn is_archive_supported(&self, tree: &FileTree) -> bool {
        self.archive_base(tree).is_some()
    }

    #[instrument(skip_all, fields(game = %self.game.name()))]
    fn install(
        &self,
        name: &mut GuessedName,
        tree: FileTree,
        prompt: &mut dyn InstallPrompt,
    ) -> InstallOutcome {
        let Some(checker) = self.game.checker() else {
            warn!("No data checker registered for this game");
            return InstallOutcome::NotSupported;
        };
        let Some(base) = self.archive_base(&tree) else {
            debug!("Archive has no installable base");
            return InstallOutcome::NotSupported;
        };

        match prompt.confirm(name) {
            PromptDecision::Accept(chosen) => {
                name.update(chosen, GuessQuality::User);
                match self.finish(tree, base, checker) {
                    Ok(installed) => {
                        info!(
                            name = %name,
                            files = installed.file_count(installed.root()),
                            "Archive normalized for installation"
                        );
                        InstallOutcome::Installed(installed)
                    }
                    Err(e) => {
                        warn!(name = %name, "Installation aborted: {}", e);
                        InstallOutcome::Failed(e)
                    }
                }
            }
            PromptDecision::Manual(chosen) => {
                name.update(chosen, GuessQuality::User);
                info!(name = %name, "Manual installation requested");
                InstallOutcome::ManualRequested
            }
            PromptDecision::Cancel => {
                info!(name = %name, "Installation cancelled");
                InstallOutcome::Cancelled
            }
        }
    }
}
