//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::checker::CheckReturn;
use crate::cli::command_name;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_check_report, format_config, format_plan_report, CheckReport, PlanReport, PlannedFile,
};
use crate::config::{ConfigLoader, ModrootConfig};
use crate::error::ApiError;
use crate::game::GameProfile;
use crate::installer::{
    install_with_fallback, locate, AutoAccept, GuessQuality, GuessedName, InstallOutcome,
    InstallerConfig, SimpleInstaller,
};
use crate::tree::builder::TreeBuilder;
use crate::tree::{hasher, path, FileTree};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Runtime context for CLI execution: workspace, loaded config and game profile.
pub struct RunContext {
    workspace_root: PathBuf,
    config: ModrootConfig,
    game: Arc<GameProfile>,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Self::from_config(workspace_root, config)
    }

    /// Create run context from an already loaded configuration
    pub fn from_config(workspace_root: PathBuf, config: ModrootConfig) -> Result<Self, ApiError> {
        config.ensure_valid()?;
        let game = Arc::new(GameProfile::from_config(&config.game));
        debug!(game = ?game, "Game profile ready");
        Ok(Self {
            workspace_root,
            config,
            game,
        })
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn config(&self) -> &ModrootConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        info!(command = command_name(command), "Executing command");
        match command {
            Commands::Check {
                dir,
                data_dir,
                format,
            } => self.handle_check(dir, data_dir.as_deref(), format),
            Commands::Plan {
                dir,
                name,
                keep_documents,
                format,
            } => self.handle_plan(dir, name.as_deref(), *keep_documents, format),
            Commands::Config { format } => format_config(&self.config, format),
        }
    }

    fn scan(&self, dir: &Path) -> Result<(PathBuf, FileTree), ApiError> {
        // Relative archive paths are taken from the workspace root.
        let dir = self.workspace_root().join(dir);
        let dir = dir.as_path();
        if !dir.is_dir() {
            return Err(ApiError::PathNotFound(dir.to_path_buf()));
        }
        let root = path::canonicalize_root(dir)?;
        let tree = TreeBuilder::new(root.clone())
            .with_walker_config(self.config.scan.walker_config())
            .with_content_hashing(self.config.scan.hash_contents)
            .build()?;
        Ok((root, tree))
    }

    fn handle_check(
        &self,
        dir: &Path,
        data_dir: Option<&str>,
        format: &str,
    ) -> Result<String, ApiError> {
        let game = match data_dir {
            Some(name) => {
                path::validate_name(name).map_err(|e| ApiError::ConfigError(e.to_string()))?;
                let mut game_config = self.config.game.clone();
                game_config.data_dir_name = Some(name.to_string());
                Arc::new(GameProfile::from_config(&game_config))
            }
            None => Arc::clone(&self.game),
        };

        let (root, tree) = self.scan(dir)?;
        let checker = game.checker();
        let root_check: Option<CheckReturn> =
            checker.map(|checker| checker.classify(&tree, tree.root()));
        let located = locate(&tree, tree.root(), game.data_dir_name(), checker);

        let report = CheckReport {
            path: root.display().to_string(),
            game: game.name().to_string(),
            data_dir_name: game.data_dir_name().to_string(),
            root_check,
            supported: located.is_some(),
            base: located.map(|l| display_relative(&tree.path_of(l.base))),
            acceptance: located.map(|l| l.acceptance),
            depth: located.map(|l| l.depth),
            files: tree.file_count(tree.root()),
            digest: hex::encode(hasher::digest(&tree, tree.root())),
        };
        format_check_report(&report, format)
    }

    fn handle_plan(
        &self,
        dir: &Path,
        name: Option<&str>,
        keep_documents: bool,
        format: &str,
    ) -> Result<String, ApiError> {
        let (root, tree) = self.scan(dir)?;

        let mut guessed = GuessedName::default();
        if let Some(dir_name) = root.file_name() {
            guessed.update(dir_name.to_string_lossy(), GuessQuality::Fallback);
        }
        if let Some(name) = name {
            guessed.update(name, GuessQuality::Preset);
        }

        let settings = InstallerConfig {
            keep_documents: keep_documents || self.config.installer.keep_documents,
            ..self.config.installer.clone()
        };
        let installer = SimpleInstaller::new(Arc::clone(&self.game), settings);
        let dispatch = install_with_fallback(&[&installer], &mut guessed, &tree, &mut AutoAccept);

        let error = match &dispatch.outcome {
            InstallOutcome::Failed(e) => Some(e.to_string()),
            _ => None,
        };
        let (files, digest) = match dispatch.outcome.tree() {
            Some(installed) => (
                planned_files(installed, &root),
                Some(hex::encode(hasher::digest(installed, installed.root()))),
            ),
            None => (Vec::new(), None),
        };

        let report = PlanReport {
            path: root.display().to_string(),
            name: guessed.to_string(),
            installer: dispatch.installer,
            outcome: dispatch.outcome.as_str().to_string(),
            error,
            files,
            digest,
        };
        format_plan_report(&report, format)
    }
}

fn display_relative(path: &str) -> String {
    if path.is_empty() {
        ".".to_string()
    } else {
        path.to_string()
    }
}

fn planned_files(tree: &FileTree, archive_root: &Path) -> Vec<PlannedFile> {
    tree.files(tree.root())
        .into_iter()
        .map(|(destination, meta)| PlannedFile {
            destination,
            source: meta.source.as_ref().map(|source| {
                source
                    .strip_prefix(archive_root)
                    .unwrap_or(source)
                    .to_string_lossy()
                    .replace('\\', "/")
            }),
            size: meta.size,
        })
        .collect()
}
