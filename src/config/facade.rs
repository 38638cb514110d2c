//! Entry point for loading configuration

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::ModrootConfig;
use config::{ConfigError, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration loader
#[derive(Debug, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global config file,
    /// `config/config.toml`, `config/{MODROOT_ENV}.toml`, environment.
    pub fn load(workspace_root: &Path) -> Result<ModrootConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);

        let config: ModrootConfig = builder.build()?.try_deserialize()?;
        debug!(
            workspace = %workspace_root.display(),
            game = %config.game.name,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Load configuration from a single file on top of the defaults
    pub fn load_from_file(path: &Path) -> Result<ModrootConfig, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .build()?
            .try_deserialize()
    }

    /// Path of the user-level config file
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
