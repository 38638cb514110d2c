//! Workspace config files: `config/config.toml`, then `config/{MODROOT_ENV}.toml`

use crate::tree::path;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_ENV: &str = "development";

/// Resolve the environment layer name. Unset or blank means [`DEFAULT_ENV`].
///
/// The name becomes a file stem under `config/`, so it may not contain path
/// separators or be `.`/`..`.
pub fn env_name(raw: Option<&str>) -> Result<String, ConfigError> {
    let name = match raw.map(str::trim) {
        Some(name) if !name.is_empty() => name,
        _ => return Ok(DEFAULT_ENV.to_string()),
    };
    path::validate_name(name)
        .map_err(|_| ConfigError::Message(format!("Invalid MODROOT_ENV value {:?}", name)))?;
    Ok(name.to_string())
}

/// Existing workspace config files in the order they are layered
pub fn config_files(workspace_root: &Path, env: &str) -> Vec<PathBuf> {
    let config_dir = workspace_root.join("config");
    [
        config_dir.join("config.toml"),
        config_dir.join(format!("{}.toml", env)),
    ]
    .into_iter()
    .filter(|candidate| candidate.is_file())
    .collect()
}

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let env = env_name(std::env::var("MODROOT_ENV").ok().as_deref())?;
    let files = config_files(workspace_root, &env);
    debug!(env = %env, files = files.len(), "Layering workspace config");
    Ok(files.into_iter().fold(builder, |builder, file| {
        builder.add_source(File::from(file).required(true))
    }))
}
