//! Game profiles
//!
//! A profile carries what the installer needs to know about the managed game:
//! the name of its data directory and the checker for its mod layout.

use crate::checker::{DataChecker, LayoutChecker, LayoutRules, NonEmptyChecker};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

const DEFAULT_DATA_DIR_NAME: &str = "Data";

/// Which built-in checker a game uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CheckerKind {
    /// No checker registered; every archive is unsupported
    None,
    NonEmpty,
    #[default]
    Layout,
}

/// Game section of the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_game_name")]
    pub name: String,

    #[serde(default = "default_short_name")]
    pub short_name: String,

    /// Explicit data directory name. Takes precedence over `data_path`.
    #[serde(default)]
    pub data_dir_name: Option<String>,

    /// Path of the game's data directory; its last component names the data folder
    #[serde(default)]
    pub data_path: Option<PathBuf>,

    #[serde(default)]
    pub checker: CheckerKind,

    #[serde(default)]
    pub layout: LayoutRules,
}

fn default_game_name() -> String {
    "Generic Game".to_string()
}

fn default_short_name() -> String {
    "GenericGame".to_string()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            name: default_game_name(),
            short_name: default_short_name(),
            data_dir_name: None,
            data_path: None,
            checker: CheckerKind::default(),
            layout: LayoutRules::default(),
        }
    }
}

impl GameConfig {
    /// Name of the data folder as the installer should look for it
    pub fn resolved_data_dir_name(&self) -> String {
        if let Some(name) = &self.data_dir_name {
            return name.clone();
        }
        self.data_path
            .as_ref()
            .and_then(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_DATA_DIR_NAME.to_string())
    }

    pub fn validate(&self) -> Result<(), String> {
        let data_dir_name = self.resolved_data_dir_name();
        if crate::tree::path::validate_name(&data_dir_name).is_err() {
            return Err(format!("Invalid data directory name: {:?}", data_dir_name));
        }
        if self.checker == CheckerKind::Layout
            && self.layout.folders.is_empty()
            && self.layout.extensions.is_empty()
        {
            return Err("Layout checker needs at least one folder or extension".to_string());
        }
        Ok(())
    }
}

/// Managed game as seen by installers
pub struct GameProfile {
    name: String,
    short_name: String,
    data_dir_name: String,
    checker: Option<Box<dyn DataChecker>>,
}

impl GameProfile {
    pub fn new(name: impl Into<String>, data_dir_name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            short_name: name.replace(' ', ""),
            name,
            data_dir_name: data_dir_name.into(),
            checker: None,
        }
    }

    pub fn with_checker(mut self, checker: Box<dyn DataChecker>) -> Self {
        self.checker = Some(checker);
        self
    }

    pub fn from_config(config: &GameConfig) -> Self {
        let checker: Option<Box<dyn DataChecker>> = match config.checker {
            CheckerKind::None => None,
            CheckerKind::NonEmpty => Some(Box::new(NonEmptyChecker)),
            CheckerKind::Layout => Some(Box::new(LayoutChecker::new(config.layout.clone()))),
        };
        Self {
            name: config.name.clone(),
            short_name: config.short_name.clone(),
            data_dir_name: config.resolved_data_dir_name(),
            checker,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn data_dir_name(&self) -> &str {
        &self.data_dir_name
    }

    /// The game's checker, if one is registered
    pub fn checker(&self) -> Option<&dyn DataChecker> {
        self.checker.as_deref()
    }
}

impl fmt::Debug for GameProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameProfile")
            .field("name", &self.name)
            .field("short_name", &self.short_name)
            .field("data_dir_name", &self.data_dir_name)
            .field("has_checker", &self.checker.is_some())
            .finish()
    }
}
