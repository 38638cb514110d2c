//! Configuration System
//!
//! Layered configuration: built-in defaults, the global config file, the
//! workspace config files and finally `MODROOT__SECTION__KEY` environment
//! variables. Tests included.

use crate::error::ApiError;
use crate::game::GameConfig;
use crate::installer::InstallerConfig;
use crate::logging::LoggingConfig;
use crate::tree::walker::WalkerConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModrootConfig {
    /// Managed game
    #[serde(default)]
    pub game: GameConfig,

    /// Simple installer settings
    #[serde(default)]
    pub installer: InstallerConfig,

    /// Scanning of extracted archive directories
    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How extracted archive directories are read into a tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Hash file contents with BLAKE3 while scanning
    #[serde(default)]
    pub hash_contents: bool,

    #[serde(default)]
    pub follow_symlinks: bool,

    /// Entry names skipped while scanning
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,

    #[serde(default)]
    pub max_depth: Option<usize>,
}

fn default_ignore_patterns() -> Vec<String> {
    WalkerConfig::default().ignore_patterns
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            hash_contents: false,
            follow_symlinks: false,
            ignore_patterns: default_ignore_patterns(),
            max_depth: None,
        }
    }
}

impl ScanConfig {
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            follow_symlinks: self.follow_symlinks,
            ignore_patterns: self.ignore_patterns.clone(),
            max_depth: self.max_depth,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_depth == Some(0) {
            return Err("max_depth must be at least 1".to_string());
        }
        if self.ignore_patterns.iter().any(|p| p.trim().is_empty()) {
            return Err("Ignore patterns cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Game(String),
    Scan(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Game(msg) => write!(f, "Game: {}", msg),
            ValidationError::Scan(msg) => write!(f, "Scan: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

fn validate_logging(logging: &LoggingConfig) -> Result<(), String> {
    const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];
    if !LEVELS.contains(&logging.level.to_lowercase().as_str()) {
        return Err(format!("Unknown log level '{}'", logging.level));
    }
    if logging.format != "text" && logging.format != "json" {
        return Err(format!("Unknown log format '{}'", logging.format));
    }
    match logging.output.as_str() {
        "stdout" | "stderr" => Ok(()),
        "file" if logging.file.is_some() => Ok(()),
        "file" => Err("Log output 'file' requires logging.file".to_string()),
        other => Err(format!("Unknown log output '{}'", other)),
    }
}

impl ModrootConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.game.validate() {
            errors.push(ValidationError::Game(e));
        }
        if let Err(e) = self.scan.validate() {
            errors.push(ValidationError::Scan(e));
        }
        if let Err(e) = validate_logging(&self.logging) {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate, folding every problem into one error
    pub fn ensure_valid(&self) -> Result<(), ApiError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })
    }

    pub fn to_toml(&self) -> Result<String, ApiError> {
        toml::to_string_pretty(self).map_err(|e| ApiError::Serialization(e.to_string()))
    }
}
