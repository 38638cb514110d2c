//! Modroot: archive root detection for mod installers
//!
//! Given the file tree of an extracted mod archive, find the directory whose
//! contents belong in the game's data directory and rewrite the tree so that
//! directory becomes the root. Game knowledge is injected through a
//! [`checker::DataChecker`].

pub mod checker;
pub mod cli;
pub mod config;
pub mod error;
pub mod game;
pub mod installer;
pub mod logging;
pub mod tree;
pub mod types;
