//! CLI parse: clap types for Modroot. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Modroot CLI - find the installable root of extracted mod archives
#[derive(Parser, Debug)]
#[command(name = "modroot")]
#[command(about = "Locate and normalize the data root of extracted mod archives")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (holds config/config.toml)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    pub verbose: bool,

    /// Disable logging
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report whether an extracted archive is supported and where its base is
    Check {
        /// Directory holding the extracted archive
        dir: PathBuf,
        /// Override the game's data directory name
        #[arg(long)]
        data_dir: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the tree that would be installed from an extracted archive
    Plan {
        /// Directory holding the extracted archive
        dir: PathBuf,
        /// Mod name (defaults to the directory name)
        #[arg(long)]
        name: Option<String>,
        /// Keep loose documents next to the data folder
        #[arg(long)]
        keep_documents: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the effective configuration
    Config {
        /// Output format (toml or json)
        #[arg(long, default_value = "toml")]
        format: String,
    },
}
