//! CLI command-name contract for logging and routing.

use crate::cli::parse::Commands;

/// Command name string used in log records (e.g. "check", "plan").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Check { .. } => "check",
        Commands::Plan { .. } => "plan",
        Commands::Config { .. } => "config",
    }
}
