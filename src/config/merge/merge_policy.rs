//! Merge rules: defaults, override order, conflict handling.
//!
//! Later sources replace scalar keys of earlier ones; tables merge key by key.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("game.name", "Generic Game")?
        .set_default("game.short_name", "GenericGame")?
        .set_default("game.checker", "layout")?
        .set_default("installer.enabled", true)?
        .set_default("installer.priority", 55)?
        .set_default("installer.keep_documents", false)
}
