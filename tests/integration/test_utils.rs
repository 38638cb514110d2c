//! Shared test utilities for integration tests
//!
//! Centralizes fixture creation and serialized access to XDG environment
//! variables so config tests stay isolated when run in parallel.

use modroot::checker::{DataChecker, LayoutChecker, NonEmptyChecker};
use modroot::game::GameProfile;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Environment variable state to restore after test
struct EnvState {
    vars: Vec<(&'static str, Option<String>)>,
}

const TRACKED_VARS: [&str; 3] = ["HOME", "XDG_CONFIG_HOME", "MODROOT_ENV"];

impl EnvState {
    fn capture() -> Self {
        Self {
            vars: TRACKED_VARS
                .iter()
                .map(|key| (*key, std::env::var(key).ok()))
                .collect(),
        }
    }

    fn restore(self) {
        for (key, value) in self.vars {
            match value {
                Some(orig) => std::env::set_var(key, orig),
                None => std::env::remove_var(key),
            }
        }
    }
}

/// Run `f` with HOME and XDG_CONFIG_HOME pointing into `test_dir`.
///
/// The global config file lives at `<test_dir>/modroot/config.toml`.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_home = test_dir.path().join("home");
    std::fs::create_dir_all(&test_home).unwrap();

    std::env::set_var("HOME", &test_home);
    std::env::set_var("XDG_CONFIG_HOME", test_dir.path());
    std::env::remove_var("MODROOT_ENV");

    let result = f();

    env_state.restore();
    result
}

/// Create a file (and its parent directories) with the given content
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

/// Materialize an archive listing on disk
pub fn extract_listing(root: &Path, listing: &[&str]) {
    for item in listing {
        if item.ends_with('/') {
            std::fs::create_dir_all(root.join(item)).unwrap();
        } else {
            write_file(root, item, item);
        }
    }
}

pub fn layout_game() -> Arc<GameProfile> {
    game_with(Box::new(LayoutChecker::default()))
}

pub fn permissive_game() -> Arc<GameProfile> {
    game_with(Box::new(NonEmptyChecker))
}

pub fn game_with(checker: Box<dyn DataChecker>) -> Arc<GameProfile> {
    Arc::new(GameProfile::new("Test Game", "Data").with_checker(checker))
}
