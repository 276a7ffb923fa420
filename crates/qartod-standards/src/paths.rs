//! Configuration path resolution.

use std::path::{Path, PathBuf};

/// Environment variable pointing at a configuration file.
pub const CONFIG_ENV_VAR: &str = "QARTOD_CONFIG";

/// Name of the configuration file looked up in the tree root.
pub const CONFIG_FILE_NAME: &str = "qartod.toml";

/// Resolve the configuration file to use.
///
/// Resolution order:
/// 1. an explicit path (from the command line)
/// 2. `QARTOD_CONFIG` environment variable
/// 3. `qartod.toml` in the tree root, if it exists
pub fn resolve_config_path(explicit: Option<&Path>, root: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }
    root.map(|root| root.join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
}
