//! Command implementations behind the `authdeck` binary.

pub mod auth;
pub mod config;
pub mod logs;
pub mod prompt;


use std::path::{Path, PathBuf};

/// Picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "authdeck.toml";

/// `explicit`, or [`DEFAULT_CONFIG_FILE`] if it exists.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        let default = Path::new(DEFAULT_CONFIG_FILE);
        default.is_file().then(|| default.to_path_buf())
    })
}
