use crate::config::{ClientConfig, ConfigError};
use std::fs;
use std::path::Path;

pub const ENV_API_URL: &str = "AUTHDECK_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "AUTHDECK_TIMEOUT_SECS";
pub const ENV_REFRESH_SECS: &str = "AUTHDECK_REFRESH_SECS";

/// Load the client config from `path` (if any) and the process environment.
pub fn load_config(path: Option<&Path>) -> Result<ClientConfig, ConfigError> {
    load_config_with(path, |name| std::env::var(name).ok())
}

/// Same as [`load_config`] with an injectable environment lookup.
pub fn load_config_with<F>(path: Option<&Path>, env: F) -> Result<ClientConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    //--------------------------------------------------------------------------
    // Hard fail: IO and parsing
    //--------------------------------------------------------------------------
    let mut cfg = match path {
        Some(path) => {
            let raw = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
            toml::from_str::<ClientConfig>(&raw).map_err(|e| ConfigError::parse(path, e))?
        }
        None => ClientConfig::default(),
    };

    //--------------------------------------------------------------------------
    // Environment overrides
    //--------------------------------------------------------------------------
    if let Some(url) = env(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
        cfg.api_url = Some(url);
    }
    if let Some(secs) = env(ENV_TIMEOUT_SECS) {
        cfg.timeout_secs = parse_secs(ENV_TIMEOUT_SECS, secs)?;
    }
    if let Some(secs) = env(ENV_REFRESH_SECS) {
        cfg.refresh_interval_secs = parse_secs(ENV_REFRESH_SECS, secs)?;
    }

    cfg.validate()?;

    tracing::debug!(
        api_url = cfg.api_url.as_deref().unwrap_or_default(),
        timeout_secs = cfg.timeout_secs,
        refresh_interval_secs = cfg.refresh_interval_secs,
        "client config loaded"
    );

    Ok(cfg)
}

fn parse_secs(name: &'static str, value: String) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { name, value })
}
