use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    // IO
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Parsing
    #[error("failed to parse TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("environment variable {name} has an invalid value '{value}'")]
    InvalidEnv { name: &'static str, value: String },

    // Validation
    #[error("api_url is not set (use the config file or AUTHDECK_API_URL)")]
    MissingApiUrl,

    #[error("api_url '{url}' is invalid: {reason}")]
    InvalidApiUrl { url: String, reason: String },

    #[error("{field} must be greater than zero")]
    ZeroInterval { field: &'static str },
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}
