mod error;
mod loader;


pub use error::ConfigError;
pub use loader::{ENV_API_URL, ENV_REFRESH_SECS, ENV_TIMEOUT_SECS, load_config, load_config_with};

use crate::logs::AggregationOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// What the dashboard shows after a failed or empty fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchPolicy {
    /// Keep the previously displayed tables.
    #[default]
    Retain,
    /// Drop back to an empty dashboard.
    Clear,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub api_url: Option<String>,
    pub timeout_secs: u64,
    pub refresh_interval_secs: u64,
    pub fetch_policy: FetchPolicy,
    pub known_methods: Option<Vec<String>>,
    pub otp_issuer: String,
    pub otp_label: String,
    pub min_password_length: usize,
    pub min_register_password_length: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            timeout_secs: 10,
            refresh_interval_secs: 30,
            fetch_policy: FetchPolicy::default(),
            known_methods: None,
            otp_issuer: "MyApp".to_string(),
            otp_label: "MyApp".to_string(),
            min_password_length: 8,
            min_register_password_length: 6,
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.base_url()?;

        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroInterval {
                field: "timeout_secs",
            });
        }
        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::ZeroInterval {
                field: "refresh_interval_secs",
            });
        }
        Ok(())
    }

    /// Parsed API base URL; always absolute http(s).
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let raw = self
            .api_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingApiUrl)?;

        let url = Url::parse(raw).map_err(|e| ConfigError::InvalidApiUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::InvalidApiUrl {
                url: raw.to_string(),
                reason: format!("unsupported scheme '{other}'"),
            }),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn aggregation_options(&self) -> AggregationOptions {
        AggregationOptions {
            known_methods: self.known_methods.clone(),
        }
    }
}
