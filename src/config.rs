//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Default settle delay before a route-triggered hint is surfaced.
pub const DEFAULT_HINT_SETTLE_DELAY: Duration = Duration::from_millis(800);

/// Guidance engine configuration.
#[derive(Debug, Clone)]
pub struct GuidanceConfig {
    /// Profile the persisted guidance state belongs to.
    pub profile_id: String,
    /// Path of the libSQL database file.
    pub db_path: PathBuf,
    /// Port for the HTTP surface.
    pub http_port: u16,
    /// How long a route must stay current before its hint is shown.
    pub hint_settle_delay: Duration,
    /// Optional JSON catalog replacing the built-in one.
    pub catalog_path: Option<PathBuf>,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            profile_id: "default".to_string(),
            db_path: PathBuf::from("./data/guidance.db"),
            http_port: 8080,
            hint_settle_delay: DEFAULT_HINT_SETTLE_DELAY,
            catalog_path: None,
        }
    }
}

impl GuidanceConfig {
    /// Build a config from `GUIDANCE_*` environment variables, falling back
    /// to defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(profile) = lookup("GUIDANCE_PROFILE_ID") {
            let profile = profile.trim();
            if profile.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "GUIDANCE_PROFILE_ID".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
            config.profile_id = profile.to_string();
        }

        if let Some(path) = lookup("GUIDANCE_DB_PATH") {
            config.db_path = PathBuf::from(path);
        }

        if let Some(port) = lookup("GUIDANCE_HTTP_PORT") {
            config.http_port = port.parse().map_err(|e| ConfigError::InvalidValue {
                key: "GUIDANCE_HTTP_PORT".to_string(),
                message: format!("{e}"),
            })?;
        }

        if let Some(ms) = lookup("GUIDANCE_HINT_DELAY_MS") {
            let ms: u64 = ms.parse().map_err(|e| ConfigError::InvalidValue {
                key: "GUIDANCE_HINT_DELAY_MS".to_string(),
                message: format!("{e}"),
            })?;
            config.hint_settle_delay = Duration::from_millis(ms);
        }

        if let Some(path) = lookup("GUIDANCE_CATALOG_PATH") {
            config.catalog_path = Some(PathBuf::from(path));
        }

        Ok(config)
    }
}
