//! Client configuration.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ApiError, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Directory holding the persisted session token.
    pub session_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_dir: default_session_dir(),
        }
    }
}

impl ClientConfig {
    /// Read `TACHE_API_URL`, `TACHE_TIMEOUT_SECS` and `TACHE_SESSION_DIR`,
    /// falling back to the defaults for unset variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(url) = lookup("TACHE_API_URL") {
            config.base_url = url;
        }
        if let Some(secs) = lookup("TACHE_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|_| ApiError::Invalid(format!("TACHE_TIMEOUT_SECS must be a number, got {secs:?}")))?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(dir) = lookup("TACHE_SESSION_DIR") {
            config.session_dir = PathBuf::from(dir);
        }
        Ok(config)
    }
}

fn default_session_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(env::temp_dir)
        .join("tache")
}
