//! Configuration management for the checkup client.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Built-in defaults
//!
//! The backend origin is a single value. Every API module resolves its paths
//! against it, so pointing the client at another deployment never touches
//! module code.

use std::{env, path::PathBuf, time::Duration};

use crate::error::{Error, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_API_PREFIX: &str = "/api/v1";
pub const DEFAULT_WEB_URL: &str = "http://localhost:5173";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Name of the directory under the platform data dir that holds `.env` and
/// the persisted session.
pub const APP_DIR: &str = "checkupcli";

/// Loads environment variables from `<data_local_dir>/checkupcli/.env`.
///
/// The directory is created when missing. A missing `.env` file is not an
/// error since every setting has a default.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/checkupcli/.env`
/// - macOS: `~/Library/Application Support/checkupcli/.env`
/// - Windows: `%LOCALAPPDATA%/checkupcli/.env`
pub async fn load_env() -> Result<()> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| Error::Config(e.to_string()))?;
    }
    Ok(())
}

/// Platform local data directory for this application.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// Backend origin, e.g. `http://localhost:8000`.
///
/// Read from `CHECKUP_API_URL`.
pub fn api_url() -> String {
    env::var("CHECKUP_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Path prefix shared by the domain endpoints, e.g. `/api/v1`.
///
/// Read from `CHECKUP_API_PREFIX`.
pub fn api_prefix() -> String {
    env::var("CHECKUP_API_PREFIX").unwrap_or_else(|_| DEFAULT_API_PREFIX.to_string())
}

/// Origin of the web frontend that serves the routed views.
///
/// Read from `CHECKUP_WEB_URL`.
pub fn web_url() -> String {
    env::var("CHECKUP_WEB_URL").unwrap_or_else(|_| DEFAULT_WEB_URL.to_string())
}

/// Per-request timeout. Read from `CHECKUP_TIMEOUT_SECS`; unparsable values
/// fall back to the default.
pub fn request_timeout() -> Duration {
    let secs = env::var("CHECKUP_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

/// Location of the persisted session file. `CHECKUP_SESSION_FILE` overrides
/// the default under the data directory.
pub fn session_path() -> PathBuf {
    match env::var("CHECKUP_SESSION_FILE") {
        Ok(path) => PathBuf::from(path),
        Err(_) => data_dir().join("session.json"),
    }
}

/// Settings the HTTP client factory needs, collected once and injected.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub api_prefix: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn from_env() -> Self {
        Self {
            api_url: api_url(),
            api_prefix: api_prefix(),
            timeout: request_timeout(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
