use super::error::{Error, Result};
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;

/// Backend used when neither the flag nor the environment names one
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Environment variable overriding the backend base URL
pub const API_URL_ENV: &str = "VIBENAV_API_URL";

/// Environment variable setting a request timeout in seconds
pub const TIMEOUT_ENV: &str = "VIBENAV_TIMEOUT_SECS";

/// Configuration for vibenav
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the vibe backend
    pub api_url: Url,
    /// Base directory for vibenav data
    pub base_dir: PathBuf,
    /// Log file used while the terminal UI owns the screen
    pub log_path: PathBuf,
    /// Per-request timeout. `None` leaves it to the platform.
    pub timeout: Option<Duration>,
}

impl Config {
    /// Get the default configuration directory
    pub fn default_base_dir() -> Result<PathBuf> {
        dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))
            .map(|home| home.join(".vibenav"))
    }

    /// Create a configuration from command-line values, falling back to the environment
    pub fn new(
        api_url: Option<String>,
        base_dir: Option<PathBuf>,
        timeout_secs: Option<u64>,
    ) -> Result<Self> {
        let env_url = std::env::var(API_URL_ENV).ok();
        let env_timeout = std::env::var(TIMEOUT_ENV).ok();
        Self::from_sources(api_url, env_url, base_dir, timeout_secs, env_timeout)
    }

    /// Resolve each setting as flag, then environment, then default
    pub fn from_sources(
        flag_url: Option<String>,
        env_url: Option<String>,
        base_dir: Option<PathBuf>,
        flag_timeout: Option<u64>,
        env_timeout: Option<String>,
    ) -> Result<Self> {
        let raw_url = flag_url
            .or(env_url)
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = parse_api_url(&raw_url)?;

        let timeout_secs = match flag_timeout {
            Some(secs) => Some(secs),
            None => match env_timeout {
                Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                    Error::Config(format!("{} must be a whole number of seconds, got {:?}", TIMEOUT_ENV, raw))
                })?),
                None => None,
            },
        };

        let base_dir = base_dir.unwrap_or_else(|| {
            Self::default_base_dir().unwrap_or_else(|_| PathBuf::from(".vibenav"))
        });

        Ok(Self {
            api_url,
            log_path: base_dir.join("vibenav.log"),
            base_dir,
            timeout: timeout_secs.filter(|s| *s > 0).map(Duration::from_secs),
        })
    }

    /// Create the data directory
    pub fn init(&self) -> Result<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        Ok(())
    }

    /// Check if the data directory exists
    pub fn is_initialized(&self) -> bool {
        self.base_dir.exists()
    }
}

fn parse_api_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed)
        .map_err(|e| Error::Config(format!("Invalid API URL {:?}: {}", raw, e)))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "API URL must be an http(s) URL, got {:?}",
            raw
        )));
    }
    Ok(url)
}
