use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed numeric values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub github_api_url: String,
    pub github_user_agent: String,
    pub http_timeout: Duration,
    pub extract_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            github_api_url: std::env::var("GITHUB_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_GITHUB_API_URL.to_string()),
            github_user_agent: std::env::var("GITHUB_USER_AGENT")
                .unwrap_or_else(|_| default_user_agent()),
            http_timeout: Duration::from_secs(parse_env("HTTP_TIMEOUT_SECS", 15)?),
            extract_timeout: Duration::from_secs(parse_env("EXTRACT_TIMEOUT_SECS", 30)?),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            github_user_agent: default_user_agent(),
            http_timeout: Duration::from_secs(15),
            extract_timeout: Duration::from_secs(30),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
