//! Application configuration

use std::env;
use std::time::Duration;

const DEFAULT_API_URL: &str = "https://api.github.com";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential for outbound GitHub calls. `None` sends unauthenticated requests.
    pub github_token: Option<String>,
    pub github_api_url: String,
    /// Upper bound on a single outbound GitHub call
    pub github_timeout: Duration,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            github_token: non_empty("GITHUB_ACCESS_TOKEN").or_else(|| non_empty("GITHUB_TOKEN")),
            github_api_url: non_empty("GITHUB_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            github_timeout: Duration::from_secs(
                non_empty("GITHUB_TIMEOUT_SECS")
                    .and_then(|s| s.parse::<u64>().ok())
                    .filter(|secs| *secs > 0)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            host: non_empty("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: non_empty("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }
}
