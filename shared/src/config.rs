//! Configuration management for the organizer calendar Lambda.

use std::env;
use std::time::Duration;

use crate::{Error, Result};

/// Default origin for the Eventbrite website.
pub const DEFAULT_BASE_URL: &str = "https://www.eventbrite.com";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Eventbrite origin the `showmore` pages are fetched from
    pub base_url: String,
    /// Timeout applied to each outbound page request
    pub upstream_timeout: Duration,
    /// User agent sent to Eventbrite
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            upstream_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("EVENTBRITE_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let upstream_timeout = match lookup("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|e| {
                    Error::Config(format!("UPSTREAM_TIMEOUT_SECS is not a number: {}", e))
                })?;
                if secs == 0 {
                    return Err(Error::Config(
                        "UPSTREAM_TIMEOUT_SECS must be greater than zero".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let user_agent = lookup("UPSTREAM_USER_AGENT")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(default_user_agent);

        Ok(Self {
            base_url,
            upstream_timeout,
            user_agent,
        })
    }
}

fn default_user_agent() -> String {
    format!("eventbrite-ical/{}", env!("CARGO_PKG_VERSION"))
}
