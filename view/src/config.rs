//! Client configuration.

use std::time::Duration;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    /// Base URL of the todo server
    pub server_url: String,
    /// Per-request timeout; expiry counts as the backend being unavailable
    pub request_timeout: Duration,
}

impl ViewConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            server_url: lookup("TODO_SERVER_URL")
                .unwrap_or_else(|| "http://localhost:8080".to_string()),
            request_timeout: Duration::from_secs(
                lookup("TODO_REQUEST_TIMEOUT")
                    .and_then(|s| s.trim().parse().ok())
                    .unwrap_or(5),
            ),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewConfig::default();
        assert_eq!(config.server_url, "http://localhost:8080");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_overrides() {
        let config = ViewConfig::from_lookup(|key| match key {
            "TODO_SERVER_URL" => Some("http://todo.internal:9000".to_string()),
            "TODO_REQUEST_TIMEOUT" => Some("12".to_string()),
            _ => None,
        });
        assert_eq!(config.server_url, "http://todo.internal:9000");
        assert_eq!(config.request_timeout, Duration::from_secs(12));
    }
}
