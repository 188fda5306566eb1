//! Build-time configuration.
//!
//! Values come from environment variables at compile time (the bundle has no
//! runtime environment) and fall back to the production defaults.

use std::time::Duration;

const DEFAULT_API_URL: &str = "https://backend-kejaksaan-production.up.railway.app";
const DEFAULT_NOTIFICATION_URL: &str = "ws://localhost:5000";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Path prefix the backend already mounts at its base address.
pub const API_PREFIX: &str = "/api";

pub const SCHEDULE_REFRESH: Duration = Duration::from_millis(300_000);
pub const CLOCK_TICK: Duration = Duration::from_millis(1_000);
pub const NOTIFICATION_POLL: Duration = Duration::from_millis(60_000);
pub const TOAST_TIMEOUT: Duration = Duration::from_millis(3_000);
/// Pause before leaving a deleted case so the toast is seen.
pub const AFTER_DELETE_DELAY: Duration = Duration::from_millis(1_000);

pub const OFFICE_NAME: &str = "Kejaksaan Negeri";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend origin, without trailing slash.
    pub api_url: String,
    pub notification_url: String,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None, None)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("KEJAKSAAN_API_URL"),
            option_env!("KEJAKSAAN_NOTIFICATION_URL"),
            option_env!("KEJAKSAAN_REQUEST_TIMEOUT_MS"),
        )
    }

    fn from_values(
        api_url: Option<&str>,
        notification_url: Option<&str>,
        timeout_ms: Option<&str>,
    ) -> Self {
        Self {
            api_url: non_empty(api_url)
                .unwrap_or(DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            notification_url: non_empty(notification_url)
                .unwrap_or(DEFAULT_NOTIFICATION_URL)
                .trim_end_matches('/')
                .to_string(),
            request_timeout: non_empty(timeout_ms)
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT),
        }
    }

    /// Realtime channel URL; the token travels as a query parameter.
    pub fn notification_socket_url(&self, token: &str) -> String {
        format!(
            "{}/?token={}",
            self.notification_url,
            urlencoding::encode(token)
        )
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_or_blank_values() {
        let config = AppConfig::from_values(None, Some("  "), Some("soon"));
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.notification_url, DEFAULT_NOTIFICATION_URL);
        assert_eq!(config.request_timeout, Duration::from_millis(5_000));
    }

    #[test]
    fn overrides_are_normalised() {
        let config = AppConfig::from_values(
            Some("http://localhost:3000/"),
            Some("wss://rt.example.com"),
            Some("8000"),
        );
        assert_eq!(config.api_url, "http://localhost:3000");
        assert_eq!(config.request_timeout, Duration::from_secs(8));
        assert_eq!(
            config.notification_socket_url("a b"),
            "wss://rt.example.com/?token=a%20b"
        );
    }
}
