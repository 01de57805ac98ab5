use std::env;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Runtime settings for the tracker client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the game service, without trailing slash
    pub service_url: String,
    /// Player id or name re-selected after every reset
    pub default_player: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Attach a client-side `game_date` to submissions
    pub stamp_submissions: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            default_player: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            stamp_submissions: false,
        }
    }
}

impl ClientConfig {
    /// Reads `TRACKER_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let mut config = Self::default();
        if let Some(url) = opt_var("TRACKER_SERVICE_URL") {
            config = config.with_service_url(url)?;
        }
        config.default_player = opt_var("TRACKER_DEFAULT_PLAYER");
        if let Some(raw) = opt_var("TRACKER_HTTP_TIMEOUT_SECS") {
            config.timeout = parse_timeout(&raw)?;
        }
        if let Some(raw) = opt_var("TRACKER_STAMP_SUBMISSIONS") {
            config.stamp_submissions = parse_bool("TRACKER_STAMP_SUBMISSIONS", &raw)?;
        }
        Ok(config)
    }

    pub fn with_service_url(mut self, url: impl Into<String>) -> Result<Self, AppError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(AppError::config(format!(
                "service url must start with http:// or https://, got '{url}'"
            )));
        }
        self.service_url = trimmed.to_string();
        Ok(self)
    }

    pub fn with_default_player(mut self, player: impl Into<String>) -> Self {
        self.default_player = Some(player.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, AppError> {
        if timeout.is_zero() {
            return Err(AppError::config("timeout must be greater than zero"));
        }
        self.timeout = timeout;
        Ok(self)
    }

    pub fn with_stamp_submissions(mut self, stamp: bool) -> Self {
        self.stamp_submissions = stamp;
        self
    }
}

/// Unset and blank variables are both treated as absent.
fn opt_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_timeout(raw: &str) -> Result<Duration, AppError> {
    let secs = raw.parse::<u64>().map_err(|_| {
        AppError::config(format!(
            "TRACKER_HTTP_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'"
        ))
    })?;
    if secs == 0 {
        return Err(AppError::config("TRACKER_HTTP_TIMEOUT_SECS must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, AppError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::config(format!(
            "{name} must be true or false, got '{raw}'"
        ))),
    }
}
