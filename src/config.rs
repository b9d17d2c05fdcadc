//! Service configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_FIXTURE_DELAY_MS: u64 = 1500;
pub const DEFAULT_CHAT_DELAY_MS: u64 = 500;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 1800;
pub const DEFAULT_SESSION_SWEEP_SECS: u64 = 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(String),
}

/// Where dashboard, model and forecast documents come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Bundled JSON documents served after an artificial delay.
    Fixture,
    /// HTTP GET against the analytics backend.
    Live,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl RequestTimeouts {
    #[must_use]
    pub fn request(self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    #[must_use]
    pub fn connect(self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

impl Default for RequestTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub source: SourceKind,
    /// Live backend base URL, trailing slash trimmed. Only required when a
    /// live fetch actually happens.
    pub api_base: Option<String>,
    pub fixture_delay: Duration,
    pub chat_delay: Duration,
    pub timeouts: RequestTimeouts,
    /// Table sessions unused for longer than this are evicted.
    pub session_idle: Duration,
    /// How often the eviction sweep runs.
    pub session_sweep: Duration,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `PARTSDASH_SOURCE`: `fixture` (default) or `live`
    /// - `PARTSDASH_API_BASE`: live backend base URL
    /// - `PARTSDASH_FIXTURE_DELAY_MS`: default 1500
    /// - `PARTSDASH_CHAT_DELAY_MS`: default 500
    /// - `PARTSDASH_REQUEST_TIMEOUT_SECS`: default 30
    /// - `PARTSDASH_CONNECT_TIMEOUT_SECS`: default 10
    /// - `PARTSDASH_SESSION_IDLE_SECS`: default 1800
    /// - `PARTSDASH_SESSION_SWEEP_SECS`: default 60, zero falls back to the default
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for an unknown source kind.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] over an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for an unknown source kind.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source = parse_source(lookup("PARTSDASH_SOURCE").as_deref())?;
        let api_base = lookup("PARTSDASH_API_BASE")
            .map(|raw| raw.trim().trim_end_matches('/').to_string())
            .filter(|base| !base.is_empty());

        Ok(Self {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT),
            source,
            api_base,
            fixture_delay: Duration::from_millis(parse_or(&lookup, "PARTSDASH_FIXTURE_DELAY_MS", DEFAULT_FIXTURE_DELAY_MS)),
            chat_delay: Duration::from_millis(parse_or(&lookup, "PARTSDASH_CHAT_DELAY_MS", DEFAULT_CHAT_DELAY_MS)),
            timeouts: RequestTimeouts {
                request_secs: parse_or(&lookup, "PARTSDASH_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
                connect_secs: parse_or(&lookup, "PARTSDASH_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
            },
            session_idle: Duration::from_secs(parse_or(&lookup, "PARTSDASH_SESSION_IDLE_SECS", DEFAULT_SESSION_IDLE_SECS)),
            session_sweep: Duration::from_secs(
                Some(parse_or(&lookup, "PARTSDASH_SESSION_SWEEP_SECS", DEFAULT_SESSION_SWEEP_SECS))
                    .filter(|secs| *secs > 0)
                    .unwrap_or(DEFAULT_SESSION_SWEEP_SECS),
            ),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn parse_source(raw: Option<&str>) -> Result<SourceKind, ConfigError> {
    match raw.map(str::trim).unwrap_or("fixture") {
        "" | "fixture" => Ok(SourceKind::Fixture),
        "live" => Ok(SourceKind::Live),
        other => Err(ConfigError::Parse(format!(
            "unknown PARTSDASH_SOURCE '{other}' (expected 'fixture' or 'live')"
        ))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
