use std::time::Duration;

use url::Url;

use crate::duration::parse_duration;
use crate::error::ConfigError;

pub const SOURCE_URL_KEY: &str = "SOURCE_URL";
pub const WEBHOOK_URL_KEY: &str = "WEBHOOK_URL";
pub const POLL_INTERVAL_KEY: &str = "POLL_INTERVAL";
pub const REQUEST_TIMEOUT_KEY: &str = "REQUEST_TIMEOUT";

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Unvalidated settings as handed over by the process (CLI args / env).
#[derive(Debug, Clone, Default)]
pub struct RawConfig {
    pub source_url: Option<String>,
    pub webhook_url: Option<String>,
    pub poll_interval: Option<String>,
    pub request_timeout: Option<String>,
    pub message_template: Option<String>,
}

/// Validated, immutable trigger configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub source_url: Url,
    pub webhook_url: Url,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    /// Custom notification template; `None` uses the built-in message.
    pub message_template: Option<String>,
}

impl Config {
    /// Validate raw settings. Empty strings count as absent.
    pub fn resolve(raw: RawConfig) -> Result<Self, ConfigError> {
        let source_url = required_url(SOURCE_URL_KEY, raw.source_url)?;
        let webhook_url = required_url(WEBHOOK_URL_KEY, raw.webhook_url)?;

        let poll_interval = match optional_duration(POLL_INTERVAL_KEY, raw.poll_interval)? {
            Some(d) if !d.is_zero() => d,
            _ => {
                tracing::warn!(
                    interval = ?DEFAULT_POLL_INTERVAL,
                    "falling back to default poll interval"
                );
                DEFAULT_POLL_INTERVAL
            }
        };

        let request_timeout = optional_duration(REQUEST_TIMEOUT_KEY, raw.request_timeout)?
            .filter(|d| !d.is_zero())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        Ok(Self {
            source_url,
            webhook_url,
            poll_interval,
            request_timeout,
            message_template: non_empty(raw.message_template),
        })
    }

    /// Print a redacted summary for startup logs.
    ///
    /// Webhook URLs usually embed a secret token in the path, so only the
    /// host is logged.
    pub fn log_summary(&self) {
        tracing::info!(
            source_url = %self.source_url,
            webhook_host = self.webhook_url.host_str().unwrap_or("(none)"),
            interval = ?self.poll_interval,
            request_timeout = ?self.request_timeout,
            custom_template = self.message_template.is_some(),
            "config loaded"
        );
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn required_url(key: &'static str, value: Option<String>) -> Result<Url, ConfigError> {
    let value = non_empty(value).ok_or(ConfigError::Missing { key })?;
    let value = value.trim();

    let url = Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidUrl {
            key,
            value: value.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

fn optional_duration(
    key: &'static str,
    value: Option<String>,
) -> Result<Option<Duration>, ConfigError> {
    match non_empty(value) {
        None => Ok(None),
        Some(v) => parse_duration(&v)
            .map(Some)
            .ok_or(ConfigError::InvalidDuration { key, value: v }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawConfig {
        RawConfig {
            source_url: Some("http://localhost:8080/api/track".into()),
            webhook_url: Some("https://hooks.example.com/services/T0/B0/secret".into()),
            ..RawConfig::default()
        }
    }

    #[test]
    fn resolve_minimal_uses_defaults() {
        let cfg = Config::resolve(raw()).unwrap();
        assert_eq!(cfg.source_url.as_str(), "http://localhost:8080/api/track");
        assert_eq!(cfg.poll_interval, DEFAULT_POLL_INTERVAL);
        assert_eq!(cfg.request_timeout, DEFAULT_REQUEST_TIMEOUT);
        assert!(cfg.message_template.is_none());
    }

    #[test]
    fn resolve_missing_source_url() {
        let err = Config::resolve(RawConfig {
            source_url: None,
            ..raw()
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing { key: SOURCE_URL_KEY });
    }

    #[test]
    fn resolve_empty_webhook_url_counts_as_missing() {
        let err = Config::resolve(RawConfig {
            webhook_url: Some("   ".into()),
            ..raw()
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing { key: WEBHOOK_URL_KEY });
    }

    #[test]
    fn resolve_rejects_relative_url() {
        let err = Config::resolve(RawConfig {
            source_url: Some("/api/track".into()),
            ..raw()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { key: SOURCE_URL_KEY, .. }));
    }

    #[test]
    fn resolve_rejects_non_http_scheme() {
        let err = Config::resolve(RawConfig {
            webhook_url: Some("ftp://example.com/hook".into()),
            ..raw()
        })
        .unwrap_err();
        match err {
            ConfigError::InvalidUrl { reason, .. } => assert!(reason.contains("ftp")),
            other => panic!("expected InvalidUrl, got: {other:?}"),
        }
    }

    #[test]
    fn resolve_custom_interval() {
        let cfg = Config::resolve(RawConfig {
            poll_interval: Some("1m30s".into()),
            ..raw()
        })
        .unwrap();
        assert_eq!(cfg.poll_interval, Duration::from_secs(90));
    }

    #[test]
    fn resolve_zero_interval_falls_back_to_default() {
        let cfg = Config::resolve(RawConfig {
            poll_interval: Some("0s".into()),
            ..raw()
        })
        .unwrap();
        assert_eq!(cfg.poll_interval, DEFAULT_POLL_INTERVAL);
    }

    #[test]
    fn resolve_malformed_interval_is_fatal() {
        let err = Config::resolve(RawConfig {
            poll_interval: Some("every minute".into()),
            ..raw()
        })
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidDuration {
                key: POLL_INTERVAL_KEY,
                value: "every minute".into(),
            }
        );
    }

    #[test]
    fn resolve_malformed_timeout_is_fatal() {
        let err = Config::resolve(RawConfig {
            request_timeout: Some("5 seconds".into()),
            ..raw()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidDuration { key: REQUEST_TIMEOUT_KEY, .. }
        ));
    }

    #[test]
    fn resolve_fractional_interval() {
        let cfg = Config::resolve(RawConfig {
            poll_interval: Some("1.5s".into()),
            ..raw()
        })
        .unwrap();
        assert_eq!(cfg.poll_interval, Duration::from_millis(1_500));
    }

    #[test]
    fn resolve_keeps_custom_template() {
        let cfg = Config::resolve(RawConfig {
            message_template: Some("{{ count }} new".into()),
            ..raw()
        })
        .unwrap();
        assert_eq!(cfg.message_template.as_deref(), Some("{{ count }} new"));
    }

    #[test]
    fn error_messages_name_the_key() {
        let err = ConfigError::Missing { key: WEBHOOK_URL_KEY };
        assert!(err.to_string().contains("WEBHOOK_URL"));
    }
}
