//! Client configuration.
//!
//! Everything the client needs is passed in through `ClientConfig`; there is
//! no process-wide state. `from_env` layers the `AUTH_SERVER_*` variables on
//! top of the defaults.

use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://localhost:8080/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

pub const ENV_BASE_URL: &str = "AUTH_SERVER_URL";
pub const ENV_VERIFY_TLS: &str = "AUTH_SERVER_VERIFY_TLS";
pub const ENV_TIMEOUT_SECS: &str = "AUTH_SERVER_TIMEOUT_SECS";
pub const ENV_ABSENT_USER: &str = "AUTH_SERVER_ABSENT_USER";

/// How `get` reports a user the server answers 404 for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AbsentUser {
    /// Fail with `ApiError::NotFound`, leaving the local user untouched.
    #[default]
    Error,
    /// Succeed and clear the local profile fields.
    Cleared,
}

impl std::str::FromStr for AbsentUser {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(AbsentUser::Error),
            "cleared" => Ok(AbsentUser::Cleared),
            other => Err(format!("expected `error` or `cleared`, got `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// TLS certificate verification. Off by default for local development
    /// against a self-signed server; enable it for anything else.
    pub verify_tls: bool,
    pub timeout: Duration,
    pub absent_user: AbsentUser,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            verify_tls: false,
            timeout: DEFAULT_TIMEOUT,
            absent_user: AbsentUser::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Defaults overridden by the `AUTH_SERVER_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL) {
            if url.trim().is_empty() {
                return Err(invalid(ENV_BASE_URL, url, "must not be empty"));
            }
            config.base_url = url;
        }
        if let Some(raw) = lookup(ENV_VERIFY_TLS) {
            config.verify_tls = parse_flag(&raw)
                .ok_or_else(|| invalid(ENV_VERIFY_TLS, raw.clone(), "expected a boolean"))?;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| invalid(ENV_TIMEOUT_SECS, raw.clone(), e.to_string()))?;
            if secs == 0 {
                return Err(invalid(ENV_TIMEOUT_SECS, raw, "must be at least 1"));
            }
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = lookup(ENV_ABSENT_USER) {
            config.absent_user = raw.parse().map_err(|e| invalid(ENV_ABSENT_USER, raw.clone(), e))?;
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_verify_tls(mut self, verify_tls: bool) -> Self {
        self.verify_tls = verify_tls;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_absent_user(mut self, absent_user: AbsentUser) -> Self {
        self.absent_user = absent_user;
        self
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" | "y" | "yes" | "on" => Some(true),
        "0" | "f" | "false" | "n" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn invalid(variable: &'static str, value: String, reason: impl Into<String>) -> ConfigError {
    ConfigError {
        variable,
        value,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_target_local_dev_server() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://localhost:8080/");
        assert!(!config.verify_tls);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.absent_user, AbsentUser::Error);
    }

    #[test]
    fn no_variables_yields_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "https://auth.example.org"),
            (ENV_VERIFY_TLS, "TRUE"),
            (ENV_TIMEOUT_SECS, "12"),
            (ENV_ABSENT_USER, "cleared"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://auth.example.org");
        assert!(config.verify_tls);
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert_eq!(config.absent_user, AbsentUser::Cleared);
    }

    #[test]
    fn bad_flag_is_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_VERIFY_TLS, "maybe")])).unwrap_err();
        assert_eq!(err.variable, ENV_VERIFY_TLS);
        assert_eq!(err.value, "maybe");
    }

    #[test]
    fn zero_or_garbage_timeout_is_rejected() {
        for raw in ["0", "-3", "soon"] {
            let err = ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, raw)])).unwrap_err();
            assert_eq!(err.variable, ENV_TIMEOUT_SECS, "{raw}");
        }
    }

    #[test]
    fn unknown_absent_user_mode_is_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_ABSENT_USER, "ignore")])).unwrap_err();
        assert_eq!(err.variable, ENV_ABSENT_USER);
    }

    #[test]
    fn builder_methods_set_fields() {
        let config = ClientConfig::new("http://127.0.0.1:9000")
            .with_verify_tls(true)
            .with_timeout(Duration::from_millis(250))
            .with_absent_user(AbsentUser::Cleared);
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert!(config.verify_tls);
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.absent_user, AbsentUser::Cleared);
        assert_eq!(config.clone().with_base_url("x").base_url, "x");
    }
}
