//! Application configuration.
//!
//! Built once at startup and passed by reference to whatever needs it; there
//! is no global configuration lookup.

use std::time::Duration;

use jukebox_auth::LoginRedirect;
use jukebox_observability::LogFormat;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

impl ConfigError {
    fn invalid(var: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            var,
            message: message.into(),
        }
    }
}

/// Color palette handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub icon_font: String,
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub success: String,
    pub error: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            icon_font: "mdi".to_string(),
            primary: "#1B4F72".to_string(),
            secondary: "#CCCBCA".to_string(),
            accent: "#59B88C".to_string(),
            success: "#17A589".to_string(),
            error: "#EC7063".to_string(),
        }
    }
}

/// Paths of the backend endpoints, relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub authenticated: String,
    pub allowed: String,
    pub accept: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            authenticated: "/auth/authenticated/".to_string(),
            allowed: "/jukebox/api/allowed".to_string(),
            accept: "/jukebox/api/accept".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    pub base_url: Url,
    pub endpoints: Endpoints,
    pub login: LoginRedirect,
    /// Per-query timeout. `None` waits for each query indefinitely.
    #[serde(serialize_with = "serialize_millis")]
    pub query_timeout: Option<Duration>,
    /// Sent as the `Cookie` header on every backend query.
    #[serde(skip_serializing)]
    pub session_cookie: Option<String>,
    pub log_format: LogFormat,
    pub theme: Theme,
}

impl AppConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost";

    /// Defaults pointing at `base_url`.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            endpoints: Endpoints::default(),
            login: LoginRedirect::default(),
            query_timeout: None,
            session_cookie: None,
            log_format: LogFormat::default(),
            theme: Theme::default(),
        }
    }

    /// Read configuration from `JUKEBOX_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Unset or empty variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = match get("JUKEBOX_BASE_URL") {
            Some(raw) => parse_base_url(&raw)?,
            None => {
                tracing::debug!("JUKEBOX_BASE_URL not set; using {}", Self::DEFAULT_BASE_URL);
                parse_base_url(Self::DEFAULT_BASE_URL)?
            }
        };

        let mut config = Self::new(base_url);

        if let Some(v) = get("JUKEBOX_AUTH_ENDPOINT") {
            config.endpoints.authenticated = v;
        }
        if let Some(v) = get("JUKEBOX_ALLOWED_ENDPOINT") {
            config.endpoints.allowed = v;
        }
        if let Some(v) = get("JUKEBOX_ACCEPT_ENDPOINT") {
            config.endpoints.accept = v;
        }

        let login_base = get("JUKEBOX_LOGIN_URL");
        let dashboard_prefix = get("JUKEBOX_DASHBOARD_PREFIX");
        if login_base.is_some() || dashboard_prefix.is_some() {
            config.login = LoginRedirect::new(
                login_base.unwrap_or_else(|| LoginRedirect::DEFAULT_LOGIN_BASE.to_string()),
                dashboard_prefix
                    .unwrap_or_else(|| LoginRedirect::DEFAULT_DASHBOARD_PREFIX.to_string()),
            );
        }

        if let Some(raw) = get("JUKEBOX_QUERY_TIMEOUT_MS") {
            let ms: u64 = raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid("JUKEBOX_QUERY_TIMEOUT_MS", format!("{e}")))?;
            config.query_timeout = (ms > 0).then(|| Duration::from_millis(ms));
        }

        config.session_cookie = get("JUKEBOX_SESSION_COOKIE");

        if let Some(raw) = get("JUKEBOX_LOG_FORMAT") {
            config.log_format = raw
                .parse()
                .map_err(|e| ConfigError::invalid("JUKEBOX_LOG_FORMAT", format!("{e}")))?;
        }

        if let Some(raw) = get("JUKEBOX_THEME") {
            config.theme = serde_json::from_str(&raw)
                .map_err(|e| ConfigError::invalid("JUKEBOX_THEME", format!("{e}")))?;
        }

        Ok(config)
    }
}

/// Parse and check a backend base URL.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::invalid("JUKEBOX_BASE_URL", format!("{e}")))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::invalid(
            "JUKEBOX_BASE_URL",
            format!("'{raw}' cannot be used as a base URL"),
        ));
    }
    Ok(url)
}

fn serialize_millis<S: serde::Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(d) => s.serialize_some(&(d.as_millis() as u64)),
        None => s.serialize_none(),
    }
}
