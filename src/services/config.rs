use crate::constants::{credentials, env as env_keys, headers, network};
use crate::errors::ClientError;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Which requests carry the host's cookie jar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Credentials {
    #[default]
    SameOrigin,
    Include,
    Omit,
}

impl Credentials {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            credentials::SAME_ORIGIN => Some(Credentials::SameOrigin),
            credentials::INCLUDE => Some(Credentials::Include),
            credentials::OMIT => Some(Credentials::Omit),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Credentials::SameOrigin => credentials::SAME_ORIGIN,
            Credentials::Include => credentials::INCLUDE,
            Credentials::Omit => credentials::OMIT,
        }
    }
}

impl fmt::Display for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub console_origin: String,
    pub application_id: Option<String>,
    pub cookies: Option<String>,
    pub csrf_cookie_name: String,
    pub default_timeout_ms: u64,
    pub credentials: Credentials,
    pub insecure_tls: bool,
}

impl ClientConfig {
    pub fn new(console_origin: &str) -> Result<Self, ClientError> {
        Ok(Self {
            console_origin: normalize_origin(console_origin)?,
            application_id: None,
            cookies: None,
            csrf_cookie_name: headers::QRADAR_CSRF.to_string(),
            default_timeout_ms: network::DEFAULT_TIMEOUT_MS,
            credentials: Credentials::default(),
            insecure_tls: false,
        })
    }

    pub fn with_application_id(mut self, id: impl Into<String>) -> Self {
        self.application_id = Some(id.into());
        self
    }

    pub fn with_cookies(mut self, cookies: impl Into<String>) -> Self {
        self.cookies = Some(cookies.into());
        self
    }

    pub fn with_default_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.default_timeout_ms = timeout_ms;
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn from_env() -> Result<Self, ClientError> {
        let origin = read_env(env_keys::CONSOLE_ORIGIN).ok_or_else(|| {
            ClientError::environment(format!("{} is not set", env_keys::CONSOLE_ORIGIN))
                .with_hint("Set it to the console origin, e.g. https://qradar.example.com")
        })?;
        let mut config = Self::new(&origin)?;
        config.application_id = read_env(env_keys::APP_ID);
        config.cookies = read_env(env_keys::COOKIES);

        if let Some(raw) = read_env(env_keys::TIMEOUT_MS) {
            config.default_timeout_ms = raw
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or_else(|| {
                    ClientError::invalid_params(format!(
                        "{} must be a positive integer, got {}",
                        env_keys::TIMEOUT_MS,
                        raw
                    ))
                })?;
        }
        if let Some(raw) = read_env(env_keys::CREDENTIALS) {
            config.credentials = Credentials::parse(&raw).ok_or_else(|| {
                ClientError::invalid_params(format!(
                    "{} must be one of same-origin, include, omit",
                    env_keys::CREDENTIALS
                ))
            })?;
        }
        config.insecure_tls = read_env(env_keys::INSECURE_TLS)
            .map(|raw| matches!(raw.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);
        Ok(config)
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Reduces a console URL to `scheme://host[:port]`.
pub fn normalize_origin(raw: &str) -> Result<String, ClientError> {
    let parsed = Url::parse(raw.trim())
        .map_err(|_| ClientError::invalid_params(format!("Invalid console origin: {}", raw)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::invalid_params(
            "Only http/https console origins are supported",
        ));
    }
    Ok(parsed.origin().ascii_serialization())
}

#[cfg(test)]
mod tests {
    use super::{normalize_origin, Credentials};

    #[test]
    fn normalize_origin_drops_path_and_default_port() {
        assert_eq!(
            normalize_origin("https://console.example.com:443/console/").expect("origin"),
            "https://console.example.com"
        );
        assert!(normalize_origin("ftp://example.com").is_err());
    }

    #[test]
    fn credentials_parse_round_trips_labels() {
        assert_eq!(Credentials::parse("Include"), Some(Credentials::Include));
        assert_eq!(Credentials::SameOrigin.as_str(), "same-origin");
        assert_eq!(Credentials::parse("sometimes"), None);
    }
}
