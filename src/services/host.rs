use crate::services::config::ClientConfig;
use crate::utils::cookies::read_cookie;

/// What the console page would otherwise read from `window` and `document`.
pub trait HostEnvironment: Send + Sync {
    fn origin(&self) -> String;

    fn application_id(&self) -> Option<String>;

    fn cookie_header(&self) -> Option<String>;

    fn cookie(&self, name: &str) -> Option<String> {
        self.cookie_header().and_then(|jar| read_cookie(&jar, name))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StaticHost {
    origin: String,
    application_id: Option<String>,
    cookies: Option<String>,
}

impl StaticHost {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            application_id: None,
            cookies: None,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            origin: config.console_origin.clone(),
            application_id: config.application_id.clone(),
            cookies: config.cookies.clone(),
        }
    }

    pub fn with_application_id(mut self, id: impl Into<String>) -> Self {
        self.application_id = Some(id.into());
        self
    }

    pub fn with_cookies(mut self, cookies: impl Into<String>) -> Self {
        self.cookies = Some(cookies.into());
        self
    }
}

impl HostEnvironment for StaticHost {
    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn application_id(&self) -> Option<String> {
        self.application_id.clone()
    }

    fn cookie_header(&self) -> Option<String> {
        self.cookies.clone()
    }
}
