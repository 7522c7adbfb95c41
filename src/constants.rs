pub mod network {
    pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
    pub const USER_AGENT: &str = concat!("qradar-rest/", env!("CARGO_PKG_VERSION"));
    pub const MAX_REDIRECTS: usize = 10;
}

pub mod paths {
    pub const PREFIX_API: &str = "/api/";
    pub const PREFIX_APPLICATION: &str = "/application/";
    pub const NAMED_SERVICES: &str = "/api/gui_app_framework/named_services";
    pub const CURRENT_USER: &str = "/api/config/access/users?current_user=true";
    pub const CONSOLE_PLUGINS: &str = "/console/plugins/";
    pub const APP_PROXY: &str = "/app_proxy";
}

pub mod headers {
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const COOKIE: &str = "Cookie";
    pub const QRADAR_CSRF: &str = "QRadarCSRF";
}

pub mod content_types {
    pub const JSON: &str = "application/json";
    pub const FORM: &str = "application/x-www-form-urlencoded";
    pub const DEFAULT: &str = JSON;
}

pub mod credentials {
    pub const SAME_ORIGIN: &str = "same-origin";
    pub const INCLUDE: &str = "include";
    pub const OMIT: &str = "omit";
    pub const DEFAULT: &str = SAME_ORIGIN;
}

pub mod env {
    pub const CONSOLE_ORIGIN: &str = "QRADAR_CONSOLE_ORIGIN";
    pub const APP_ID: &str = "QRADAR_APP_ID";
    pub const COOKIES: &str = "QRADAR_COOKIES";
    pub const TIMEOUT_MS: &str = "QRADAR_TIMEOUT_MS";
    pub const CREDENTIALS: &str = "QRADAR_CREDENTIALS";
    pub const INSECURE_TLS: &str = "QRADAR_INSECURE_TLS";
    pub const LOG_LEVEL: &str = "QRADAR_LOG_LEVEL";
    pub const LOG_LEVEL_FALLBACK: &str = "LOG_LEVEL";
}

pub mod limits {
    pub const SUGGESTION_LIMIT: usize = 5;
    pub const LOG_BODY_PREVIEW_BYTES: usize = 512;
}
