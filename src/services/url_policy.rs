use crate::constants::paths;
use crate::errors::ClientError;
use crate::services::config::Credentials;
use crate::services::host::HostEnvironment;
use crate::utils::url_parts::append_query_parameter;
use url::Url;

/// `{origin}/console/plugins/{id}/app_proxy`, using the host's application
/// id when `id` is not given.
pub fn application_base_url(
    host: &dyn HostEnvironment,
    id: Option<&str>,
) -> Result<String, ClientError> {
    let app_id = match id {
        Some(id) => id.to_string(),
        None => host
            .application_id()
            .ok_or_else(|| ClientError::environment("Unable to determine application id"))?,
    };
    Ok(format!(
        "{}{}{}{}",
        host.origin(),
        paths::CONSOLE_PLUGINS,
        app_id,
        paths::APP_PROXY
    ))
}

/// Absolute URL for a REST path plus a trailing `{timestamp_ms}=` query
/// parameter against cached responses.
pub fn build_rest_url(
    path: &str,
    host: &dyn HostEnvironment,
    timestamp_ms: i64,
) -> Result<String, ClientError> {
    let url = if path.starts_with(paths::PREFIX_API) {
        format!("{}{}", host.origin(), path)
    } else if path.starts_with(paths::PREFIX_APPLICATION) {
        let remainder = &path[paths::PREFIX_APPLICATION.len() - 1..];
        format!("{}{}", application_base_url(host, None)?, remainder)
    } else {
        path.to_string()
    };
    Ok(append_query_parameter(&url, &timestamp_ms.to_string(), ""))
}

/// Whether the cookie jar goes along with a request to `url`.
pub fn sends_cookies(credentials: Credentials, url: &str, origin: &str) -> bool {
    match credentials {
        Credentials::Include => true,
        Credentials::Omit => false,
        Credentials::SameOrigin => match (Url::parse(url), Url::parse(origin)) {
            (Ok(target), Ok(host)) => target.origin() == host.origin(),
            (Err(_), _) => true,
            (Ok(_), Err(_)) => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::host::StaticHost;

    fn host() -> StaticHost {
        StaticHost::new("https://console.example.com").with_application_id("1051")
    }

    #[test]
    fn api_paths_resolve_against_origin() {
        let url = build_rest_url("/api/ariel/searches", &host(), 1700).expect("url");
        assert_eq!(url, "https://console.example.com/api/ariel/searches?1700=");
    }

    #[test]
    fn application_paths_resolve_against_app_proxy() {
        let url = build_rest_url("/application/status?full=1", &host(), 5).expect("url");
        assert_eq!(
            url,
            "https://console.example.com/console/plugins/1051/app_proxy/status?full=1&5="
        );
    }

    #[test]
    fn other_paths_are_used_verbatim() {
        let url = build_rest_url("https://other.example.com/x", &host(), 9).expect("url");
        assert_eq!(url, "https://other.example.com/x?9=");
    }

    #[test]
    fn application_paths_need_an_application_id() {
        let bare = StaticHost::new("https://console.example.com");
        let err = build_rest_url("/application/x", &bare, 1).expect_err("no app id");
        assert_eq!(err.message, "Unable to determine application id");
    }

    #[test]
    fn same_origin_compares_scheme_host_and_port() {
        let origin = "https://console.example.com";
        assert!(sends_cookies(
            Credentials::SameOrigin,
            "https://console.example.com/api/x",
            origin
        ));
        assert!(!sends_cookies(
            Credentials::SameOrigin,
            "https://console.example.com:8443/api/x",
            origin
        ));
        assert!(sends_cookies(Credentials::Include, "https://elsewhere.io/", origin));
        assert!(!sends_cookies(Credentials::Omit, "https://console.example.com/", origin));
    }
}
