use crate::constants::network;
use crate::descriptors::HttpMethod;
use crate::errors::ClientError;
use crate::services::config::{ClientConfig, Credentials};
use crate::services::logger::Logger;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Transport-level request: absolute URL, ordered headers, wire body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    pub credentials: Credentials,
}

impl PreparedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RestResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_str(&self.body).map_err(|err| {
            ClientError::transport(format!("Response body is not valid JSON: {}", err))
                .with_details(serde_json::json!({ "status": self.status }))
        })
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: PreparedRequest) -> Result<RestResponse, ClientError>;
}

/// reqwest-backed transport. Timeouts are enforced by the caller, not here.
#[derive(Clone)]
pub struct HttpTransport {
    logger: Logger,
    client: Client,
}

impl HttpTransport {
    pub fn new(logger: Logger, config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder()
            .user_agent(network::USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(network::MAX_REDIRECTS));
        if config.insecure_tls {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder.build().map_err(|err| {
            ClientError::internal(format!("Failed to build HTTP client: {}", err))
        })?;
        Ok(Self {
            logger: logger.child("http"),
            client,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: PreparedRequest) -> Result<RestResponse, ClientError> {
        let method = request_method(&request.method)?;
        let mut req = self
            .client
            .request(method, request.url.as_str())
            .headers(headers_to_headermap(&request.headers)?);
        if let Some(body) = request.body {
            req = req.body(body);
        }

        let response = req.send().await?;
        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|text| (name.as_str().to_string(), text.to_string()))
            })
            .collect();
        let body = response.text().await?;
        self.logger.debug(
            "HTTP response",
            Some(&serde_json::json!({"url": request.url, "status": status.as_u16()})),
        );
        Ok(RestResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            headers,
            body,
        })
    }
}

fn request_method(method: &HttpMethod) -> Result<Method, ClientError> {
    Method::from_bytes(method.as_str().as_bytes())
        .map_err(|_| ClientError::invalid_params(format!("Invalid HTTP method {}", method)))
}

fn headers_to_headermap(headers: &[(String, String)]) -> Result<HeaderMap, ClientError> {
    let mut map = HeaderMap::new();
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|_| ClientError::invalid_header(format!("Invalid header name {}", key)))?;
        let val = HeaderValue::from_str(value).map_err(|_| {
            ClientError::invalid_header(format!("Invalid value for header {}", key))
        })?;
        map.append(name, val);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ClientErrorKind;

    fn pair(name: &str, value: &str) -> (String, String) {
        (name.to_string(), value.to_string())
    }

    #[test]
    fn headermap_keeps_repeated_headers() {
        let map = headers_to_headermap(&[
            pair("Accept", "application/json"),
            pair("X-Tag", "a"),
            pair("X-Tag", "b"),
        ])
        .expect("valid headers");
        assert_eq!(map.get("accept").and_then(|v| v.to_str().ok()), Some("application/json"));
        let tags: Vec<&str> = map
            .get_all("x-tag")
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect();
        assert_eq!(tags, vec!["a", "b"]);
    }

    #[test]
    fn headermap_rejects_invalid_name_and_value() {
        let err = headers_to_headermap(&[pair("Bad Header", "x")]).expect_err("space in name");
        assert_eq!(err.kind, ClientErrorKind::InvalidHeaderSpecification);
        assert_eq!(err.message, "Invalid header name Bad Header");

        let err = headers_to_headermap(&[pair("X-Ok", "line\nbreak")]).expect_err("newline");
        assert_eq!(err.kind, ClientErrorKind::InvalidHeaderSpecification);
    }

    #[test]
    fn request_method_maps_standard_and_custom_verbs() {
        assert_eq!(request_method(&HttpMethod::Delete).expect("delete"), Method::DELETE);
        let patch = request_method(&HttpMethod::from("PATCH")).expect("patch");
        assert_eq!(patch.as_str(), "PATCH");
        let err = request_method(&HttpMethod::from("NOT A VERB")).expect_err("space in verb");
        assert_eq!(err.kind, ClientErrorKind::InvalidParams);
    }
}
