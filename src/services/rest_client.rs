use crate::constants::{content_types, headers as header_names, limits};
use crate::descriptors::RequestDescriptor;
use crate::errors::ClientError;
use crate::services::config::{ClientConfig, Credentials};
use crate::services::host::HostEnvironment;
use crate::services::logger::Logger;
use crate::services::transport::{PreparedRequest, RestResponse, Transport};
use crate::services::url_policy::{build_rest_url, sends_cookies};
use crate::utils::redact::{preview_text, redact_headers};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Caller-supplied header. A missing or blank name is rejected when the
/// request is prepared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub value: String,
}

impl HeaderEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestOptions {
    pub asynchronous: bool,
    pub timeout_ms: Option<u64>,
    pub headers: Vec<HeaderEntry>,
    pub credentials: Option<Credentials>,
}

impl Default for RestOptions {
    fn default() -> Self {
        Self {
            asynchronous: true,
            timeout_ms: None,
            headers: Vec::new(),
            credentials: None,
        }
    }
}

impl RestOptions {
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(HeaderEntry::new(name, value));
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn blocking(mut self) -> Self {
        self.asynchronous = false;
        self
    }
}

pub struct RestClient {
    logger: Logger,
    config: ClientConfig,
    host: Arc<dyn HostEnvironment>,
    transport: Arc<dyn Transport>,
}

impl RestClient {
    pub fn new(
        logger: Logger,
        config: ClientConfig,
        host: Arc<dyn HostEnvironment>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            logger: logger.child("rest"),
            config,
            host,
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn host(&self) -> &dyn HostEnvironment {
        self.host.as_ref()
    }

    pub fn prepare(
        &self,
        request: &RequestDescriptor,
        options: &RestOptions,
    ) -> Result<PreparedRequest, ClientError> {
        self.prepare_at(request, options, chrono::Utc::now().timestamp_millis())
    }

    /// `prepare` with a fixed cache-busting timestamp.
    pub fn prepare_at(
        &self,
        request: &RequestDescriptor,
        options: &RestOptions,
        timestamp_ms: i64,
    ) -> Result<PreparedRequest, ClientError> {
        let url = build_rest_url(&request.path, self.host.as_ref(), timestamp_ms)?;
        let credentials = options.credentials.unwrap_or(self.config.credentials);
        let mut headers = self.assemble_headers(request, options)?;

        let origin = self.host.origin();
        let caller_cookie = headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case(header_names::COOKIE));
        if !caller_cookie && sends_cookies(credentials, &url, &origin) {
            if let Some(jar) = self.host.cookie_header() {
                headers.push((header_names::COOKIE.to_string(), jar));
            }
        }

        let body = match &request.body {
            Some(body) => Some(body.to_wire().map_err(|err| {
                ClientError::invalid_params(format!("Request body is not serializable: {}", err))
            })?),
            None => None,
        };
        let timeout_ms = options
            .asynchronous
            .then(|| options.timeout_ms.unwrap_or(self.config.default_timeout_ms));

        Ok(PreparedRequest {
            method: request.http_method.clone(),
            url,
            headers,
            body,
            timeout_ms,
            credentials,
        })
    }

    fn assemble_headers(
        &self,
        request: &RequestDescriptor,
        options: &RestOptions,
    ) -> Result<Vec<(String, String)>, ClientError> {
        let needs_content_type =
            request.http_method.requires_content_type() || request.body.is_some();
        let mut headers: Vec<(String, String)> = Vec::new();
        let mut content_type_added = false;

        if needs_content_type {
            if let Some(content_type) = &request.content_type {
                headers.push((header_names::CONTENT_TYPE.to_string(), content_type.clone()));
                content_type_added = true;
            }
        }

        for (index, entry) in options.headers.iter().enumerate() {
            let name = entry
                .name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .ok_or_else(|| {
                    ClientError::invalid_header(format!(
                        "Header {} passed to REST call {} is invalid: {}",
                        index,
                        request.path,
                        serde_json::to_string(entry).unwrap_or_default()
                    ))
                })?;
            if name.eq_ignore_ascii_case(header_names::CONTENT_TYPE) {
                if content_type_added || !needs_content_type {
                    continue;
                }
                content_type_added = true;
            }
            headers.push((name.to_string(), entry.value.clone()));
        }

        if needs_content_type && !content_type_added {
            headers.push((
                header_names::CONTENT_TYPE.to_string(),
                content_types::DEFAULT.to_string(),
            ));
        }

        let csrf_name = self.config.csrf_cookie_name.as_str();
        let caller_csrf = headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case(csrf_name));
        if !caller_csrf {
            if let Some(token) = self.host.cookie(csrf_name) {
                headers.push((csrf_name.to_string(), token));
            }
        }
        Ok(headers)
    }

    /// Executes one attempt. Asynchronous requests race the transport
    /// against their timeout; a call that loses the race keeps running
    /// detached and its result is dropped.
    pub async fn rest(
        &self,
        request: &RequestDescriptor,
        options: &RestOptions,
    ) -> Result<RestResponse, ClientError> {
        let prepared = self.prepare(request, options)?;
        self.logger.debug(
            "REST request",
            Some(&serde_json::json!({
                "method": prepared.method.as_str(),
                "url": prepared.url,
                "headers": redact_headers(&prepared.headers),
                "body": prepared
                    .body
                    .as_deref()
                    .map(|body| preview_text(body, limits::LOG_BODY_PREVIEW_BYTES)),
            })),
        );

        let Some(timeout_ms) = prepared.timeout_ms else {
            return self.transport.execute(prepared).await;
        };

        let url = prepared.url.clone();
        let transport = self.transport.clone();
        let call = tokio::spawn(async move { transport.execute(prepared).await });
        tokio::select! {
            joined = call => joined.map_err(|err| {
                ClientError::internal(format!("REST call to {} failed to complete: {}", url, err))
            })?,
            _ = tokio::time::sleep(Duration::from_millis(timeout_ms)) => {
                self.logger.warn(
                    "REST request timed out",
                    Some(&serde_json::json!({"url": url, "timeout_ms": timeout_ms})),
                );
                Err(ClientError::timeout(format!(
                    "Unable to reach {} after {} ms",
                    url, timeout_ms
                )))
            }
        }
    }

    /// Synchronous flavour of `rest`: no timeout race, driven on a private
    /// runtime. Must not be called from inside an async runtime.
    pub fn rest_blocking(
        &self,
        request: &RequestDescriptor,
        options: &RestOptions,
    ) -> Result<RestResponse, ClientError> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(ClientError::internal(
                "Blocking REST calls cannot run inside an async runtime",
            )
            .with_hint("Use RestClient::rest from async code"));
        }
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let options = options.clone().blocking();
        runtime.block_on(self.rest(request, &options))
    }
}
