use crate::constants::paths;
use crate::descriptors::{
    EndpointDescriptor, HttpMethod, ParameterValues, RequestDescriptor, ServiceVersion,
};
use crate::errors::ClientError;
use crate::services::directory::ServiceDirectory;
use crate::services::locator::{find_endpoint, find_service};
use crate::services::logger::Logger;
use crate::services::request_builder::RequestBuilder;
use crate::services::rest_client::{RestClient, RestOptions};
use crate::services::transport::RestResponse;
use serde_json::Value;
use std::sync::Arc;

/// One "call endpoint X of service Y" intent.
#[derive(Debug, Clone)]
pub struct NamedServiceCall {
    pub service: String,
    pub version: ServiceVersion,
    pub endpoint: String,
    pub parameters: ParameterValues,
    pub body: Option<Value>,
    pub options: RestOptions,
}

impl NamedServiceCall {
    pub fn new(
        service: impl Into<String>,
        version: impl Into<ServiceVersion>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            version: version.into(),
            endpoint: endpoint.into(),
            parameters: ParameterValues::new(),
            body: None,
            options: RestOptions::default(),
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_options(mut self, options: RestOptions) -> Self {
        self.options = options;
        self
    }
}

pub struct NamedServiceClient {
    logger: Logger,
    rest: Arc<RestClient>,
    directory: Arc<dyn ServiceDirectory>,
    builder: RequestBuilder,
}

impl NamedServiceClient {
    pub fn new(
        logger: Logger,
        rest: Arc<RestClient>,
        directory: Arc<dyn ServiceDirectory>,
    ) -> Self {
        let logger = logger.child("named_service");
        Self {
            builder: RequestBuilder::new(logger.clone()),
            logger,
            rest,
            directory,
        }
    }

    pub async fn resolve_endpoint(
        &self,
        service: &str,
        version: &ServiceVersion,
        endpoint: &str,
    ) -> Result<EndpointDescriptor, ClientError> {
        let services = self.directory.lookup_services().await?;
        let found = find_service(&services, service, version)?;
        Ok(find_endpoint(found, endpoint)?.clone())
    }

    /// Resolves and builds the request without sending it.
    pub async fn resolve(&self, call: &NamedServiceCall) -> Result<RequestDescriptor, ClientError> {
        let endpoint = self
            .resolve_endpoint(&call.service, &call.version, &call.endpoint)
            .await?;
        self.builder
            .build(&endpoint, Some(&call.parameters), call.body.as_ref())
    }

    pub async fn call(&self, call: &NamedServiceCall) -> Result<RestResponse, ClientError> {
        let request = self.resolve(call).await?;
        self.logger.info(
            "Calling named service endpoint",
            Some(&serde_json::json!({
                "service": call.service,
                "version": call.version.canonical(),
                "endpoint": call.endpoint,
                "method": request.http_method.as_str(),
            })),
        );
        self.rest.rest(&request, &call.options).await
    }

    /// First entry of the current-user listing, or `None` unless the console
    /// answers 200. Sent synchronously, without a timeout.
    pub async fn current_user(&self) -> Result<Option<Value>, ClientError> {
        let request = RequestDescriptor {
            http_method: HttpMethod::Get,
            path: paths::CURRENT_USER.to_string(),
            body: None,
            content_type: None,
        };
        let response = self
            .rest
            .rest(&request, &RestOptions::default().blocking())
            .await?;
        if response.status != 200 {
            self.logger.warn(
                "Current user lookup failed",
                Some(&serde_json::json!({ "status": response.status })),
            );
            return Ok(None);
        }
        let users: Vec<Value> = response.json()?;
        Ok(users.into_iter().next())
    }
}
