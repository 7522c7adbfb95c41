use crate::constants::{limits, paths};
use crate::descriptors::{HttpMethod, RequestDescriptor, ServiceDescriptor};
use crate::errors::ClientError;
use crate::services::logger::Logger;
use crate::services::rest_client::{RestClient, RestOptions};
use crate::utils::redact::preview_text;
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

#[async_trait]
pub trait ServiceDirectory: Send + Sync {
    async fn lookup_services(&self) -> Result<Vec<ServiceDescriptor>, ClientError>;
}

/// Directory entry that could not be read as a service descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    pub index: usize,
    pub reason: String,
}

/// Reads each directory entry on its own so one malformed service does not
/// hide the rest.
pub fn parse_services(entries: Vec<Value>) -> (Vec<ServiceDescriptor>, Vec<SkippedEntry>) {
    let mut services = Vec::with_capacity(entries.len());
    let mut skipped = Vec::new();
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<ServiceDescriptor>(entry) {
            Ok(service) => services.push(service),
            Err(err) => skipped.push(SkippedEntry {
                index,
                reason: err.to_string(),
            }),
        }
    }
    (services, skipped)
}

/// Fixed service list, e.g. loaded from a saved directory response.
#[derive(Debug, Clone, Default)]
pub struct StaticServiceDirectory {
    services: Vec<ServiceDescriptor>,
    skipped: Vec<SkippedEntry>,
}

impl StaticServiceDirectory {
    pub fn new(services: Vec<ServiceDescriptor>) -> Self {
        Self {
            services,
            skipped: Vec::new(),
        }
    }

    /// The document must be a JSON array; malformed entries are skipped.
    pub fn from_json_str(raw: &str) -> Result<Self, ClientError> {
        let entries: Vec<Value> = serde_json::from_str(raw)?;
        let (services, skipped) = parse_services(entries);
        Ok(Self { services, skipped })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| {
            ClientError::invalid_params(format!(
                "Unable to read service directory {}: {}",
                path.display(),
                err
            ))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn services(&self) -> &[ServiceDescriptor] {
        &self.services
    }

    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.skipped
    }
}

#[async_trait]
impl ServiceDirectory for StaticServiceDirectory {
    async fn lookup_services(&self) -> Result<Vec<ServiceDescriptor>, ClientError> {
        Ok(self.services.clone())
    }
}

/// Reads the console's named service directory over REST.
pub struct RestServiceDirectory {
    logger: Logger,
    rest: Arc<RestClient>,
}

impl RestServiceDirectory {
    pub fn new(logger: Logger, rest: Arc<RestClient>) -> Self {
        Self {
            logger: logger.child("directory"),
            rest,
        }
    }
}

#[async_trait]
impl ServiceDirectory for RestServiceDirectory {
    async fn lookup_services(&self) -> Result<Vec<ServiceDescriptor>, ClientError> {
        let request = RequestDescriptor {
            http_method: HttpMethod::Get,
            path: paths::NAMED_SERVICES.to_string(),
            body: None,
            content_type: None,
        };
        let response = self.rest.rest(&request, &RestOptions::default()).await?;
        if !response.is_success() {
            return Err(ClientError::transport(format!(
                "Named service lookup failed ({})",
                response.status
            ))
            .with_details(serde_json::json!({
                "status": response.status,
                "body": preview_text(&response.body, limits::LOG_BODY_PREVIEW_BYTES),
            })));
        }
        let entries: Vec<Value> = response.json()?;
        let (services, skipped) = parse_services(entries);
        for entry in &skipped {
            self.logger.warn(
                "Skipping malformed named service entry",
                Some(&serde_json::json!({"index": entry.index, "reason": entry.reason})),
            );
        }
        self.logger.debug(
            "Loaded named services",
            Some(&serde_json::json!({ "count": services.len() })),
        );
        Ok(services)
    }
}
