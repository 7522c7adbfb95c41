use crate::constants::limits::SUGGESTION_LIMIT;
use crate::descriptors::{EndpointDescriptor, ServiceDescriptor, ServiceVersion};
use crate::errors::ClientError;
use crate::utils::suggest::did_you_mean;

/// First service in list order whose name matches exactly and whose version
/// matches loosely.
pub fn find_service<'a>(
    services: &'a [ServiceDescriptor],
    name: &str,
    version: &ServiceVersion,
) -> Result<&'a ServiceDescriptor, ClientError> {
    if let Some(found) = services
        .iter()
        .find(|service| service.name == name && service.version.loosely_equals(version))
    {
        return Ok(found);
    }

    let mut err =
        ClientError::not_found(format!("Service {} version {} not found", name, version));
    let same_name: Vec<String> = services
        .iter()
        .filter(|service| service.name == name)
        .map(|service| service.version.canonical())
        .collect();
    if !same_name.is_empty() {
        err = err.with_hint(format!("Available versions: {}", same_name.join(", ")));
    } else if let Some(hint) = did_you_mean(
        name,
        services.iter().map(|service| service.name.as_str()),
        SUGGESTION_LIMIT,
    ) {
        err = err.with_hint(hint);
    }
    Err(err.with_details(serde_json::json!({
        "service": name,
        "version": version.canonical(),
    })))
}

/// First endpoint with the given name; an absent endpoint list never matches.
pub fn find_endpoint<'a>(
    service: &'a ServiceDescriptor,
    endpoint_name: &str,
) -> Result<&'a EndpointDescriptor, ClientError> {
    let endpoints = service.endpoints();
    if let Some(found) = endpoints.iter().find(|e| e.name == endpoint_name) {
        return Ok(found);
    }

    let mut err = ClientError::not_found(format!("Service endpoint {} not found", endpoint_name))
        .with_details(serde_json::json!({
            "service": service.name,
            "endpoint": endpoint_name,
        }));
    if let Some(hint) = did_you_mean(
        endpoint_name,
        endpoints.iter().map(|e| e.name.as_str()),
        SUGGESTION_LIMIT,
    ) {
        err = err.with_hint(hint);
    }
    Err(err)
}
