use crate::constants::content_types;
use crate::descriptors::{
    EndpointDescriptor, ParameterLocation, ParameterValues, RequestBody, RequestDescriptor,
};
use crate::errors::ClientError;
use crate::services::logger::Logger;
use crate::utils::text::value_to_text;
use crate::utils::url_parts::{
    append_form_parameter, append_query_parameter, substitute_path_parameter,
};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SoftWarningKind {
    BodyValueOverride,
    UnsupportedMimeType,
    UnsupportedLocation,
}

/// Non-fatal note about a supplied parameter that was left out of the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SoftWarning {
    pub kind: SoftWarningKind,
    pub parameter: String,
    pub message: String,
}

impl SoftWarning {
    fn body_value_override(parameter: &str) -> Self {
        Self {
            kind: SoftWarningKind::BodyValueOverride,
            parameter: parameter.to_string(),
            message: format!(
                "Ignoring BODY parameter {}, using supplied body value instead",
                parameter
            ),
        }
    }

    fn unsupported_location(parameter: &str) -> Self {
        Self {
            kind: SoftWarningKind::UnsupportedLocation,
            parameter: parameter.to_string(),
            message: format!("Ignoring parameter {} with unsupported location", parameter),
        }
    }

    fn unsupported_mime_type(parameter: &str, mime_type: &str) -> Self {
        Self {
            kind: SoftWarningKind::UnsupportedMimeType,
            parameter: parameter.to_string(),
            message: format!(
                "Ignoring BODY parameter {} due to unsupported request mime type {}",
                parameter, mime_type
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuiltRequest {
    pub request: RequestDescriptor,
    pub warnings: Vec<SoftWarning>,
}

pub fn is_json_mime_type(mime_type: &str) -> bool {
    mime_type.contains(content_types::JSON)
}

pub fn is_form_mime_type(mime_type: &str) -> bool {
    mime_type == content_types::FORM
}

fn supplied<'a>(values: Option<&'a ParameterValues>, name: &str) -> Option<&'a Value> {
    values?.get(name).filter(|value| !value.is_null())
}

/// Resolves `endpoint` against the supplied values into a transport-ready
/// descriptor. A raw `body_value` (other than `null`) replaces every BODY
/// parameter.
pub fn build_request(
    endpoint: &EndpointDescriptor,
    values: Option<&ParameterValues>,
    body_value: Option<&Value>,
) -> Result<BuiltRequest, ClientError> {
    let mime_type = endpoint
        .request_mime_type
        .as_deref()
        .unwrap_or(content_types::DEFAULT);
    let is_json = is_json_mime_type(mime_type);
    let is_form = !is_json && is_form_mime_type(mime_type);
    let body_value = body_value.filter(|value| !value.is_null());

    let mut path = endpoint.path.clone();
    let mut json_body: Option<serde_json::Map<String, Value>> = None;
    let mut form_body: Option<String> = None;
    let mut warnings = Vec::new();

    for parameter in endpoint.parameters() {
        let Some(value) = supplied(values, &parameter.name) else {
            if parameter.location == ParameterLocation::Path {
                return Err(ClientError::missing_parameter(&parameter.name)
                    .with_hint(format!("Endpoint {} path is {}", endpoint.name, endpoint.path)));
            }
            continue;
        };

        match parameter.location {
            ParameterLocation::Path => {
                path = substitute_path_parameter(&path, &parameter.name, &value_to_text(value));
            }
            ParameterLocation::Query => {
                path = append_query_parameter(&path, &parameter.name, &value_to_text(value));
            }
            ParameterLocation::Body => {
                if body_value.is_some() {
                    warnings.push(SoftWarning::body_value_override(&parameter.name));
                } else if is_json {
                    json_body
                        .get_or_insert_with(serde_json::Map::new)
                        .insert(parameter.name.clone(), value.clone());
                } else if is_form {
                    form_body = Some(append_form_parameter(
                        form_body.take(),
                        &parameter.name,
                        &value_to_text(value),
                    ));
                } else {
                    warnings.push(SoftWarning::unsupported_mime_type(&parameter.name, mime_type));
                }
            }
            ParameterLocation::Unknown => {
                warnings.push(SoftWarning::unsupported_location(&parameter.name));
            }
        }
    }

    let body = if let Some(raw) = body_value {
        Some(RequestBody::Text(serde_json::to_string(raw).map_err(|err| {
            ClientError::invalid_params(format!("Body value is not serializable: {}", err))
        })?))
    } else if let Some(object) = json_body {
        Some(RequestBody::Json(Value::Object(object)))
    } else {
        form_body.map(RequestBody::Form)
    };

    let content_type = (endpoint.http_method.requires_content_type() || body.is_some())
        .then(|| mime_type.to_string());

    Ok(BuiltRequest {
        request: RequestDescriptor {
            http_method: endpoint.http_method.clone(),
            path,
            body,
            content_type,
        },
        warnings,
    })
}

/// `build_request` with soft warnings reported on the logger.
#[derive(Clone)]
pub struct RequestBuilder {
    logger: Logger,
}

impl RequestBuilder {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger: logger.child("builder"),
        }
    }

    pub fn build(
        &self,
        endpoint: &EndpointDescriptor,
        values: Option<&ParameterValues>,
        body_value: Option<&Value>,
    ) -> Result<RequestDescriptor, ClientError> {
        let built = build_request(endpoint, values, body_value)?;
        for warning in &built.warnings {
            self.logger.warn(
                &warning.message,
                Some(&serde_json::json!({
                    "endpoint": endpoint.name,
                    "kind": warning.kind,
                })),
            );
        }
        self.logger.debug(
            "Built request",
            Some(&serde_json::json!({
                "endpoint": endpoint.name,
                "method": built.request.http_method.as_str(),
                "path": built.request.path,
            })),
        );
        Ok(built.request)
    }
}
