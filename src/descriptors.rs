//! Named service directory types and the resolved request they produce.

use serde::{Deserialize, Serialize};
use crate::utils::text::number_to_text;
use serde_json::{Number, Value};
use std::fmt;

/// Caller-supplied parameter values keyed by parameter name. `null` counts
/// as not supplied.
pub type ParameterValues = serde_json::Map<String, Value>;

/// Service version as published by the directory: a string or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceVersion {
    Number(Number),
    Text(String),
}

impl ServiceVersion {
    /// Textual form used for loose comparison. Integral floats drop their
    /// fractional part so `1.0` and `"1"` compare equal.
    pub fn canonical(&self) -> String {
        match self {
            ServiceVersion::Text(text) => text.clone(),
            ServiceVersion::Number(num) => number_to_text(num),
        }
    }

    pub fn loosely_equals(&self, other: &ServiceVersion) -> bool {
        self.canonical() == other.canonical()
    }
}

impl fmt::Display for ServiceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

impl From<&str> for ServiceVersion {
    fn from(value: &str) -> Self {
        ServiceVersion::Text(value.to_string())
    }
}

impl From<String> for ServiceVersion {
    fn from(value: String) -> Self {
        ServiceVersion::Text(value)
    }
}

impl From<i64> for ServiceVersion {
    fn from(value: i64) -> Self {
        ServiceVersion::Number(Number::from(value))
    }
}

impl From<i32> for ServiceVersion {
    fn from(value: i32) -> Self {
        ServiceVersion::Number(Number::from(value))
    }
}

impl From<f64> for ServiceVersion {
    fn from(value: f64) -> Self {
        Number::from_f64(value)
            .map(ServiceVersion::Number)
            .unwrap_or_else(|| ServiceVersion::Text(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub name: String,
    pub version: ServiceVersion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<Vec<EndpointDescriptor>>,
}

impl ServiceDescriptor {
    pub fn endpoints(&self) -> &[EndpointDescriptor] {
        self.endpoints.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Other(String),
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Other(raw) => raw.as_str(),
        }
    }

    /// POST and PUT always carry a content type, body or not.
    pub fn requires_content_type(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

impl From<String> for HttpMethod {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "DELETE" => HttpMethod::Delete,
            _ => HttpMethod::Other(raw),
        }
    }
}

impl From<&str> for HttpMethod {
    fn from(raw: &str) -> Self {
        HttpMethod::from(raw.to_string())
    }
}

impl From<HttpMethod> for String {
    fn from(method: HttpMethod) -> Self {
        method.as_str().to_string()
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParameterLocation {
    Path,
    Query,
    Body,
    /// Any location this client does not handle; such parameters are skipped.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    pub location: ParameterLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    pub name: String,
    pub http_method: HttpMethod,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<ParameterDescriptor>>,
}

impl EndpointDescriptor {
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        self.parameters.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RequestBody {
    /// Accumulated BODY parameters, serialized by the transport.
    Json(Value),
    /// Caller-supplied raw body, already serialized as JSON text.
    Text(String),
    Form(String),
}

impl RequestBody {
    pub fn to_wire(&self) -> Result<String, serde_json::Error> {
        match self {
            RequestBody::Json(value) => serde_json::to_string(value),
            RequestBody::Text(text) | RequestBody::Form(text) => Ok(text.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDescriptor {
    pub http_method: HttpMethod,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_loose_equality_crosses_representations() {
        let text = ServiceVersion::from("1");
        assert!(text.loosely_equals(&ServiceVersion::from(1i64)));
        assert!(text.loosely_equals(&ServiceVersion::from(1.0)));
        assert!(!text.loosely_equals(&ServiceVersion::from("1.1")));
        assert!(ServiceVersion::from(1.5).loosely_equals(&ServiceVersion::from("1.5")));
    }

    #[test]
    fn endpoint_parses_directory_wire_format() {
        let raw = r#"{
            "name": "getItem",
            "http_method": "PATCH",
            "path": "/api/items/{id}",
            "parameters": [{"name": "id", "location": "PATH"}]
        }"#;
        let endpoint: EndpointDescriptor = serde_json::from_str(raw).expect("must parse");
        assert_eq!(endpoint.http_method, HttpMethod::Other("PATCH".to_string()));
        assert_eq!(endpoint.parameters()[0].location, ParameterLocation::Path);
        assert!(endpoint.request_mime_type.is_none());
    }

    #[test]
    fn unhandled_parameter_location_parses_as_unknown() {
        let parameter: ParameterDescriptor =
            serde_json::from_str(r#"{"name": "X-Trace", "location": "HEADER"}"#)
                .expect("must parse");
        assert_eq!(parameter.location, ParameterLocation::Unknown);
    }

    #[test]
    fn request_descriptor_omits_absent_fields() {
        let descriptor = RequestDescriptor {
            http_method: HttpMethod::Get,
            path: "/api/items".to_string(),
            body: None,
            content_type: None,
        };
        let value = serde_json::to_value(&descriptor).expect("serializable");
        assert_eq!(
            value,
            serde_json::json!({"httpMethod": "GET", "path": "/api/items"})
        );
    }
}
