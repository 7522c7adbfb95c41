use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientErrorKind {
    NotFound,
    MissingRequiredParameter,
    InvalidHeaderSpecification,
    InvalidParams,
    Environment,
    Timeout,
    Transport,
    Internal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientError {
    pub kind: ClientErrorKind,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ClientError {
    pub fn new(
        kind: ClientErrorKind,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
            hint: None,
            details: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::NotFound, "NOT_FOUND", message)
    }

    pub fn missing_parameter(name: &str) -> Self {
        Self::new(
            ClientErrorKind::MissingRequiredParameter,
            "MISSING_REQUIRED_PARAMETER",
            format!("No value was supplied for PATH parameter {}", name),
        )
        .with_details(serde_json::json!({ "parameter": name }))
    }

    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::new(
            ClientErrorKind::InvalidHeaderSpecification,
            "INVALID_HEADER",
            message,
        )
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::InvalidParams, "INVALID_PARAMS", message)
    }

    pub fn environment(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Environment, "ENVIRONMENT", message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Timeout, "TIMEOUT", message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Transport, "TRANSPORT", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Internal, "INTERNAL", message)
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " ({})", hint)?;
        }
        Ok(())
    }
}

impl Error for ClientError {}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::internal(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::invalid_params(format!("Invalid JSON: {}", err))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return ClientError::timeout("HTTP request timed out");
        }
        ClientError::transport(err.to_string())
    }
}
