//! Resolves named service endpoints published by a QRadar console and turns
//! them into ready-to-send REST requests.

pub mod app;
pub mod cli;
pub mod constants;
pub mod descriptors;
pub mod errors;
pub mod managers;
pub mod services;
pub mod utils;

pub use descriptors::{
    EndpointDescriptor, HttpMethod, ParameterDescriptor, ParameterLocation, ParameterValues,
    RequestBody, RequestDescriptor, ServiceDescriptor, ServiceVersion,
};
pub use errors::{ClientError, ClientErrorKind};
pub use services::locator::{find_endpoint, find_service};
pub use services::request_builder::{build_request, BuiltRequest, SoftWarning, SoftWarningKind};
