pub mod config;
pub mod directory;
pub mod host;
pub mod locator;
pub mod logger;
pub mod request_builder;
pub mod rest_client;
pub mod transport;
pub mod url_policy;
