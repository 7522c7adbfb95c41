use crate::errors::ClientError;
use crate::managers::named_service::NamedServiceClient;
use crate::services::config::ClientConfig;
use crate::services::directory::{RestServiceDirectory, ServiceDirectory};
use crate::services::host::{HostEnvironment, StaticHost};
use crate::services::logger::Logger;
use crate::services::rest_client::RestClient;
use crate::services::transport::{HttpTransport, Transport};
use std::sync::Arc;

pub struct App {
    pub logger: Logger,
    pub config: ClientConfig,
    pub rest: Arc<RestClient>,
    pub named_services: Arc<NamedServiceClient>,
}

impl App {
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_env_with_logger(Logger::new("qradar-rest"))
    }

    pub fn from_env_with_logger(logger: Logger) -> Result<Self, ClientError> {
        Self::initialize_with_logger(logger, ClientConfig::from_env()?)
    }

    pub fn initialize(config: ClientConfig) -> Result<Self, ClientError> {
        Self::initialize_with_logger(Logger::new("qradar-rest"), config)
    }

    /// Wires the reqwest transport, a config-backed host and the console's
    /// REST service directory.
    pub fn initialize_with_logger(
        logger: Logger,
        config: ClientConfig,
    ) -> Result<Self, ClientError> {
        let transport: Arc<dyn Transport> =
            Arc::new(HttpTransport::new(logger.clone(), &config)?);
        let host: Arc<dyn HostEnvironment> = Arc::new(StaticHost::from_config(&config));
        Ok(Self::with_parts(logger, config, host, transport, None))
    }

    pub fn with_parts(
        logger: Logger,
        config: ClientConfig,
        host: Arc<dyn HostEnvironment>,
        transport: Arc<dyn Transport>,
        directory: Option<Arc<dyn ServiceDirectory>>,
    ) -> Self {
        let rest = Arc::new(RestClient::new(
            logger.clone(),
            config.clone(),
            host,
            transport,
        ));
        let directory = directory.unwrap_or_else(|| {
            Arc::new(RestServiceDirectory::new(logger.clone(), rest.clone()))
        });
        let named_services = Arc::new(NamedServiceClient::new(
            logger.clone(),
            rest.clone(),
            directory,
        ));
        logger.debug(
            "Client initialized",
            Some(&serde_json::json!({
                "origin": config.console_origin,
                "credentials": config.credentials.as_str(),
                "timeout_ms": config.default_timeout_ms,
            })),
        );
        Self {
            logger,
            config,
            rest,
            named_services,
        }
    }
}
