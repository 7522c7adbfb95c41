use crate::app::App;
use crate::descriptors::{
    HttpMethod, ParameterValues, RequestBody, RequestDescriptor, ServiceVersion,
};
use crate::errors::ClientError;
use crate::managers::named_service::NamedServiceCall;
use crate::services::directory::StaticServiceDirectory;
use crate::services::locator::{find_endpoint, find_service};
use crate::services::logger::{LogLevel, Logger};
use crate::services::request_builder::build_request;
use crate::services::rest_client::{HeaderEntry, RestOptions};
use crate::services::transport::RestResponse;
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "qradar-rest",
    version,
    about = "Resolve and call QRadar named service endpoints"
)]
pub struct Cli {
    /// error, warn, info or debug
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build the request for an endpoint from a saved service directory, without sending it
    Resolve {
        /// JSON file holding the named service directory
        #[arg(long)]
        services: PathBuf,
        #[command(flatten)]
        target: EndpointArgs,
    },
    /// Call a named service endpoint on the configured console
    Call {
        #[command(flatten)]
        target: EndpointArgs,
        #[command(flatten)]
        exec: ExecArgs,
    },
    /// Send a request to a console path
    Rest {
        #[arg(long, default_value = "GET")]
        method: String,
        #[arg(long)]
        path: String,
        /// Raw request body, sent as-is
        #[arg(long)]
        body: Option<String>,
        #[arg(long)]
        content_type: Option<String>,
        #[command(flatten)]
        exec: ExecArgs,
    },
    /// Show the user the configured session belongs to
    CurrentUser,
}

#[derive(Debug, Args)]
struct EndpointArgs {
    #[arg(long)]
    service: String,
    #[arg(long = "service-version")]
    service_version: String,
    #[arg(long)]
    endpoint: String,
    /// Parameter value, repeatable
    #[arg(long = "param", value_name = "NAME=VALUE")]
    params: Vec<String>,
    /// Parameter values as a query string, e.g. 'a=1&b=2'
    #[arg(long = "params", value_name = "QUERY")]
    params_query: Option<String>,
    /// Raw JSON body; replaces BODY parameters
    #[arg(long)]
    body: Option<String>,
}

#[derive(Debug, Args)]
struct ExecArgs {
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Extra request header, repeatable
    #[arg(long = "header", value_name = "NAME:VALUE")]
    headers: Vec<String>,
    /// Send synchronously, without a timeout
    #[arg(long)]
    blocking: bool,
}

impl EndpointArgs {
    fn parameter_values(&self) -> Result<ParameterValues, ClientError> {
        let mut values = ParameterValues::new();
        if let Some(query) = &self.params_query {
            let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).map_err(|err| {
                ClientError::invalid_params(format!("Invalid --params value: {}", err))
            })?;
            for (name, value) in pairs {
                values.insert(name, Value::String(value));
            }
        }
        for raw in &self.params {
            let (name, value) = raw.split_once('=').ok_or_else(|| {
                ClientError::invalid_params(format!("--param expects NAME=VALUE, got {}", raw))
            })?;
            values.insert(name.to_string(), Value::String(value.to_string()));
        }
        Ok(values)
    }

    fn body_value(&self) -> Result<Option<Value>, ClientError> {
        self.body
            .as_deref()
            .map(serde_json::from_str::<Value>)
            .transpose()
            .map_err(ClientError::from)
    }

    fn version(&self) -> ServiceVersion {
        ServiceVersion::from(self.service_version.as_str())
    }
}

impl ExecArgs {
    fn options(&self) -> RestOptions {
        let mut options = RestOptions {
            asynchronous: !self.blocking,
            timeout_ms: self.timeout_ms,
            ..RestOptions::default()
        };
        for raw in &self.headers {
            let (name, value) = raw.split_once(':').unwrap_or((raw.as_str(), ""));
            let name = name.trim();
            options.headers.push(HeaderEntry {
                name: (!name.is_empty()).then(|| name.to_string()),
                value: value.trim().to_string(),
            });
        }
        options
    }
}

fn print_json(value: &Value) -> Result<(), ClientError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn response_to_value(response: &RestResponse) -> Value {
    let body = serde_json::from_str::<Value>(&response.body)
        .unwrap_or_else(|_| Value::String(response.body.clone()));
    serde_json::json!({
        "status": response.status,
        "statusText": response.status_text,
        "success": response.is_success(),
        "body": body,
    })
}

pub async fn run() -> Result<(), ClientError> {
    let cli = Cli::parse();
    let mut logger = Logger::new("qradar-rest");
    if let Some(raw) = &cli.log_level {
        let level = LogLevel::parse(raw)
            .ok_or_else(|| ClientError::invalid_params(format!("Unknown log level {}", raw)))?;
        logger = logger.with_level(level);
    }

    match cli.command {
        Command::Resolve { services, target } => {
            let directory = StaticServiceDirectory::from_file(&services)?;
            for entry in directory.skipped() {
                logger.warn(
                    "Skipping malformed named service entry",
                    Some(&serde_json::json!({"index": entry.index, "reason": entry.reason})),
                );
            }
            let service = find_service(directory.services(), &target.service, &target.version())?;
            let endpoint = find_endpoint(service, &target.endpoint)?;
            let values = target.parameter_values()?;
            let body = target.body_value()?;
            let built = build_request(endpoint, Some(&values), body.as_ref())?;
            print_json(&serde_json::json!({
                "request": built.request,
                "warnings": built.warnings,
            }))
        }
        Command::Call { target, exec } => {
            let app = App::from_env_with_logger(logger)?;
            let mut call = NamedServiceCall::new(
                target.service.clone(),
                target.version(),
                target.endpoint.clone(),
            )
            .with_options(exec.options());
            call.parameters = target.parameter_values()?;
            call.body = target.body_value()?;
            let response = app.named_services.call(&call).await?;
            print_json(&response_to_value(&response))
        }
        Command::Rest {
            method,
            path,
            body,
            content_type,
            exec,
        } => {
            let app = App::from_env_with_logger(logger)?;
            let request = RequestDescriptor {
                http_method: HttpMethod::from(method.to_uppercase()),
                path,
                body: body.map(RequestBody::Text),
                content_type,
            };
            let response = app.rest.rest(&request, &exec.options()).await?;
            print_json(&response_to_value(&response))
        }
        Command::CurrentUser => {
            let app = App::from_env_with_logger(logger)?;
            let user = app.named_services.current_user().await?;
            print_json(&user.unwrap_or(Value::Null))
        }
    }
}
