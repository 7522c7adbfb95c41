#![allow(dead_code)]

use async_trait::async_trait;
use once_cell::sync::Lazy;
use qradar_rest::errors::ClientError;
use qradar_rest::services::transport::{PreparedRequest, RestResponse, Transport};
use qradar_rest::ServiceDescriptor;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub static ENV_LOCK: Lazy<tokio::sync::Mutex<()>> = Lazy::new(|| tokio::sync::Mutex::new(()));

/// Answers every request with a canned response and remembers what it saw.
pub struct RecordingTransport {
    pub seen: Arc<Mutex<Vec<PreparedRequest>>>,
    pub completed: Arc<Mutex<usize>>,
    responses: Mutex<Vec<RestResponse>>,
    delay: Option<Duration>,
}

impl RecordingTransport {
    pub fn new(responses: Vec<RestResponse>) -> Self {
        Self {
            seen: Arc::new(Mutex::new(Vec::new())),
            completed: Arc::new(Mutex::new(0)),
            responses: Mutex::new(responses),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<PreparedRequest> {
        self.seen.lock().expect("seen lock").clone()
    }

    pub fn completed(&self) -> usize {
        *self.completed.lock().expect("completed lock")
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, request: PreparedRequest) -> Result<RestResponse, ClientError> {
        self.seen.lock().expect("seen lock").push(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        *self.completed.lock().expect("completed lock") += 1;
        let mut responses = self.responses.lock().expect("responses lock");
        if responses.is_empty() {
            return Ok(ok_json("{}"));
        }
        Ok(responses.remove(0))
    }
}

pub fn ok_json(body: &str) -> RestResponse {
    RestResponse {
        status: 200,
        status_text: "OK".to_string(),
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: body.to_string(),
    }
}

pub fn directory_fixture() -> Vec<ServiceDescriptor> {
    serde_json::from_value(serde_json::json!([
        {
            "name": "inventory",
            "version": "1",
            "endpoints": [
                {
                    "name": "getItem",
                    "http_method": "GET",
                    "path": "/application/items/{id}",
                    "parameters": [
                        {"name": "id", "location": "PATH"},
                        {"name": "fields", "location": "QUERY"}
                    ]
                },
                {
                    "name": "createItem",
                    "http_method": "POST",
                    "path": "/application/items",
                    "parameters": [
                        {"name": "label", "location": "BODY"},
                        {"name": "owner", "location": "BODY"}
                    ]
                }
            ]
        },
        {
            "name": "inventory",
            "version": 2,
            "endpoints": [
                {
                    "name": "getItem",
                    "http_method": "GET",
                    "path": "/application/v2/items/{id}",
                    "parameters": [{"name": "id", "location": "PATH"}]
                }
            ]
        },
        {"name": "health", "version": "1.0"}
    ]))
    .expect("directory fixture")
}
