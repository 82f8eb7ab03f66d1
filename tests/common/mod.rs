//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use hotelscombined::HcError;
use hotelscombined::configs::{ClientConfig, Endpoints};
use hotelscombined::loggers::{LogSink, Logger, LoggerBuilder};
use hotelscombined::retrieve::http::{HttpRequest, RawResponse, Transport};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Logger that swallows output. Needs a tokio runtime.
pub fn test_logger() -> Logger {
    LoggerBuilder::new("hotelscombined-test")
        .with_sink(LogSink::Discard)
        .build()
        .expect("Failed to build test logger")
}

/// Config whose roots all point at a mock server.
pub fn mock_config(uri: &str, token: &str) -> ClientConfig {
    ClientConfig::new(token).with_endpoints(Endpoints {
        live: format!("{}/api/", uri),
        sandbox: format!("{}/sandbox/api/", uri),
        autocomplete: format!("{}/", uri),
    })
}

/// Transport that records every request and answers with a canned response.
#[derive(Clone)]
pub struct RecordingTransport {
    pub requests: Arc<Mutex<Vec<HttpRequest>>>,
    response: RawResponse,
}

impl RecordingTransport {
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            response: RawResponse {
                status,
                body: body.to_string(),
            },
        }
    }

    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl Transport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse, HcError> {
        self.requests.lock().unwrap().push(request);
        Ok(self.response.clone())
    }
}

/// Query string of `request` as a map (last value wins).
pub fn query_map(request: &HttpRequest) -> HashMap<String, String> {
    request
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// URL of `request` without its query string.
pub fn url_without_query(request: &HttpRequest) -> String {
    let mut url = request.url.clone();
    url.set_query(None);
    url.to_string()
}
