//! # Request Dispatcher
//!
//! `BaseApi` is shared by every search client. It owns the configuration,
//! selects the endpoint root, signs each request with the API key, sends it
//! through a [`Transport`] and maps documented failure statuses to
//! [`HcError`].

use crate::configs::ClientConfig;
use crate::core::error::HcError;
use crate::loggers::Logger;
use crate::retrieve::http::{HttpRequest, HttpTransport, Transport};
use crate::search::params::{Params, append_query};
use crate::{error, info, warn};
use arc_swap::ArcSwap;
use reqwest::{Method, Url};
use serde_json::Value;
use std::sync::Arc;

/// Query key carrying the API token.
pub const API_KEY_PARAM: &str = "apiKey";

/// Where a client's requests are rooted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    /// Live or sandbox root joined with the API version.
    Versioned,
    /// The autocomplete root, independent of `debug` and `version`.
    Autocomplete,
}

/// Shared request machinery behind every search client.
///
/// Holds the configuration in an `ArcSwap` so clones see token and debug
/// changes made through any of them.
pub struct BaseApi<T: Transport = HttpTransport> {
    config: Arc<ArcSwap<ClientConfig>>,
    logger: Logger,
    transport: T,
    kind: EndpointKind,
}

impl<T: Transport + Clone> Clone for BaseApi<T> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            logger: self.logger.clone(),
            transport: self.transport.clone(),
            kind: self.kind,
        }
    }
}

impl BaseApi<HttpTransport> {
    /// Creates a dispatcher backed by the reqwest [`HttpTransport`].
    ///
    /// # Arguments
    /// * `config` - API key, version, sandbox switch and wire policies.
    /// * `logger` - A [`Logger`] used for request and error telemetry.
    /// * `kind` - Which endpoint root requests are built on.
    pub fn new(config: ClientConfig, logger: Logger, kind: EndpointKind) -> Self {
        let transport = HttpTransport::new(logger.clone());
        Self::with_transport(config, logger, kind, transport)
    }
}

impl<T: Transport> BaseApi<T> {
    /// Creates a dispatcher that sends through a caller-supplied transport.
    ///
    /// # Arguments
    /// * `config` - API key, version, sandbox switch and wire policies.
    /// * `logger` - A [`Logger`] used for request and error telemetry.
    /// * `kind` - Which endpoint root requests are built on.
    /// * `transport` - Any [`Transport`], e.g. a stub that records requests.
    pub fn with_transport(config: ClientConfig, logger: Logger, kind: EndpointKind, transport: T) -> Self {
        Self {
            config: Arc::new(ArcSwap::from_pointee(config)),
            logger,
            transport,
            kind,
        }
    }

    /// Snapshot of the current configuration.
    pub fn config(&self) -> Arc<ClientConfig> {
        self.config.load_full()
    }

    /// Current API key.
    pub fn token(&self) -> String {
        self.config.load().token.clone()
    }

    /// API version joined onto the live or sandbox root.
    pub fn version(&self) -> String {
        self.config.load().version.clone()
    }

    /// True when requests go to the sandbox root.
    pub fn debug(&self) -> bool {
        self.config.load().debug
    }

    /// Replaces the API token for subsequent calls.
    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        self.config.rcu(|cfg| ClientConfig {
            token: token.clone(),
            ..ClientConfig::clone(cfg)
        });
    }

    /// Switches between the sandbox and live roots for subsequent calls.
    pub fn set_debug(&self, debug: bool) {
        self.config.rcu(|cfg| ClientConfig {
            debug,
            ..ClientConfig::clone(cfg)
        });
    }

    /// Logger shared with the transport.
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// The transport every request goes through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Endpoint root for this client, without a trailing slash.
    ///
    /// Versioned roots are joined like URL path segments, so
    /// `https://hotelscombined.com/api/` + `1.0` gives
    /// `https://hotelscombined.com/api/1.0`.
    pub fn api_endpoint(&self) -> Result<String, HcError> {
        endpoint_for(&self.config.load(), self.kind)
    }

    /// GET `path` with `params`. See [`BaseApi::request`].
    pub async fn perform_request(&self, path: &str, params: Params) -> Result<Value, HcError> {
        self.request(Method::GET, path, params).await
    }

    /// Sends one request to `path` below the endpoint root.
    ///
    /// The payload starts as `{apiKey: token}` and `params` is laid over it.
    /// Fails with [`HcError::AuthError`] before any I/O when the token is
    /// empty. Statuses listed in the error table fail; any other status has
    /// its body decoded as JSON and returned unchanged.
    pub async fn request(&self, method: Method, path: &str, params: Params) -> Result<Value, HcError> {
        let config = self.config.load_full();

        if config.token.is_empty() {
            error!(self.logger, "No token provided", "path" => path);
            return Err(HcError::AuthError {
                message: "No token provided. Please use a valid token".to_string(),
                errors: None,
                status: None,
            });
        }

        let mut payload = Params::new();
        payload.insert(API_KEY_PARAM.to_string(), Value::String(config.token.clone()));
        payload.extend(params);

        let mut url = request_url(&config, self.kind, path)?;
        append_query(&mut url, &payload);
        let endpoint_path = url.path().to_string();

        let mut request = HttpRequest::json_get(url);
        request.method = method;

        info!(
            self.logger,
            "Request start",
            "method" => request.method.as_str(),
            "path" => &endpoint_path,
            "debug" => config.debug
        );

        let resp = match self.transport.send(request).await {
            Ok(resp) => resp,
            Err(e) => {
                error!(self.logger, "Transport failure", "path" => &endpoint_path, "error" => e.to_string());
                return Err(e);
            }
        };

        if let Some(err) = HcError::from_status(resp.status, &resp.body) {
            warn!(
                self.logger,
                "HotelsCombined API rejected request",
                "path" => &endpoint_path,
                "status" => resp.status,
                "error" => err.to_string()
            );
            return Err(err);
        }

        serde_json::from_str::<Value>(&resp.body).map_err(|e| {
            error!(
                self.logger,
                "Non-JSON response body",
                "path" => &endpoint_path,
                "status" => resp.status
            );
            HcError::QueryError {
                message: format!("Response body is not valid JSON: {}", e),
                errors: Some(resp.body.clone()),
                status: Some(resp.status),
            }
        })
    }
}

fn endpoint_for(config: &ClientConfig, kind: EndpointKind) -> Result<String, HcError> {
    match kind {
        EndpointKind::Autocomplete => {
            let root = parse_root(&config.endpoints.autocomplete)?;
            Ok(root.as_str().trim_end_matches('/').to_string())
        }
        EndpointKind::Versioned => {
            let root = if config.debug {
                &config.endpoints.sandbox
            } else {
                &config.endpoints.live
            };
            let joined = parse_root(root)?
                .join(&config.version)
                .map_err(|e| HcError::ConfigError(format!("Invalid API version '{}': {}", config.version, e)))?;
            Ok(joined.as_str().trim_end_matches('/').to_string())
        }
    }
}

// A root without a trailing slash would lose its last segment on join.
fn parse_root(root: &str) -> Result<Url, HcError> {
    let normalized = if root.ends_with('/') {
        root.to_string()
    } else {
        format!("{}/", root)
    };
    Url::parse(&normalized).map_err(|e| HcError::ConfigError(format!("Invalid endpoint root '{}': {}", root, e)))
}

fn request_url(config: &ClientConfig, kind: EndpointKind, path: &str) -> Result<Url, HcError> {
    let endpoint = endpoint_for(config, kind)?;
    let full = format!("{}/{}", endpoint, path.trim_start_matches('/'));
    Url::parse(&full).map_err(|e| HcError::ConfigError(format!("Invalid request URL '{}': {}", full, e)))
}
