//! src/retrieve/http.rs
//!
//! Transport seam for the API clients: a `Transport` trait that turns one
//! `HttpRequest` into one `RawResponse`, and `HttpTransport`, its reqwest
//! implementation. One attempt per call, no retries; status interpretation is
//! left to the caller.
use crate::core::error::HcError;
use crate::debug;
use crate::loggers::Logger;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Method, Url};
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// A fully built request: method, URL including its query string, headers.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
}

impl HttpRequest {
    /// GET request carrying the JSON `Content-Type`/`Accept` pair.
    pub fn json_get(url: Url) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Self {
            method: Method::GET,
            url,
            headers,
        }
    }

    /// Value of query parameter `key`, if present.
    pub fn query_value(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }
}

/// Status and undecoded body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Sends one request and hands back the raw response.
///
/// Implementations must not retry and must not interpret the status code.
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<RawResponse, HcError>> + Send;
}

/// TransportOptions
///
/// Knobs for `HttpTransport`. Defaults keep reqwest's own timeout behavior.
#[derive(Debug, Clone)]
pub struct TransportOptions {
    /// Overall request timeout; `None` keeps the client default.
    pub timeout: Option<Duration>,

    /// `User-Agent` header. The service answers 401 when it is empty.
    pub user_agent: String,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// HttpTransport
///
/// reqwest-backed `Transport`.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    logger: Logger,
    opts: TransportOptions,
}

impl HttpTransport {
    pub fn new(logger: Logger) -> Self {
        Self::new_with_opts(logger, None)
    }

    pub fn new_with_opts(logger: Logger, opts: Option<TransportOptions>) -> Self {
        let opts = opts.unwrap_or_default();
        let mut builder = Client::builder();
        if let Some(timeout) = opts.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|_| Client::new());

        Self {
            client,
            logger,
            opts,
        }
    }

    pub fn options(&self) -> &TransportOptions {
        &self.opts
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse, HcError> {
        let HttpRequest {
            method,
            url,
            mut headers,
        } = request;

        if !headers.contains_key(USER_AGENT) {
            if let Ok(ua) = HeaderValue::from_str(&self.opts.user_agent) {
                headers.insert(USER_AGENT, ua);
            }
        }

        let resp = self
            .client
            .request(method, url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| HcError::HttpError(e.to_string()))?;

        let status = resp.status().as_u16();
        // Read body once; the dispatcher needs it for both success and errors.
        let body = resp
            .text()
            .await
            .map_err(|e| HcError::HttpError(format!("Body read: {}", e)))?;

        debug!(self.logger, "Response received", "status" => status, "bytes" => body.len());

        Ok(RawResponse { status, body })
    }
}
