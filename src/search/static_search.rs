//! # Static Search
//!
//! Finds places and hotels without dates, like the site's universal search.

use crate::configs::ClientConfig;
use crate::core::error::HcError;
use crate::loggers::Logger;
use crate::retrieve::http::{HttpTransport, Transport};
use crate::search::base::{BaseApi, EndpointKind};
use crate::search::params::{Params, apply_policy};
use serde_json::Value;
use std::fmt;

pub const SEARCH_PATH: &str = "search/full";

/// Client for `search/full`.
pub struct StaticSearch<T: Transport = HttpTransport> {
    base: BaseApi<T>,
}

impl StaticSearch<HttpTransport> {
    /// Creates a static search client over HTTP.
    ///
    /// # Arguments
    /// * `config` - API key, version, sandbox switch and normalize policy.
    /// * `logger` - A [`Logger`] instance used for reporting request status and errors.
    pub fn new(config: ClientConfig, logger: Logger) -> Self {
        Self {
            base: BaseApi::new(config, logger, EndpointKind::Versioned),
        }
    }
}

impl<T: Transport> StaticSearch<T> {
    /// Same as [`StaticSearch::new`] but sends through `transport`.
    pub fn with_transport(config: ClientConfig, logger: Logger, transport: T) -> Self {
        Self {
            base: BaseApi::with_transport(config, logger, EndpointKind::Versioned, transport),
        }
    }

    /// Underlying dispatcher.
    pub fn base(&self) -> &BaseApi<T> {
        &self.base
    }

    /// Places and hotels matching `query`.
    pub async fn search(&self, query: &str) -> Result<Value, HcError> {
        self.search_with(query, Params::new()).await
    }

    /// Universal search with optional parameters, cased per the configured policy.
    pub async fn search_with(&self, query: &str, extra: Params) -> Result<Value, HcError> {
        let mut params = Params::new();
        params.insert("query".to_string(), Value::from(query));
        params.extend(apply_policy(extra, self.base.config().normalize_policy));
        self.base.perform_request(SEARCH_PATH, params).await
    }
}

impl<T: Transport> fmt::Display for StaticSearch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<StaticSearch: {}>", self.base.token())
    }
}
