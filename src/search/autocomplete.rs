//! # Autocomplete
//!
//! Suggests places for a partially typed name, for search-box completion.
//! Always served from the autocomplete root, whatever `debug` and `version`
//! say.

use crate::configs::{ClientConfig, NormalizePolicy};
use crate::core::error::HcError;
use crate::loggers::Logger;
use crate::retrieve::http::{HttpTransport, Transport};
use crate::search::base::{BaseApi, EndpointKind};
use crate::search::params::{Params, apply_policy};
use serde_json::Value;
use std::fmt;

pub const SUGGEST_PATH: &str = "AutoUniversal.ashx";

/// Client for `AutoUniversal.ashx`.
pub struct AutocompleteSearch<T: Transport = HttpTransport> {
    base: BaseApi<T>,
}

impl AutocompleteSearch<HttpTransport> {
    /// Creates an autocomplete client over HTTP.
    ///
    /// # Arguments
    /// * `config` - API key and normalize policy; `debug` and `version` are ignored.
    /// * `logger` - A [`Logger`] instance used for reporting request status and errors.
    pub fn new(config: ClientConfig, logger: Logger) -> Self {
        Self {
            base: BaseApi::new(config, logger, EndpointKind::Autocomplete),
        }
    }
}

impl<T: Transport> AutocompleteSearch<T> {
    /// Same as [`AutocompleteSearch::new`] but sends through `transport`.
    pub fn with_transport(config: ClientConfig, logger: Logger, transport: T) -> Self {
        Self {
            base: BaseApi::with_transport(config, logger, EndpointKind::Autocomplete, transport),
        }
    }

    /// Underlying dispatcher.
    pub fn base(&self) -> &BaseApi<T> {
        &self.base
    }

    /// Suggestions for `term`. Returns the service's array untouched.
    pub async fn suggest(&self, term: &str) -> Result<Value, HcError> {
        self.suggest_with(term, Params::new()).await
    }

    /// Like [`suggest`](Self::suggest) with optional parameters such as
    /// `limit` or `language_code`, cased per the configured policy.
    pub async fn suggest_with(&self, term: &str, extra: Params) -> Result<Value, HcError> {
        let policy = self.base.config().normalize_policy;
        let mut params = Params::new();
        params.insert(term_key(policy).to_string(), Value::from(term));
        params.extend(apply_policy(extra, policy));
        self.base.perform_request(SUGGEST_PATH, params).await
    }
}

fn term_key(policy: NormalizePolicy) -> &'static str {
    match policy {
        NormalizePolicy::CamelCase => "search",
        NormalizePolicy::Passthrough => "query",
    }
}

impl<T: Transport> fmt::Display for AutocompleteSearch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<AutocompleteSearch: {}>", self.base.token())
    }
}
