//! # Hotel Search
//!
//! Rates and availability for hotels matching a destination, or the full
//! details of one hotel. Every call belongs to a search session identified by
//! `sessionID` and is paged and sorted through a [`HotelQuery`].

use crate::configs::ClientConfig;
use crate::core::error::HcError;
use crate::loggers::Logger;
use crate::retrieve::http::{HttpTransport, Transport};
use crate::search::base::{BaseApi, EndpointKind};
use crate::search::pagination::{HotelQuery, build_query};
use crate::search::params::Params;
use serde_json::Value;
use std::fmt;

pub const DESTINATION_PATH: &str = "hotels";
pub const BASIC_DESTINATION_PATH: &str = "hotels/basic";
pub const DESTINATION_SUMMARY_PATH: &str = "hotels/summary";
pub const SINGLE_HOTEL_PATH: &str = "hotel";

/// Client for the `hotels`, `hotels/basic`, `hotels/summary` and `hotel` paths.
pub struct HotelSearch<T: Transport = HttpTransport> {
    base: BaseApi<T>,
}

impl HotelSearch<HttpTransport> {
    /// Creates a hotel search client over HTTP.
    ///
    /// # Arguments
    /// * `config` - API key, version, sandbox switch and page numbering.
    /// * `logger` - A [`Logger`] instance used for reporting request status and errors.
    pub fn new(config: ClientConfig, logger: Logger) -> Self {
        Self {
            base: BaseApi::new(config, logger, EndpointKind::Versioned),
        }
    }
}

impl<T: Transport> HotelSearch<T> {
    /// Creates a hotel search client over a custom [`Transport`].
    ///
    /// # Arguments
    /// * `config` - API key, version, sandbox switch and page numbering.
    /// * `logger` - A [`Logger`] instance used for reporting request status and errors.
    /// * `transport` - Sends each request; see [`HttpTransport`] for the default.
    pub fn with_transport(config: ClientConfig, logger: Logger, transport: T) -> Self {
        Self {
            base: BaseApi::with_transport(config, logger, EndpointKind::Versioned, transport),
        }
    }

    /// Underlying dispatcher, e.g. to change the token between calls.
    pub fn base(&self) -> &BaseApi<T> {
        &self.base
    }

    /// Summary details and rates for hotels within a place.
    ///
    /// `destination` is a place id such as `place:Istanbul`.
    pub async fn destination_search(
        &self,
        destination: &str,
        session_id: &str,
        query: &HotelQuery,
    ) -> Result<Value, HcError> {
        self.send(DESTINATION_PATH, "destination", destination, session_id, query)
            .await
    }

    /// Very basic summary details and rates for hotels within a place.
    pub async fn basic_destination_search(
        &self,
        destination: &str,
        session_id: &str,
        query: &HotelQuery,
    ) -> Result<Value, HcError> {
        self.send(BASIC_DESTINATION_PATH, "destination", destination, session_id, query)
            .await
    }

    /// Metadata of a destination search (counts, currency, language) without
    /// hotels or rates. Cheap enough to call on every filter change.
    pub async fn destination_search_summary(
        &self,
        destination: &str,
        session_id: &str,
        query: &HotelQuery,
    ) -> Result<Value, HcError> {
        self.send(DESTINATION_SUMMARY_PATH, "destination", destination, session_id, query)
            .await
    }

    /// Full details and all available rates for one hotel, e.g.
    /// `hotel:Hotel_Sapphire_Istanbul`.
    pub async fn single_search(&self, hotel: &str, session_id: &str, query: &HotelQuery) -> Result<Value, HcError> {
        self.send(SINGLE_HOTEL_PATH, "hotel", hotel, session_id, query)
            .await
    }

    async fn send(
        &self,
        path: &str,
        target_key: &str,
        target: &str,
        session_id: &str,
        query: &HotelQuery,
    ) -> Result<Value, HcError> {
        let mut params = Params::new();
        params.insert(target_key.to_string(), Value::from(target));
        params.insert("sessionID".to_string(), Value::from(session_id));
        let params = build_query(params, query, self.base.config().page_index_base);
        self.base.perform_request(path, params).await
    }
}

impl<T: Transport> fmt::Display for HotelSearch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<HotelSearch: {}>", self.base.token())
    }
}
