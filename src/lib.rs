//! Async client for the HotelsCombined hotel search API.
//!
//! Three clients cover the service: [`AutocompleteSearch`] for place-name
//! suggestions, [`StaticSearch`] for date-less universal search and
//! [`HotelSearch`] for destination and single-hotel searches.

pub mod core;
pub mod configs;
pub mod loggers;
pub mod retrieve;
pub mod search;

pub use configs::{ClientConfig, NormalizePolicy, PageIndexBase};
pub use core::error::HcError;
pub use search::{AutocompleteSearch, HotelQuery, HotelSearch, Params, StaticSearch};

#[doc(hidden)]
pub mod __private {
    pub use chrono;
    pub use serde_json;
}
