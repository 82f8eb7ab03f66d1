pub mod autocomplete;
pub mod base;
pub mod hotel;
pub mod pagination;
pub mod params;
pub mod static_search;

pub use autocomplete::AutocompleteSearch;
pub use base::BaseApi;
pub use hotel::HotelSearch;
pub use pagination::HotelQuery;
pub use params::Params;
pub use static_search::StaticSearch;
