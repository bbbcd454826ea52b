//! Reference data for the location selectors.
//!
//! Countries come from one fire-and-forget fetch at startup; provinces are
//! the fixed list in [`crate::model::Province`].

mod countries;

pub use countries::{
    COUNTRIES_URL, DEFAULT_COUNTRY, FetchError, fetch_countries, parse_countries,
    spawn_country_fetch,
};
