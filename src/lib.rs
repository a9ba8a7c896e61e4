//! Data-fetching core for the Astronomy Picture of the Day feed.
//!
//! A typed client signs and issues requests against the APOD endpoint, the
//! resolver in [`services`] turns a [`domain::FilterState`] into query
//! parameters and a result shape, and [`services::ApodFeed`] delivers the
//! outcome of the most recent filter call to the caller.
pub mod clients;
pub mod config;
pub mod domain;
pub mod errors;
pub mod services;
pub mod utils;

#[cfg(test)]
mod testing;

pub use clients::ApodClient;
pub use config::{AppConfig, Credential};
pub use domain::{Apod, ApodPayload, FilterState, ResultShape};
pub use errors::{FetchError, FetchResult};
pub use services::{ApodFeed, ApodService, FeedReceiver, FeedUpdate, Ticket};
