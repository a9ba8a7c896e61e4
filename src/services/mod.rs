/// Business logic services layer
mod feed;

pub use feed::{ApodFeed, Clock, FeedReceiver, FeedUpdate, Ticket};

use crate::clients::ApodClient;
use crate::domain::{Apod, ApodPayload, FilterState, ResultShape, RANGE_DAYS};
use crate::errors::FetchResult;
use crate::utils::{format_query_date, last_days};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::warn;

pub const DATE_PARAM: &str = "date";
pub const START_DATE_PARAM: &str = "start_date";
pub const END_DATE_PARAM: &str = "end_date";

/// Query parameters for a filter, evaluated against the caller's `today`
pub fn params_for(filter: &FilterState, today: NaiveDate) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();

    match filter {
        FilterState::SingleDate(date) => {
            params.insert(DATE_PARAM.to_string(), format_query_date(*date));
        }
        FilterState::DateRange => {
            let days = last_days(today, RANGE_DAYS);
            if let (Some(end), Some(start)) = (days.first(), days.last()) {
                params.insert(START_DATE_PARAM.to_string(), format_query_date(*start));
                params.insert(END_DATE_PARAM.to_string(), format_query_date(*end));
            }
        }
    }

    params
}

/// Ranged queries come back as arrays, single-date queries as one object
pub fn result_shape_for(filter: &FilterState) -> ResultShape {
    match filter {
        FilterState::DateRange => ResultShape::List,
        FilterState::SingleDate(_) => ResultShape::Single,
    }
}

/// Flatten a decoded payload into display order.
///
/// Non-200 and undecodable bodies become an empty list; only escalated
/// failures reach the caller as errors.
pub fn normalize(raw: FetchResult<ApodPayload>) -> FetchResult<Vec<Apod>> {
    match raw {
        Ok(ApodPayload::Single(apod)) => Ok(vec![apod]),
        Ok(ApodPayload::List(items)) => Ok(items),
        Err(e) if e.is_escalated() => Err(e),
        Err(e) => {
            warn!("APOD result treated as empty ({}): {}", e.code(), e);
            Ok(Vec::new())
        }
    }
}

/// APOD loading service
pub struct ApodService {
    client: ApodClient,
}

impl ApodService {
    pub fn new(client: ApodClient) -> Self {
        Self { client }
    }

    /// Resolve, fetch and normalize one filter selection
    pub async fn load(&self, filter: &FilterState, today: NaiveDate) -> FetchResult<Vec<Apod>> {
        let params = params_for(filter, today);
        let shape = result_shape_for(filter);
        let raw = self.client.fetch_shape(shape, &params).await;
        normalize(raw)
    }
}
