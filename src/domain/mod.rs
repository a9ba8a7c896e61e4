/// Domain models for the application
use crate::utils::{display_date_or_unknown, format_display_date, parse_query_date};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Astronomy Picture of the Day record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Apod {
    pub date: String,
    pub title: String,
    pub explanation: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,
    pub media_type: String,
    pub service_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

impl Apod {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_query_date(&self.date)
    }

    /// `MMM d, yyyy`, or "Unknown date" when `date` is malformed
    pub fn display_date(&self) -> String {
        display_date_or_unknown(&self.date)
    }

    pub fn is_image(&self) -> bool {
        self.media_type == "image"
    }

    pub fn best_image_url(&self) -> &str {
        self.hdurl.as_deref().unwrap_or(&self.url)
    }
}

/// The caller's current query mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterState {
    /// Trailing window of [`RANGE_DAYS`] days ending today
    #[default]
    DateRange,
    SingleDate(NaiveDate),
}

/// Length of the default window, not configurable
pub const RANGE_DAYS: u64 = 7;

pub const RANGE_TITLE: &str = "Last 7 days";

impl FilterState {
    /// Title shown above the list for this filter
    pub fn header_title(&self) -> String {
        match self {
            FilterState::DateRange => RANGE_TITLE.to_string(),
            FilterState::SingleDate(date) => format_display_date(*date),
        }
    }
}

/// Wire shape expected for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    List,
    Single,
}

/// Decoded upstream body, tagged by the shape it was decoded as
#[derive(Debug, Clone, PartialEq)]
pub enum ApodPayload {
    Single(Apod),
    List(Vec<Apod>),
}
