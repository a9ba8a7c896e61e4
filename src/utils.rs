/// Date helpers shared by the resolver and display code
use chrono::{Days, NaiveDate};

/// Wire format used in query parameters and in the `date` field
pub const QUERY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Human readable format, e.g. "Dec 3, 2021"
pub const DISPLAY_DATE_FORMAT: &str = "%b %-d, %Y";

/// Shown whenever a date string cannot be parsed
pub const UNKNOWN_DATE: &str = "Unknown date";

/// Format a calendar date as `YYYY-MM-DD`
pub fn format_query_date(date: NaiveDate) -> String {
    date.format(QUERY_DATE_FORMAT).to_string()
}

/// Parse a strict `YYYY-MM-DD` string, `None` on any mismatch
pub fn parse_query_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    if !bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
    {
        return None;
    }
    NaiveDate::parse_from_str(s, QUERY_DATE_FORMAT).ok()
}

/// Format a calendar date as `MMM d, yyyy`
pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Display text for a wire date string, degrading to [`UNKNOWN_DATE`]
pub fn display_date_or_unknown(s: &str) -> String {
    parse_query_date(s)
        .map(format_display_date)
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}

/// `n` consecutive days ending at `end`, newest first.
///
/// The window stops at `NaiveDate::MIN`, so it holds fewer than `n` days
/// only when `end` is within `n - 1` days of the minimum date.
pub fn last_days(end: NaiveDate, n: u64) -> Vec<NaiveDate> {
    let days: Vec<NaiveDate> = (0..n)
        .map_while(|offset| end.checked_sub_days(Days::new(offset)))
        .collect();
    debug_assert!(
        days.len() as u64 == n || days.last() == Some(&NaiveDate::MIN),
        "window shortened away from the calendar minimum"
    );
    days
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_query_date_pads() {
        assert_eq!(format_query_date(ymd(2021, 1, 5)), "2021-01-05");
    }

    #[test]
    fn test_query_round_trip() {
        let mut date = ymd(1995, 6, 16);
        let end = ymd(2030, 12, 31);
        while date <= end {
            assert_eq!(parse_query_date(&format_query_date(date)), Some(date));
            date = date + Days::new(97);
        }
        let leap = ymd(2024, 2, 29);
        assert_eq!(parse_query_date(&format_query_date(leap)), Some(leap));
    }

    #[test]
    fn test_parse_query_date_rejects_other_shapes() {
        assert_eq!(parse_query_date("not-a-date"), None);
        assert_eq!(parse_query_date("2021-1-5"), None);
        assert_eq!(parse_query_date("2021/12/01"), None);
        assert_eq!(parse_query_date("2021-02-30"), None);
        assert_eq!(parse_query_date("+202-12-01"), None);
        assert_eq!(parse_query_date(""), None);
    }

    #[test]
    fn test_format_display_date() {
        assert_eq!(format_display_date(ymd(2021, 12, 3)), "Dec 3, 2021");
        assert_eq!(format_display_date(ymd(2021, 12, 23)), "Dec 23, 2021");
    }

    #[test]
    fn test_display_date_or_unknown() {
        assert_eq!(display_date_or_unknown("2021-12-01"), "Dec 1, 2021");
        assert_eq!(display_date_or_unknown("not-a-date"), UNKNOWN_DATE);
    }

    #[test]
    fn test_last_days_newest_first() {
        let days = last_days(ymd(2021, 3, 2), 7);
        assert_eq!(days.len(), 7);
        assert_eq!(days.first(), Some(&ymd(2021, 3, 2)));
        assert_eq!(days[1], ymd(2021, 3, 1));
        assert_eq!(days[2], ymd(2021, 2, 28));
        assert_eq!(days.last(), Some(&ymd(2021, 2, 24)));
    }

    #[test]
    fn test_last_days_stops_at_calendar_minimum() {
        let end = NaiveDate::MIN + Days::new(2);
        let days = last_days(end, 7);
        assert_eq!(days, vec![end, NaiveDate::MIN + Days::new(1), NaiveDate::MIN]);
    }
}
