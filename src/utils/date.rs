use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Persisted date layout, e.g. `15-03-2024`.
pub const DISPLAY_FORMAT: &str = "%d-%m-%Y";

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parses the date shapes browsers and API clients send. A timezone offset,
/// if present, is ignored: the calendar date as written is kept.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
                .map(|datetime| datetime.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(input).ok().map(|datetime| datetime.date_naive()))
}

pub fn normalize_date(input: &str) -> Option<String> {
    parse_date(input).map(|date| date.format(DISPLAY_FORMAT).to_string())
}
