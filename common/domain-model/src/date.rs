use anyhow::{anyhow, Result};
use chrono::{DateTime, TimeZone, Utc};

/// Format of every human readable date on the API, f.e. `2023-05-01 00:00:00+00:00`.
pub const API_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

pub fn parse_api_date(input: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_str(input, API_DATE_FORMAT)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|err| anyhow!("Invalid api date '{input}': {err}"))
}

pub fn format_api_date(date: &DateTime<Utc>) -> String {
    date.format(API_DATE_FORMAT).to_string()
}

pub fn millis_to_datetime(millis: i64) -> Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| anyhow!("Timestamp out of range: {millis}"))
}
