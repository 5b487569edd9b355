use std::str::FromStr;

use anyhow::{bail, Error, Result};
use chrono::{DateTime, NaiveDate, Utc};

use crate::date::millis_to_datetime;

/// Window over historical data, written as `start-stop` where either side may be omitted.
/// Each side is `YYYYMMDD`, unix seconds (10 digits) or unix millis (13 digits).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Timerange {
    pub start: Option<DateTime<Utc>>,
    pub stop: Option<DateTime<Utc>>,
}

impl FromStr for Timerange {
    type Err = Error;
    fn from_str(input: &str) -> Result<Timerange, Self::Err> {
        let Some((start, stop)) = input.split_once('-') else {
            bail!("Incorrect syntax for timerange: {input}")
        };
        if start.is_empty() && stop.is_empty() {
            bail!("Incorrect syntax for timerange: {input}")
        }
        let start = parse_bound(start)?;
        let stop = parse_bound(stop)?;
        if let (Some(start), Some(stop)) = (start, stop) {
            if start > stop {
                bail!("Start date is after stop date for timerange: {input}")
            }
        }
        Ok(Timerange { start, stop })
    }
}

fn parse_bound(bound: &str) -> Result<Option<DateTime<Utc>>> {
    if bound.is_empty() {
        return Ok(None);
    }
    if !bound.chars().all(|char| char.is_ascii_digit()) {
        bail!("Incorrect timerange bound: {bound}")
    }
    let date = match bound.len() {
        8 => NaiveDate::parse_from_str(bound, "%Y%m%d")?
            .and_hms_opt(0, 0, 0)
            .map(|date| date.and_utc()),
        10 => DateTime::from_timestamp(bound.parse()?, 0),
        13 => Some(millis_to_datetime(bound.parse()?)?),
        _ => bail!("Incorrect timerange bound: {bound}")
    };
    match date {
        Some(date) => Ok(Some(date)),
        None => bail!("Incorrect timerange bound: {bound}")
    }
}
