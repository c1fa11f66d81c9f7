//! Parsing and rendering of the calendar strings used by stored records.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::Serializer;

use crate::{Error, Result};

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
    .map_err(|_| Error::InvalidDate(raw.to_owned()))
}

/// Accepts `HH:MM` and `HH:MM:SS`.
pub(crate) fn parse_time(raw: &str) -> Result<NaiveTime> {
  let trimmed = raw.trim();
  NaiveTime::parse_from_str(trimmed, "%H:%M")
    .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
    .map_err(|_| Error::InvalidTime(raw.to_owned()))
}

/// Renders `HH:MM`, or `HH:MM:SS` when the seconds are significant.
pub(crate) fn format_time(time: &NaiveTime) -> String {
  if time.second() == 0 {
    time.format("%H:%M").to_string()
  } else {
    time.format("%H:%M:%S").to_string()
  }
}

pub(crate) fn serialize_time<S>(
  time: &NaiveTime,
  serializer: S,
) -> Result<S::Ok, S::Error>
where
  S: Serializer,
{
  serializer.serialize_str(&format_time(time))
}
