// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Conversion of date inputs into instants.
//!
//! Every bound of a period is a `DateTime<Utc>`. Strings are read as RFC 3339 first; a bare date (`2023-01-01`) is midnight UTC and a date-time without offset (`2023-01-01T08:30:00`) is read as UTC as well.

use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::debug;

const NAIVE_DATE_TIME_FORMATS: [&str; 6] = [
  "%Y-%m-%dT%H:%M:%S%.f",
  "%Y-%m-%d %H:%M:%S%.f",
  "%Y-%m-%dT%H:%M:%S",
  "%Y-%m-%d %H:%M:%S",
  "%Y-%m-%dT%H:%M",
  "%Y-%m-%d %H:%M"
];

pub trait ToInstant {
  fn to_instant(self) -> Result<DateTime<Utc>>;
}

impl ToInstant for DateTime<Utc> {
  fn to_instant(self) -> Result<DateTime<Utc>> { Ok(self) }
}

impl<'a> ToInstant for &'a DateTime<Utc> {
  fn to_instant(self) -> Result<DateTime<Utc>> { Ok(*self) }
}

impl ToInstant for DateTime<FixedOffset> {
  fn to_instant(self) -> Result<DateTime<Utc>> {
    Ok(self.with_timezone(&Utc))
  }
}

impl ToInstant for NaiveDateTime {
  fn to_instant(self) -> Result<DateTime<Utc>> {
    Ok(Utc.from_utc_datetime(&self))
  }
}

impl ToInstant for NaiveDate {
  fn to_instant(self) -> Result<DateTime<Utc>> {
    self.and_hms_opt(0, 0, 0)
      .ok_or(Error::OutOfRange)
      .and_then(ToInstant::to_instant)
  }
}

/// Milliseconds since the Unix epoch.
impl ToInstant for i64 {
  fn to_instant(self) -> Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(self).single().ok_or(Error::OutOfRange)
  }
}

impl<'a> ToInstant for &'a str {
  fn to_instant(self) -> Result<DateTime<Utc>> {
    parse_instant(self)
  }
}

impl<'a> ToInstant for &'a String {
  fn to_instant(self) -> Result<DateTime<Utc>> {
    parse_instant(self)
  }
}

impl ToInstant for String {
  fn to_instant(self) -> Result<DateTime<Utc>> {
    parse_instant(&self)
  }
}

fn parse_instant(input: &str) -> Result<DateTime<Utc>> {
  let input = input.trim();
  if let Ok(date) = DateTime::parse_from_rfc3339(input) {
    return date.to_instant();
  }
  for format in NAIVE_DATE_TIME_FORMATS.iter() {
    if let Ok(date) = NaiveDateTime::parse_from_str(input, format) {
      return date.to_instant();
    }
  }
  if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
    return date.to_instant();
  }
  debug!(input, "unparseable date");
  Err(Error::InvalidDate(input.to_string()))
}
