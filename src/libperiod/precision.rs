// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Granularity of a period.
//!
//! A precision sizes the adjacency tolerance between two periods and is the unit in which `Period::length` counts. Each precision has a fixed duration: months are approximated by 30 days and years by 365 days.
//!
//! ```rust
//! use period::Precision;
//! use period::precision::precision_to_milliseconds;
//!
//! assert_eq!(Precision::Week.to_milliseconds(), 604_800_000);
//! assert_eq!(precision_to_milliseconds("month").unwrap(), 2_592_000_000);
//! assert!(precision_to_milliseconds("fortnight").is_err());
//! ```

use crate::error::{Error, Result};
use chrono::Duration;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

pub const MILLIS_PER_MINUTE: i64 = 60 * 1000;
pub const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;
pub const MILLIS_PER_WEEK: i64 = 7 * MILLIS_PER_DAY;
pub const MILLIS_PER_MONTH: i64 = 30 * MILLIS_PER_DAY;
pub const MILLIS_PER_YEAR: i64 = 365 * MILLIS_PER_DAY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precision
{
  Minute,
  Hour,
  Day,
  Week,
  Month,
  Year
}

impl Precision
{
  pub const ALL: [Precision; 6] = [
    Precision::Minute, Precision::Hour, Precision::Day,
    Precision::Week, Precision::Month, Precision::Year
  ];

  pub fn to_milliseconds(self) -> i64 {
    match self {
      Precision::Minute => MILLIS_PER_MINUTE,
      Precision::Hour => MILLIS_PER_HOUR,
      Precision::Day => MILLIS_PER_DAY,
      Precision::Week => MILLIS_PER_WEEK,
      Precision::Month => MILLIS_PER_MONTH,
      Precision::Year => MILLIS_PER_YEAR
    }
  }

  pub fn to_duration(self) -> Duration {
    Duration::milliseconds(self.to_milliseconds())
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Precision::Minute => "minute",
      Precision::Hour => "hour",
      Precision::Day => "day",
      Precision::Week => "week",
      Precision::Month => "month",
      Precision::Year => "year"
    }
  }

  /// The coarser of two precisions, the one with the longest unit.
  pub fn coarsest(self, other: Precision) -> Precision {
    if self.to_milliseconds() >= other.to_milliseconds() { self }
    else { other }
  }
}

impl Default for Precision
{
  fn default() -> Precision {
    Precision::Day
  }
}

/// Milliseconds of the precision named by `tag`.
pub fn precision_to_milliseconds(tag: &str) -> Result<i64> {
  tag.parse::<Precision>().map(Precision::to_milliseconds)
}

impl FromStr for Precision
{
  type Err = Error;

  fn from_str(tag: &str) -> Result<Precision> {
    match tag {
      "minute" => Ok(Precision::Minute),
      "hour" => Ok(Precision::Hour),
      "day" => Ok(Precision::Day),
      "week" => Ok(Precision::Week),
      "month" => Ok(Precision::Month),
      "year" => Ok(Precision::Year),
      _ => Err(Error::UnsupportedPrecision(tag.to_string()))
    }
  }
}

impl Display for Precision
{
  fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
    formatter.write_str(self.as_str())
  }
}

impl Serialize for Precision
{
  fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
   where S: Serializer
  {
    serializer.serialize_str(self.as_str())
  }
}

struct PrecisionVisitor;

impl<'de> Visitor<'de> for PrecisionVisitor
{
  type Value = Precision;

  fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
    formatter.write_str("a precision tag")
  }

  fn visit_str<E>(self, tag: &str) -> std::result::Result<Precision, E>
   where E: de::Error
  {
    tag.parse().map_err(E::custom)
  }
}

impl<'de> Deserialize<'de> for Precision
{
  fn deserialize<D>(deserializer: D) -> std::result::Result<Precision, D::Error>
   where D: Deserializer<'de>
  {
    deserializer.deserialize_str(PrecisionVisitor)
  }
}
