// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Step sizes for the date generators.
//!
//! An interval combines minutes, hours, days, weeks and months; it reduces to one canonical count of minutes, with a month counted as 30 days.
//!
//! ```rust
//! use period::Interval;
//!
//! assert_eq!(Interval::weeks(1).total_minutes(), 10_080);
//! assert_eq!(Interval::months(1).total_minutes(), 43_200);
//! assert_eq!((Interval::hours(1) + Interval::minutes(30)).total_minutes(), 90);
//! ```

use chrono::Duration;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Formatter};
use std::ops::Add;

pub const MINUTES_PER_HOUR: i64 = 60;
pub const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;
pub const MINUTES_PER_WEEK: i64 = 7 * MINUTES_PER_DAY;
pub const MINUTES_PER_MONTH: i64 = 30 * MINUTES_PER_DAY;
pub const MINUTES_PER_YEAR: i64 = 365 * MINUTES_PER_DAY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Interval
{
  minutes: i64,
  hours: i64,
  days: i64,
  weeks: i64,
  months: i64
}

impl Interval
{
  pub fn new(minutes: i64, hours: i64, days: i64, weeks: i64, months: i64) -> Interval {
    Interval {
      minutes: minutes,
      hours: hours,
      days: days,
      weeks: weeks,
      months: months
    }
  }

  pub fn minutes(minutes: i64) -> Interval {
    Interval::new(minutes, 0, 0, 0, 0)
  }

  pub fn hours(hours: i64) -> Interval {
    Interval::new(0, hours, 0, 0, 0)
  }

  pub fn days(days: i64) -> Interval {
    Interval::new(0, 0, days, 0, 0)
  }

  pub fn weeks(weeks: i64) -> Interval {
    Interval::new(0, 0, 0, weeks, 0)
  }

  pub fn months(months: i64) -> Interval {
    Interval::new(0, 0, 0, 0, months)
  }

  pub fn minute_part(&self) -> i64 { self.minutes }
  pub fn hour_part(&self) -> i64 { self.hours }
  pub fn day_part(&self) -> i64 { self.days }
  pub fn week_part(&self) -> i64 { self.weeks }
  pub fn month_part(&self) -> i64 { self.months }

  /// The whole interval expressed in minutes. Panics on overflow, see `checked_total_minutes`.
  pub fn total_minutes(&self) -> i64 {
    self.minutes
      + self.hours * MINUTES_PER_HOUR
      + self.days * MINUTES_PER_DAY
      + self.weeks * MINUTES_PER_WEEK
      + self.months * MINUTES_PER_MONTH
  }

  /// `None` if the total does not fit in an `i64`.
  pub fn checked_total_minutes(&self) -> Option<i64> {
    let parts = [
      (self.minutes, 1),
      (self.hours, MINUTES_PER_HOUR),
      (self.days, MINUTES_PER_DAY),
      (self.weeks, MINUTES_PER_WEEK),
      (self.months, MINUTES_PER_MONTH)
    ];
    parts.iter().try_fold(0i64, |total, &(count, unit)| {
      count.checked_mul(unit).and_then(|minutes| total.checked_add(minutes))
    })
  }

  /// `None` if the interval is beyond the range of `Duration`.
  pub fn to_duration(&self) -> Option<Duration> {
    self.checked_total_minutes().and_then(Duration::try_minutes)
  }
}

impl Add for Interval
{
  type Output = Interval;

  fn add(self, other: Interval) -> Interval {
    Interval::new(
      self.minutes + other.minutes,
      self.hours + other.hours,
      self.days + other.days,
      self.weeks + other.weeks,
      self.months + other.months
    )
  }
}

impl Serialize for Interval
{
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
   where S: Serializer
  {
    let mut tuple = serializer.serialize_tuple(5)?;
    tuple.serialize_element(&self.minutes)?;
    tuple.serialize_element(&self.hours)?;
    tuple.serialize_element(&self.days)?;
    tuple.serialize_element(&self.weeks)?;
    tuple.serialize_element(&self.months)?;
    tuple.end()
  }
}

struct IntervalVisitor;

impl<'de> Visitor<'de> for IntervalVisitor
{
  type Value = Interval;

  fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
    formatter.write_str("a tuple of minutes, hours, days, weeks and months")
  }

  fn visit_seq<A>(self, mut seq: A) -> Result<Interval, A::Error>
   where A: SeqAccess<'de>
  {
    let mut parts = [0i64; 5];
    for (i, part) in parts.iter_mut().enumerate() {
      *part = seq.next_element()?
        .ok_or_else(|| de::Error::invalid_length(i, &self))?;
    }
    Ok(Interval::new(parts[0], parts[1], parts[2], parts[3], parts[4]))
  }
}

impl<'de> Deserialize<'de> for Interval
{
  fn deserialize<D>(deserializer: D) -> Result<Interval, D::Error>
   where D: Deserializer<'de>
  {
    deserializer.deserialize_tuple(5, IntervalVisitor)
  }
}
