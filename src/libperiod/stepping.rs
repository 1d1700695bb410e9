// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Calendar-aligned sequences of instants.
//!
//! Each generator snaps its starting point to a calendar boundary (start of the week, day, hour, minute, month or year) and walks up to `end` inclusive, by a step derived from an `Interval`. The sequences are finite iterators; cloning a `Steps` before consuming it restarts the walk.
//!
//! The step is always a whole number of the generator's unit: `days_with_interval` given 36 hours steps by one day. An interval too small to advance the generator is rejected with `Error::NonTerminatingStep` before anything is produced.
//!
//! ```rust
//! use period::Interval;
//! use period::stepping::days_with_interval;
//!
//! let days: Vec<_> = days_with_interval("2023-01-01T09:00:00Z", "2023-01-05T23:59:59Z", &Interval::days(2))
//!   .unwrap()
//!   .map(|d| d.to_rfc3339())
//!   .collect();
//! assert_eq!(days, vec!["2023-01-01T00:00:00+00:00", "2023-01-03T00:00:00+00:00", "2023-01-05T00:00:00+00:00"]);
//! ```

use crate::error::{Error, Result};
use crate::instant::ToInstant;
use crate::interval::*;
use crate::precision::Precision;
use chrono::{DateTime, Datelike, Days, Duration, Local, Months, NaiveDate, TimeZone, Timelike, Utc};
use std::convert::TryFrom;
use std::iter::FusedIterator;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step
{
  Fixed(Duration),
  /// Fixed step followed by a snap back to the Sunday of the reached week, time of day is kept. The snap can move backward, the walk stops there.
  Weekly(Duration),
  Months(u32)
}

impl Step
{
  fn advance(&self, current: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match *self {
      Step::Fixed(delta) => current.checked_add_signed(delta),
      Step::Weekly(delta) => current.checked_add_signed(delta).and_then(back_to_sunday),
      Step::Months(months) => current.checked_add_months(Months::new(months))
    }
  }
}

#[derive(Debug, Clone)]
pub struct Steps
{
  next: Option<DateTime<Utc>>,
  end: DateTime<Utc>,
  step: Step
}

impl Steps
{
  fn new(first: DateTime<Utc>, end: DateTime<Utc>, step: Step) -> Steps {
    Steps {
      next: Some(first),
      end: end,
      step: step
    }
  }
}

impl Iterator for Steps
{
  type Item = DateTime<Utc>;

  fn next(&mut self) -> Option<DateTime<Utc>> {
    let end = self.end;
    let current = self.next.take().filter(|current| *current <= end)?;
    self.next = self.step.advance(current).filter(|next| *next > current);
    Some(current)
  }
}

impl FusedIterator for Steps {}

/// Steps of exactly `interval` from `start`, without any snapping.
pub fn dates_with_interval<S, E>(start: S, end: E, interval: &Interval) -> Result<Steps> where
 S: ToInstant, E: ToInstant
{
  let minutes = whole_units(interval, 1, Precision::Minute)?;
  Ok(Steps::new(start.to_instant()?, end.to_instant()?, Step::Fixed(minutes_to_duration(minutes)?)))
}

/// Sundays (UTC) from the week of `start`. Each step is added then snapped back to the Sunday of the reached week, keeping the time of day: steps shorter than a week walk through the hours of a Sunday until they reach the next week.
///
/// The walk ends early when a snap does not move forward. Whole-day steps under a week never do and are rejected.
pub fn weeks_with_interval<S, E>(start: S, end: E, interval: &Interval) -> Result<Steps> where
 S: ToInstant, E: ToInstant
{
  let minutes = whole_units(interval, 1, Precision::Week)?;
  if minutes % MINUTES_PER_DAY == 0 && minutes < MINUTES_PER_WEEK {
    debug!(minutes, "rejecting whole-day step under a week");
    return Err(Error::NonTerminatingStep { minutes: minutes, unit: Precision::Week });
  }
  let first = midnight(start.to_instant()?.date_naive())
    .and_then(back_to_sunday)
    .ok_or(Error::OutOfRange)?;
  Ok(Steps::new(first, end.to_instant()?, Step::Weekly(minutes_to_duration(minutes)?)))
}

/// UTC midnights from the day of `start`.
pub fn days_with_interval<S, E>(start: S, end: E, interval: &Interval) -> Result<Steps> where
 S: ToInstant, E: ToInstant
{
  let days = whole_units(interval, MINUTES_PER_DAY, Precision::Day)?;
  let first = midnight(start.to_instant()?.date_naive()).ok_or(Error::OutOfRange)?;
  let step = Duration::try_days(days).ok_or(Error::OutOfRange)?;
  Ok(Steps::new(first, end.to_instant()?, Step::Fixed(step)))
}

/// Starts of hours in the local zone, see `hours_with_interval_in`.
pub fn hours_with_interval<S, E>(start: S, end: E, interval: &Interval) -> Result<Steps> where
 S: ToInstant, E: ToInstant
{
  hours_with_interval_in(start, end, interval, &Local)
}

/// Starts of hours from the hour of `start`, hours being read in `zone`. This only differs from UTC for zones offset by a fraction of an hour.
pub fn hours_with_interval_in<S, E, Tz>(start: S, end: E, interval: &Interval, zone: &Tz) -> Result<Steps> where
 S: ToInstant, E: ToInstant, Tz: TimeZone
{
  let hours = whole_units(interval, MINUTES_PER_HOUR, Precision::Hour)?;
  let first = start.to_instant()?
    .with_timezone(zone)
    .with_minute(0)
    .and_then(|d| d.with_second(0))
    .and_then(|d| d.with_nanosecond(0))
    .ok_or(Error::OutOfRange)?
    .with_timezone(&Utc);
  let step = Duration::try_hours(hours).ok_or(Error::OutOfRange)?;
  Ok(Steps::new(first, end.to_instant()?, Step::Fixed(step)))
}

/// Starts of minutes from the minute of `start`.
pub fn minutes_with_interval<S, E>(start: S, end: E, interval: &Interval) -> Result<Steps> where
 S: ToInstant, E: ToInstant
{
  let minutes = whole_units(interval, 1, Precision::Minute)?;
  let first = start.to_instant()?
    .with_second(0)
    .and_then(|d| d.with_nanosecond(0))
    .ok_or(Error::OutOfRange)?;
  Ok(Steps::new(first, end.to_instant()?, Step::Fixed(minutes_to_duration(minutes)?)))
}

/// First days of UTC months from the month of `start`, a month being 43200 minutes of interval.
pub fn months_with_interval<S, E>(start: S, end: E, interval: &Interval) -> Result<Steps> where
 S: ToInstant, E: ToInstant
{
  let months = whole_units(interval, MINUTES_PER_MONTH, Precision::Month)?;
  let months = u32::try_from(months).map_err(|_| Error::OutOfRange)?;
  let start = start.to_instant()?;
  let first = NaiveDate::from_ymd_opt(start.year(), start.month(), 1)
    .and_then(midnight)
    .ok_or(Error::OutOfRange)?;
  Ok(Steps::new(first, end.to_instant()?, Step::Months(months)))
}

/// January firsts (UTC) from the year of `start`. The interval is rounded to the nearest number of 365-day years, and never below one year.
pub fn years_with_interval<S, E>(start: S, end: E, interval: &Interval) -> Result<Steps> where
 S: ToInstant, E: ToInstant
{
  let minutes = whole_units(interval, 1, Precision::Year)?;
  let years = ((minutes + MINUTES_PER_YEAR / 2) / MINUTES_PER_YEAR).max(1);
  let months = years.checked_mul(12)
    .and_then(|months| u32::try_from(months).ok())
    .ok_or(Error::OutOfRange)?;
  let start = start.to_instant()?;
  let first = NaiveDate::from_ymd_opt(start.year(), 1, 1)
    .and_then(midnight)
    .ok_or(Error::OutOfRange)?;
  Ok(Steps::new(first, end.to_instant()?, Step::Months(months)))
}

// Number of whole `unit_minutes` in the interval, rejected when it cannot advance.
fn whole_units(interval: &Interval, unit_minutes: i64, unit: Precision) -> Result<i64> {
  let minutes = interval.checked_total_minutes().ok_or_else(|| {
    debug!(?interval, "interval overflows");
    Error::OutOfRange
  })?;
  if minutes > 0 && minutes / unit_minutes > 0 {
    Ok(minutes / unit_minutes)
  }
  else {
    debug!(minutes, %unit, "rejecting non-terminating step");
    Err(Error::NonTerminatingStep { minutes: minutes, unit: unit })
  }
}

fn minutes_to_duration(minutes: i64) -> Result<Duration> {
  Duration::try_minutes(minutes).ok_or(Error::OutOfRange)
}

fn midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
  date.and_hms_opt(0, 0, 0).map(|date| Utc.from_utc_datetime(&date))
}

fn back_to_sunday(date: DateTime<Utc>) -> Option<DateTime<Utc>> {
  let since_sunday = date.weekday().num_days_from_sunday();
  date.checked_sub_days(Days::new(u64::from(since_sunday)))
}
