// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Calendar arithmetic on UTC fields.
//!
//! Adding months clamps to the end of the target month (`Jan 31 + 1 month = Feb 28`) while adding years keeps the day of month and lets it roll over (`Feb 29, 2024 + 1 year = Mar 1, 2025`).

use crate::error::{Error, Result};
use crate::precision::Precision;
use chrono::{DateTime, Datelike, Days, Duration, Months, NaiveDate, TimeZone, Utc};
use std::convert::TryFrom;

pub fn add_to_date(date: &DateTime<Utc>, amount: i64, unit: Precision) -> Result<DateTime<Utc>> {
  match unit {
    Precision::Minute => add_duration(date, Duration::try_minutes(amount)),
    Precision::Hour => add_duration(date, Duration::try_hours(amount)),
    Precision::Day => add_duration(date, Duration::try_days(amount)),
    Precision::Week => add_duration(date, Duration::try_weeks(amount)),
    Precision::Month => add_months(date, amount),
    Precision::Year => add_years(date, amount)
  }
}

pub fn subtract_from_date(date: &DateTime<Utc>, amount: i64, unit: Precision) -> Result<DateTime<Utc>> {
  let amount = amount.checked_neg().ok_or(Error::OutOfRange)?;
  add_to_date(date, amount, unit)
}

fn add_duration(date: &DateTime<Utc>, delta: Option<Duration>) -> Result<DateTime<Utc>> {
  delta.and_then(|delta| date.checked_add_signed(delta))
    .ok_or(Error::OutOfRange)
}

fn add_months(date: &DateTime<Utc>, amount: i64) -> Result<DateTime<Utc>> {
  let months = u32::try_from(amount.unsigned_abs())
    .map(Months::new)
    .map_err(|_| Error::OutOfRange)?;
  let moved =
    if amount >= 0 { date.checked_add_months(months) }
    else { date.checked_sub_months(months) };
  moved.ok_or(Error::OutOfRange)
}

// The day of month is re-added from the first of the target month so that a missing day overflows into the next month.
fn add_years(date: &DateTime<Utc>, amount: i64) -> Result<DateTime<Utc>> {
  let year = i64::from(date.year()).checked_add(amount)
    .and_then(|year| i32::try_from(year).ok())
    .ok_or(Error::OutOfRange)?;
  let moved = NaiveDate::from_ymd_opt(year, date.month(), 1)
    .and_then(|first| first.checked_add_days(Days::new(u64::from(date.day0()))))
    .ok_or(Error::OutOfRange)?;
  Ok(Utc.from_utc_datetime(&moved.and_time(date.time())))
}

pub fn is_leap_year(year: i32) -> bool {
  (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1 to 12) of `year`.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
  match month {
    1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
    4 | 6 | 9 | 11 => Some(30),
    2 if is_leap_year(year) => Some(29),
    2 => Some(28),
    _ => None
  }
}

pub fn quarter<D: Datelike>(date: &D) -> u32 {
  date.month0() / 3 + 1
}

/// ISO-8601 week number.
pub fn week_number<D: Datelike>(date: &D) -> u32 {
  date.iso_week().week()
}

pub fn is_same_day<D: Datelike, E: Datelike>(a: &D, b: &E) -> bool {
  a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}
