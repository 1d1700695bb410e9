// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Closed calendar period `[start, end]`.
//!
//! A period carries a `Precision`, which sizes the tolerance under which two periods are considered adjacent and the unit of `length`, and an optional `Interval` used to enumerate dates inside the period. The bounds are never snapped to the precision.
//!
//! Two predicates compare periods and they disagree on shared boundaries: `overlaps_with` is strict (periods sharing exactly one instant do not overlap) while `is_adjacent_to` first rejects periods that intersect inclusively. Periods touching on one instant are thus neither overlapping nor adjacent.
//!
//! ```rust
//! use period::{Period, Precision};
//!
//! let a = Period::parse("2023-01-01T00:00:00Z", "2023-01-10T23:59:59.999Z", Precision::Day).unwrap();
//! let b = Period::parse("2023-01-11T00:00:00Z", "2023-01-20T23:59:59.999Z", Precision::Day).unwrap();
//! assert!(!a.overlaps_with(&b));
//! assert!(a.is_adjacent_to(&b));
//! assert_eq!(a.union(&b).len(), 1);
//! ```
//!
//! Every operation returns fresh periods: the `with_*` methods consume a period and give back the modified value.

use crate::boundary::BoundaryPolicy;
use crate::error::Result;
use crate::instant::ToInstant;
use crate::interval::Interval;
use crate::ops::Hull;
use crate::precision::Precision;
use crate::stepping::dates_with_interval;
use chrono::{DateTime, Datelike, Duration, Local, SecondsFormat, TimeZone, Utc};
use gcollections::kind::Collection;
use gcollections::ops::{Bounded, Contains, Difference, Disjoint, Intersection, Union};
use num_integer::Integer;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::{max, min};
use std::fmt::{self, Display, Formatter};
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Period
{
  start: DateTime<Utc>,
  end: DateTime<Utc>,
  precision: Precision,
  interval: Option<Interval>
}

impl Period
{
  pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, precision: Precision) -> Period {
    Period {
      start: start,
      end: end,
      precision: precision,
      interval: None
    }
  }

  /// Builds a period from any date input, such as `"2023-01-01"` or `"2023-01-10T23:59:59.999Z"`.
  pub fn parse<S, E>(start: S, end: E, precision: Precision) -> Result<Period> where
   S: ToInstant, E: ToInstant
  {
    Ok(Period::new(start.to_instant()?, end.to_instant()?, precision))
  }

  pub fn start(&self) -> DateTime<Utc> {
    self.start
  }

  pub fn end(&self) -> DateTime<Utc> {
    self.end
  }

  pub fn precision(&self) -> Precision {
    self.precision
  }

  pub fn interval(&self) -> Option<Interval> {
    self.interval
  }

  pub fn with_start(self, start: DateTime<Utc>) -> Period {
    Period { start: start, ..self }
  }

  pub fn with_end(self, end: DateTime<Utc>) -> Period {
    Period { end: end, ..self }
  }

  pub fn with_precision(self, precision: Precision) -> Period {
    Period { precision: precision, ..self }
  }

  pub fn with_interval(self, interval: Interval) -> Period {
    Period { interval: Some(interval), ..self }
  }

  pub fn without_interval(self) -> Period {
    Period { interval: None, ..self }
  }

  /// `true` if `start <= date <= end`.
  pub fn contains(&self, date: &DateTime<Utc>) -> bool {
    self.start <= *date && *date <= self.end
  }

  /// `contains` for any date input, failing if it cannot be read as an instant.
  pub fn contains_instant<T: ToInstant>(&self, date: T) -> Result<bool> {
    Ok(self.contains(&date.to_instant()?))
  }

  /// Strict overlap: sharing a single boundary instant is not overlapping.
  pub fn overlaps_with(&self, other: &Period) -> bool {
    self.start < other.end && self.end > other.start
  }

  /// `true` if the periods do not intersect (boundaries included) and the space between them is at most one unit of the coarser precision.
  pub fn is_adjacent_to(&self, other: &Period) -> bool {
    if self.start <= other.end && other.start <= self.end {
      return false;
    }
    let tolerance = self.precision.coarsest(other.precision).to_milliseconds();
    let gap = (other.start - self.end).num_milliseconds().abs();
    let reverse_gap = (self.start - other.end).num_milliseconds().abs();
    (gap > 0 && gap <= tolerance) || (reverse_gap > 0 && reverse_gap <= tolerance)
  }

  pub fn overlap(&self, other: &Period) -> Option<Period> {
    if !self.overlaps_with(other) {
      None
    }
    else {
      Some(Period::new(
        max(self.start, other.start),
        min(self.end, other.end),
        self.precision))
    }
  }

  /// Parts of `self` outside of `other`, cut one millisecond away from the bounds of `other`. A cut falling out of the representable range drops its part.
  pub fn subtract(&self, other: &Period) -> Vec<Period> {
    self.subtract_with(other, &BoundaryPolicy::default())
  }

  pub fn subtract_with(&self, other: &Period, policy: &BoundaryPolicy) -> Vec<Period> {
    if !self.overlaps_with(other) {
      return vec![self.clone()];
    }
    let epsilon = policy.cut_offset(self.precision);
    let mut periods = vec![];
    if self.start < other.start {
      if let Some(cut) = other.start.checked_sub_signed(epsilon) {
        periods.push(Period::new(self.start, cut, self.precision));
      }
    }
    if self.end > other.end {
      if let Some(cut) = other.end.checked_add_signed(epsilon) {
        periods.push(Period::new(cut, self.end, self.precision));
      }
    }
    periods
  }

  /// Space between two periods that neither overlap nor are adjacent, shrunk by one unit of `self.precision` on both sides.
  pub fn gap(&self, other: &Period) -> Option<Period> {
    self.gap_with(other, &BoundaryPolicy::default())
  }

  pub fn gap_with(&self, other: &Period, policy: &BoundaryPolicy) -> Option<Period> {
    if self.overlaps_with(other) || self.is_adjacent_to(other) {
      return None;
    }
    let epsilon = policy.gap_offset(self.precision);
    let start = min(self.end, other.end).checked_add_signed(epsilon)?;
    let end = max(self.start, other.start).checked_sub_signed(epsilon)?;
    Some(Period::new(start, end, self.precision))
  }

  /// One period if `self` and `other` overlap or are adjacent, otherwise both of them ordered by start.
  pub fn union(&self, other: &Period) -> Vec<Period> {
    if self.overlaps_with(other) || self.is_adjacent_to(other) {
      vec![self.hull(other)]
    }
    else {
      ordered_by_start(self.clone(), other.clone())
    }
  }

  pub fn symmetric_difference(&self, other: &Period) -> Vec<Period> {
    self.symmetric_difference_with(other, &BoundaryPolicy::default())
  }

  pub fn symmetric_difference_with(&self, other: &Period, policy: &BoundaryPolicy) -> Vec<Period> {
    match self.overlap(other) {
      None => ordered_by_start(self.clone(), other.clone()),
      Some(shared) => {
        let mut fragments = self.subtract_with(&shared, policy);
        fragments.extend(other.subtract_with(&shared, policy));
        merge(fragments, self.precision)
      }
    }
  }

  /// The next period of the same length, starting one precision unit after `self` ends. `None` if it would end past the last representable instant.
  pub fn renew(&self) -> Option<Period> {
    let unit = self.precision.to_milliseconds();
    let start = self.end.checked_add_signed(Duration::try_milliseconds(unit)?)?;
    let length = self.length().checked_mul(unit).and_then(Duration::try_milliseconds)?;
    let end = start.checked_add_signed(length)?;
    Some(Period {
      start: start,
      end: end,
      precision: self.precision,
      interval: self.interval
    })
  }

  /// Number of whole precision units between start and end, months and years having a fixed length.
  pub fn length(&self) -> i64 {
    Integer::div_floor(&self.milliseconds(), &self.precision.to_milliseconds())
  }

  fn milliseconds(&self) -> i64 {
    (self.end - self.start).num_milliseconds()
  }

  pub fn minutes_in_interval(&self) -> i64 {
    Integer::div_floor(&self.milliseconds(), &60_000)
  }

  pub fn hours_in_interval(&self) -> i64 {
    Integer::div_floor(&self.minutes_in_interval(), &60)
  }

  pub fn days_in_interval(&self) -> i64 {
    Integer::div_floor(&self.hours_in_interval(), &24)
  }

  pub fn weeks_in_interval(&self) -> i64 {
    Integer::div_floor(&self.days_in_interval(), &7)
  }

  /// Elapsed calendar months, read in the local zone.
  pub fn months_in_interval(&self) -> i64 {
    self.months_in_interval_in(&Local)
  }

  /// Elapsed calendar months between the fields of `start` and `end` in `zone`. A month is not complete until the day of month of `start` is reached.
  pub fn months_in_interval_in<Tz: TimeZone>(&self, zone: &Tz) -> i64 {
    let start = self.start.with_timezone(zone);
    let end = self.end.with_timezone(zone);
    let mut months = i64::from(end.year() - start.year()) * 12
      + i64::from(end.month()) - i64::from(start.month());
    if end.day() < start.day() {
      months -= 1;
    }
    months
  }

  pub fn years_in_interval(&self) -> i64 {
    self.years_in_interval_in(&Local)
  }

  pub fn years_in_interval_in<Tz: TimeZone>(&self, zone: &Tz) -> i64 {
    Integer::div_floor(&self.months_in_interval_in(zone), &12)
  }

  /// Dates from `start` to `end` stepped by the interval of the period, `None` if it has no interval.
  pub fn dates_in_interval(&self) -> Result<Option<Vec<DateTime<Utc>>>> {
    self.interval
      .map(|interval| dates_with_interval(&self.start, &self.end, &interval).map(|steps| steps.collect::<Vec<_>>()))
      .transpose()
  }
}

fn ordered_by_start(a: Period, b: Period) -> Vec<Period> {
  if b.start < a.start { vec![b, a] }
  else { vec![a, b] }
}

fn joinable(first: &Period, second: &Period) -> bool {
  first.is_adjacent_to(second) || first.overlaps_with(second)
}

// Sorts the fragments by start and joins each one with the last kept fragment when they touch.
fn merge(mut periods: Vec<Period>, precision: Precision) -> Vec<Period> {
  if periods.len() <= 1 {
    return periods;
  }
  periods.sort_by_key(|p| p.start);
  let mut merged: Vec<Period> = Vec::with_capacity(periods.len());
  for period in periods {
    join_or_push(&mut merged, period, precision);
  }
  merged
}

fn join_or_push(merged: &mut Vec<Period>, x: Period, precision: Precision) {
  if let Some(last) = merged.last_mut() {
    if joinable(last, &x) {
      trace!(%last, next = %x, "joining fragments");
      *last = Period::new(last.start, max(last.end, x.end), precision);
      return;
    }
  }
  merged.push(x);
}

impl Hull for Period
{
  type Output = Period;

  fn hull(&self, other: &Period) -> Period {
    Period::new(
      min(self.start, other.start),
      max(self.end, other.end),
      self.precision)
  }
}

/// A period in the default day precision.
impl From<(DateTime<Utc>, DateTime<Utc>)> for Period
{
  fn from((start, end): (DateTime<Utc>, DateTime<Utc>)) -> Period {
    Period::new(start, end, Precision::default())
  }
}

fn format_instant(instant: &DateTime<Utc>) -> String {
  instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl Display for Period
{
  fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
    write!(formatter, "[{}, {}]", format_instant(&self.start), format_instant(&self.end))
  }
}

impl Collection for Period
{
  type Item = DateTime<Utc>;
}

impl Bounded for Period
{
  fn lower(&self) -> DateTime<Utc> {
    self.start
  }

  fn upper(&self) -> DateTime<Utc> {
    self.end
  }
}

impl Contains for Period
{
  fn contains(&self, value: &DateTime<Utc>) -> bool {
    Period::contains(self, value)
  }
}

impl Intersection for Period
{
  type Output = Option<Period>;

  fn intersection(&self, other: &Period) -> Option<Period> {
    self.overlap(other)
  }
}

impl Union for Period
{
  type Output = Vec<Period>;

  fn union(&self, other: &Period) -> Vec<Period> {
    Period::union(self, other)
  }
}

impl Difference for Period
{
  type Output = Vec<Period>;

  fn difference(&self, other: &Period) -> Vec<Period> {
    self.subtract(other)
  }
}

impl Disjoint for Period
{
  fn is_disjoint(&self, other: &Period) -> bool {
    !self.overlaps_with(other)
  }
}

impl Serialize for Period
{
  fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
   where S: Serializer
  {
    let mut tuple = serializer.serialize_tuple(4)?;
    tuple.serialize_element(&format_instant(&self.start))?;
    tuple.serialize_element(&format_instant(&self.end))?;
    tuple.serialize_element(&self.precision)?;
    tuple.serialize_element(&self.interval)?;
    tuple.end()
  }
}

struct PeriodVisitor;

impl<'de> Visitor<'de> for PeriodVisitor
{
  type Value = Period;

  fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
    formatter.write_str("a tuple of start, end, precision and optional interval")
  }

  fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Period, A::Error>
   where A: SeqAccess<'de>
  {
    let start: String = seq.next_element()?
      .ok_or_else(|| de::Error::invalid_length(0, &self))?;
    let end: String = seq.next_element()?
      .ok_or_else(|| de::Error::invalid_length(1, &self))?;
    let precision: Precision = seq.next_element()?
      .ok_or_else(|| de::Error::invalid_length(2, &self))?;
    let interval: Option<Interval> = seq.next_element()?
      .ok_or_else(|| de::Error::invalid_length(3, &self))?;
    let period = Period::parse(start, end, precision).map_err(de::Error::custom)?;
    Ok(Period { interval: interval, ..period })
  }
}

impl<'de> Deserialize<'de> for Period
{
  fn deserialize<D>(deserializer: D) -> std::result::Result<Period, D::Error>
   where D: Deserializer<'de>
  {
    deserializer.deserialize_tuple(4, PeriodVisitor)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::boundary::Epsilon;
  use crate::error::Error;
  use proptest::prelude::*;
  use serde_test::{assert_tokens, Token};

  fn at(date: &str) -> DateTime<Utc> {
    date.to_instant().unwrap()
  }

  fn period(start: &str, end: &str, precision: Precision) -> Period {
    Period::parse(start, end, precision).unwrap()
  }

  fn bounds(periods: &[Period]) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    periods.iter().map(|p| (p.start(), p.end())).collect()
  }

  // [2023-01-01, 2023-01-10] and [2023-01-05, 2023-01-15] with day precision.
  fn jan_1_10() -> Period { period("2023-01-01", "2023-01-10", Precision::Day) }
  fn jan_5_15() -> Period { period("2023-01-05", "2023-01-15", Precision::Day) }
  fn jan_11_20() -> Period { period("2023-01-11", "2023-01-20", Precision::Day) }

  #[test]
  fn construction() {
    let p = jan_1_10();
    assert_eq!(p.start(), at("2023-01-01"));
    assert_eq!(p.end(), at("2023-01-10"));
    assert_eq!(p.precision(), Precision::Day);
    assert_eq!(p.interval(), None);
    assert_eq!(Period::from((at("2023-01-01"), at("2023-01-10"))), p);
    assert_eq!(Period::parse("2023-01-01", "tomorrow", Precision::Day),
      Err(Error::InvalidDate("tomorrow".to_string())));
  }

  #[test]
  fn test_contains() {
    let p = jan_1_10();
    assert!(p.contains(&at("2023-01-05")));
    assert!(p.contains(&at("2023-01-01")));
    assert!(p.contains(&at("2023-01-10")));
    assert!(!p.contains(&at("2023-01-10T00:00:00.001Z")));
    assert!(!p.contains(&at("2023-01-15")));
    assert_eq!(p.contains_instant("2023-01-05T12:00:00Z"), Ok(true));
    assert_eq!(p.contains_instant("2023-01-10T00:00:00.001Z"), Ok(false));
    assert_eq!(p.contains_instant(at("2023-01-01")), Ok(true));
    assert_eq!(p.contains_instant("soon"), Err(Error::InvalidDate("soon".to_string())));
  }

  #[test]
  fn test_overlaps_with() {
    assert!(jan_1_10().overlaps_with(&jan_5_15()));
    assert!(jan_5_15().overlaps_with(&jan_1_10()));
    assert!(!jan_1_10().overlaps_with(&jan_11_20()));
    // A single shared instant is not an overlap.
    assert!(!jan_1_10().overlaps_with(&period("2023-01-10", "2023-01-20", Precision::Day)));
  }

  #[test]
  fn test_is_adjacent_to() {
    let day_end = "2023-01-10T23:59:59.999Z";
    let cases = vec![
      (1, ("2023-01-01T00:00:00Z", day_end, Precision::Day), ("2023-01-11T00:00:00Z", "2023-01-20T23:59:59.999Z", Precision::Day), true),
      (2, ("2023-01-01T00:00:00Z", "2023-01-10T23:00:00Z", Precision::Hour), ("2023-01-11T00:00:00Z", "2023-01-20T23:00:00Z", Precision::Hour), true),
      (3, ("2023-01-01T00:00:00Z", "2023-01-01T00:59:00Z", Precision::Minute), ("2023-01-01T01:00:00Z", "2023-01-01T01:59:00Z", Precision::Minute), true),
      (4, ("2023-01-01T00:00:00Z", day_end, Precision::Day), ("2023-01-11T00:00:00Z", "2023-01-20T23:59:59.999Z", Precision::Hour), true),
      (5, ("2023-01-01T00:00:00Z", day_end, Precision::Day), ("2023-01-12T00:00:00Z", "2023-01-20T23:59:59.999Z", Precision::Day), false),
      (6, ("2023-01-01T00:00:00Z", "2023-01-10T23:00:00Z", Precision::Hour), ("2023-01-11T01:00:00Z", "2023-01-20T23:00:00Z", Precision::Hour), false),
      (7, ("2023-01-01T00:00:00Z", "2023-01-01T00:58:00Z", Precision::Minute), ("2023-01-01T01:00:00Z", "2023-01-01T01:59:00Z", Precision::Minute), false),
      (8, ("2023-01-01T00:00:00Z", day_end, Precision::Day), ("2023-01-10T00:00:00Z", "2023-01-20T23:59:59.999Z", Precision::Day), false),
      (9, ("2023-01-11T00:00:00Z", "2023-01-20T23:59:59.999Z", Precision::Day), ("2023-01-01T00:00:00Z", day_end, Precision::Day), true),
      // The coarser precision sets the tolerance: a 2 hours gap is within a day.
      (10, ("2023-01-01T00:00:00Z", "2023-01-10T22:00:00Z", Precision::Hour), ("2023-01-11T00:00:00Z", "2023-01-20T00:00:00Z", Precision::Day), true),
      // Touching on one instant is neither overlapping nor adjacent.
      (11, ("2023-01-01T00:00:00Z", "2023-01-10T00:00:00Z", Precision::Day), ("2023-01-10T00:00:00Z", "2023-01-20T00:00:00Z", Precision::Day), false),
    ];
    for (id, (s1, e1, p1), (s2, e2, p2), expected) in cases {
      let a = period(s1, e1, p1);
      let b = period(s2, e2, p2);
      assert_eq!(a.is_adjacent_to(&b), expected, "test #{} of is_adjacent_to", id);
    }
  }

  #[test]
  fn test_dates_in_interval() {
    let p = jan_1_10().with_interval(Interval::days(2));
    let dates = p.dates_in_interval().unwrap().unwrap();
    assert_eq!(dates, vec![at("2023-01-01"), at("2023-01-03"), at("2023-01-05"), at("2023-01-07"), at("2023-01-09")]);
    assert_eq!(jan_1_10().dates_in_interval(), Ok(None));
    assert!(jan_1_10().with_interval(Interval::default()).dates_in_interval().is_err());
  }

  #[test]
  fn test_length() {
    assert_eq!(jan_1_10().length(), 9);
    assert_eq!(jan_1_10().with_precision(Precision::Hour).length(), 216);
    assert_eq!(jan_1_10().with_precision(Precision::Week).length(), 1);
    assert_eq!(period("2023-01-01", "2023-03-01", Precision::Month).length(), 1);
    // Reversed bounds give a negative length, floored.
    assert_eq!(period("2023-01-10T12:00:00Z", "2023-01-01", Precision::Day).length(), -10);
  }

  #[test]
  fn test_overlap() {
    let shared = jan_1_10().overlap(&jan_5_15()).unwrap();
    assert_eq!(shared, period("2023-01-05", "2023-01-10", Precision::Day));
    assert_eq!(jan_1_10().overlap(&jan_11_20()), None);
    let hours = jan_5_15().with_precision(Precision::Hour);
    assert_eq!(jan_1_10().overlap(&hours).unwrap().precision(), Precision::Day);
    assert_eq!(hours.overlap(&jan_1_10()).unwrap().precision(), Precision::Hour);
  }

  #[test]
  fn test_subtract() {
    let result = jan_1_10().subtract(&jan_5_15());
    assert_eq!(bounds(&result), vec![(at("2023-01-01T00:00:00.000Z"), at("2023-01-04T23:59:59.999Z"))]);

    let hours = period("2023-01-01T00:00:00Z", "2023-01-10T00:00:00Z", Precision::Hour);
    let other = period("2023-01-05T12:00:00Z", "2023-01-15T00:00:00Z", Precision::Hour);
    assert_eq!(bounds(&hours.subtract(&other)), vec![(at("2023-01-01T00:00:00.000Z"), at("2023-01-05T11:59:59.999Z"))]);

    let result = jan_1_10().subtract(&jan_11_20());
    assert_eq!(result, vec![jan_1_10()]);
  }

  #[test]
  fn subtract_from_the_middle() {
    let month = period("2023-01-01", "2023-01-31", Precision::Month);
    let hole = period("2023-01-10", "2023-01-20", Precision::Day);
    let result = month.subtract(&hole);
    assert_eq!(bounds(&result), vec![
      (at("2023-01-01"), at("2023-01-09T23:59:59.999Z")),
      (at("2023-01-20T00:00:00.001Z"), at("2023-01-31"))
    ]);
    assert!(result.iter().all(|p| p.precision() == Precision::Month));
    assert_eq!(hole.subtract(&month), Vec::<Period>::new());
  }

  #[test]
  fn subtract_with_precision_cuts() {
    let policy = BoundaryPolicy::new(Epsilon::Precision, Epsilon::Precision);
    let result = jan_1_10().subtract_with(&jan_5_15(), &policy);
    assert_eq!(bounds(&result), vec![(at("2023-01-01"), at("2023-01-04"))]);
  }

  #[test]
  fn test_gap() {
    let later = period("2023-01-15", "2023-01-20", Precision::Day);
    let gap = jan_1_10().gap(&later).unwrap();
    assert_eq!(gap, period("2023-01-11", "2023-01-14", Precision::Day));
    assert_eq!(later.gap(&jan_1_10()).unwrap(), gap);
    assert_eq!(jan_1_10().gap(&jan_5_15()), None);
    assert_eq!(jan_1_10().gap(&period("2023-01-11", "2023-01-20", Precision::Day)), None);
  }

  #[test]
  fn gap_uses_the_receiver_precision() {
    let later = period("2023-01-15", "2023-01-20", Precision::Day);
    let gap = jan_1_10().with_precision(Precision::Hour).gap(&later).unwrap();
    assert_eq!((gap.start(), gap.end()), (at("2023-01-10T01:00:00Z"), at("2023-01-14T23:00:00Z")));
    assert_eq!(gap.precision(), Precision::Hour);

    let exact = BoundaryPolicy::new(Epsilon::Fixed(Duration::milliseconds(1)), Epsilon::Fixed(Duration::zero()));
    let gap = jan_1_10().gap_with(&later, &exact).unwrap();
    assert_eq!((gap.start(), gap.end()), (at("2023-01-10"), at("2023-01-15")));
  }

  #[test]
  fn test_symmetric_difference() {
    let a = period("2023-01-01T00:00:00Z", "2023-01-10T23:59:59.999Z", Precision::Day);
    let b = period("2023-01-05T00:00:00Z", "2023-01-15T23:59:59.999Z", Precision::Day);
    let result = a.symmetric_difference(&b);
    assert_eq!(bounds(&result), vec![
      (at("2023-01-01T00:00:00.000Z"), at("2023-01-04T23:59:59.999Z")),
      (at("2023-01-11T00:00:00.000Z"), at("2023-01-15T23:59:59.999Z"))
    ]);

    let result = jan_1_10().symmetric_difference(&jan_11_20());
    assert_eq!(result, vec![jan_1_10(), jan_11_20()]);
    let result = jan_11_20().symmetric_difference(&jan_1_10());
    assert_eq!(result, vec![jan_1_10(), jan_11_20()]);
  }

  #[test]
  fn symmetric_difference_of_nested_and_equal_periods() {
    let outer = period("2023-01-01", "2023-01-31", Precision::Day);
    let inner = period("2023-01-10", "2023-01-20", Precision::Day);
    assert_eq!(bounds(&inner.symmetric_difference(&outer)), vec![
      (at("2023-01-01"), at("2023-01-09T23:59:59.999Z")),
      (at("2023-01-20T00:00:00.001Z"), at("2023-01-31"))
    ]);
    assert_eq!(outer.symmetric_difference(&outer.clone()), Vec::<Period>::new());
  }

  #[test]
  fn merge_joins_touching_fragments() {
    let fragments = vec![
      period("2023-01-20", "2023-01-25", Precision::Hour),
      period("2023-01-05", "2023-01-08", Precision::Hour),
      period("2023-01-01", "2023-01-04T23:59:59.999Z", Precision::Hour),
      period("2023-01-07", "2023-01-09", Precision::Hour),
    ];
    let merged = merge(fragments, Precision::Day);
    assert_eq!(merged, vec![
      period("2023-01-01", "2023-01-09", Precision::Day),
      period("2023-01-20", "2023-01-25", Precision::Hour)
    ]);
    assert_eq!(merge(vec![jan_1_10()], Precision::Hour), vec![jan_1_10()]);
  }

  #[test]
  fn test_renew() {
    let renewed = jan_1_10().renew();
    assert_eq!(renewed, Some(jan_11_20()));

    let billing = period("2023-01-01T00:00:00Z", "2023-01-01T08:00:00Z", Precision::Hour)
      .with_interval(Interval::hours(2));
    let next = billing.renew().unwrap();
    assert_eq!((next.start(), next.end()), (at("2023-01-01T09:00:00Z"), at("2023-01-01T17:00:00Z")));
    assert_eq!(next.interval(), Some(Interval::hours(2)));
    assert_eq!(next.precision(), Precision::Hour);
  }

  #[test]
  fn bounds_near_the_end_of_time() {
    let last = DateTime::<Utc>::MAX_UTC;
    let closing = Period::new(last - Duration::days(3), last, Precision::Day);
    assert_eq!(closing.renew(), None);

    let huge = BoundaryPolicy::new(Epsilon::Fixed(Duration::days(365 * 1000)), Epsilon::Fixed(Duration::days(365 * 1000)));
    let inner = Period::new(last - Duration::days(2), last - Duration::days(1), Precision::Day);
    let pieces = closing.subtract_with(&inner, &huge);
    assert_eq!(pieces.len(), 1);
    assert_eq!(pieces[0].start(), closing.start());

    let early = Period::new(last - Duration::days(30), last - Duration::days(20), Precision::Day);
    assert_eq!(early.gap_with(&closing, &huge), None);
    assert!(early.gap(&closing).is_some());
  }

  #[test]
  fn test_union() {
    let result = jan_1_10().union(&jan_5_15());
    assert_eq!(result, vec![period("2023-01-01", "2023-01-15", Precision::Day)]);

    let later = period("2023-01-20", "2023-01-25", Precision::Day);
    assert_eq!(jan_1_10().union(&later), vec![jan_1_10(), later.clone()]);
    assert_eq!(later.union(&jan_1_10()), vec![jan_1_10(), later]);

    let adjacent = period("2023-01-11", "2023-01-12", Precision::Day);
    assert_eq!(jan_1_10().union(&adjacent), vec![period("2023-01-01", "2023-01-12", Precision::Day)]);
    assert_eq!(jan_1_10().union(&jan_1_10()), vec![jan_1_10()]);
  }

  #[test]
  fn builders_return_new_values() {
    let original = jan_1_10();
    let moved = original.clone()
      .with_start(at("2023-02-01"))
      .with_end(at("2023-02-10"))
      .with_precision(Precision::Month)
      .with_interval(Interval::days(1));
    assert_eq!(original, jan_1_10());
    assert_eq!(moved.start(), at("2023-02-01"));
    assert_eq!(moved.end(), at("2023-02-10"));
    assert_eq!(moved.precision(), Precision::Month);
    assert_eq!(moved.interval(), Some(Interval::days(1)));
    assert_eq!(moved.without_interval().interval(), None);
  }

  #[test]
  fn interval_calculations() {
    let p = period("2023-01-01T00:00:00Z", "2024-03-15T12:30:00Z", Precision::Minute);
    assert_eq!(p.minutes_in_interval(), 632910);
    assert_eq!(p.hours_in_interval(), 10548);
    assert_eq!(p.days_in_interval(), 439);
    assert_eq!(p.weeks_in_interval(), 62);
    assert_eq!(p.months_in_interval_in(&Utc), 14);
    assert_eq!(p.years_in_interval_in(&Utc), 1);
  }

  #[test]
  fn interval_edge_cases() {
    let same_day = period("2023-01-01T00:00:00Z", "2023-01-01T23:59:59Z", Precision::Day);
    assert_eq!(same_day.days_in_interval(), 0);
    assert_eq!(same_day.hours_in_interval(), 23);
    assert_eq!(same_day.minutes_in_interval(), 1439);

    let leap_year = period("2024-02-28T00:00:00Z", "2024-03-01T00:00:00Z", Precision::Day);
    assert_eq!(leap_year.days_in_interval(), 2);

    let month_boundary = period("2023-01-31T00:00:00Z", "2023-03-01T00:00:00Z", Precision::Day);
    assert_eq!(month_boundary.months_in_interval_in(&Utc), 1);
    assert_eq!(month_boundary.days_in_interval(), 29);

    let day_precision = period("2023-01-01T12:30:00Z", "2023-01-03T08:45:00Z", Precision::Day);
    assert_eq!(day_precision.days_in_interval(), 1);

    let month_precision = period("2023-01-15T00:00:00Z", "2023-03-15T00:00:00Z", Precision::Month);
    assert_eq!(month_precision.months_in_interval_in(&Utc), 2);
    // Calendar months and fixed 30-day months disagree.
    assert_eq!(month_precision.length(), 1);
  }

  #[test]
  fn months_read_in_a_zone() {
    let p = period("2023-01-31T23:00:00Z", "2023-02-28T23:00:00Z", Precision::Day);
    assert_eq!(p.months_in_interval_in(&Utc), 0);
    let paris = chrono::FixedOffset::east_opt(3600).unwrap();
    assert_eq!(p.months_in_interval_in(&paris), 1);
  }

  #[test]
  fn test_display() {
    assert_eq!(jan_1_10().to_string(), "[2023-01-01T00:00:00.000Z, 2023-01-10T00:00:00.000Z]");
  }

  #[test]
  fn collection_traits() {
    let a = jan_1_10();
    let b = jan_5_15();
    assert_eq!(Bounded::lower(&a), at("2023-01-01"));
    assert_eq!(Bounded::upper(&a), at("2023-01-10"));
    assert!(Contains::contains(&a, &at("2023-01-02")));
    assert_eq!(Intersection::intersection(&a, &b), a.overlap(&b));
    assert_eq!(Union::union(&a, &b), a.union(&b));
    assert_eq!(Difference::difference(&a, &b), a.subtract(&b));
    assert!(!Disjoint::is_disjoint(&a, &b));
    assert!(Disjoint::is_disjoint(&a, &jan_11_20()));
  }

  #[test]
  fn test_ser_de_period() {
    assert_tokens(&jan_1_10(), &[
      Token::Tuple { len: 4 },
      Token::Str("2023-01-01T00:00:00.000Z"),
      Token::Str("2023-01-10T00:00:00.000Z"),
      Token::Str("day"),
      Token::None,
      Token::TupleEnd
    ]);
    assert_tokens(&jan_1_10().with_interval(Interval::weeks(1)), &[
      Token::Tuple { len: 4 },
      Token::Str("2023-01-01T00:00:00.000Z"),
      Token::Str("2023-01-10T00:00:00.000Z"),
      Token::Str("day"),
      Token::Some,
      Token::Tuple { len: 5 },
      Token::I64(0), Token::I64(0), Token::I64(0), Token::I64(1), Token::I64(0),
      Token::TupleEnd,
      Token::TupleEnd
    ]);
  }

  fn arb_precision() -> impl Strategy<Value = Precision> {
    prop::sample::select(Precision::ALL.to_vec())
  }

  // Well-formed periods between 1970 and 2096 lasting at least one millisecond.
  fn arb_period() -> impl Strategy<Value = Period> {
    (0i64..4_000_000_000_000, 1i64..400_000_000_000, arb_precision())
      .prop_map(|(start, length, precision)| {
        Period::new(start.to_instant().unwrap(), (start + length).to_instant().unwrap(), precision)
      })
  }

  proptest! {
    #[test]
    fn overlap_is_symmetric(a in arb_period(), b in arb_period()) {
      prop_assert_eq!(a.overlaps_with(&b), b.overlaps_with(&a));
    }

    #[test]
    fn overlapping_periods_are_not_adjacent(a in arb_period(), b in arb_period()) {
      if a.overlaps_with(&b) {
        prop_assert!(!a.is_adjacent_to(&b));
      }
    }

    #[test]
    fn gap_is_shrunk_by_one_unit(a in arb_period(), b in arb_period()) {
      if !a.overlaps_with(&b) && !a.is_adjacent_to(&b) {
        let gap = a.gap(&b).unwrap();
        let unit = a.precision().to_duration();
        prop_assert_eq!(gap.start(), min(a.end(), b.end()) + unit);
        prop_assert_eq!(gap.end(), max(a.start(), b.start()) - unit);
      }
      else {
        prop_assert_eq!(a.gap(&b), None);
      }
    }

    #[test]
    fn union_is_idempotent(a in arb_period()) {
      prop_assert_eq!(a.union(&a), vec![a.clone().without_interval()]);
    }

    #[test]
    fn subtract_and_overlap_cover_the_period(a in arb_period(), b in arb_period()) {
      let mut pieces = a.subtract(&b);
      pieces.extend(a.overlap(&b));
      prop_assert!(pieces.iter().all(|p| a.contains(&p.start()) && a.contains(&p.end())));
      prop_assert_eq!(pieces.iter().map(|p| p.start()).min(), Some(a.start()));
      prop_assert_eq!(pieces.iter().map(|p| p.end()).max(), Some(a.end()));
    }
  }
}
