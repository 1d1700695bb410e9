// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Failures of the period algebra.
//!
//! Operations that merely have "no result" (no overlap, no gap) return `None` or an empty vector; the variants below are contract violations by the caller.

use crate::precision::Precision;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error
{
  /// A precision tag outside of `minute`, `hour`, `day`, `week`, `month`, `year`.
  #[error("Unsupported precision: {0}")]
  UnsupportedPrecision(String),
  /// The interval given to a stepping generator would never move past its starting point.
  #[error("an interval of {minutes} minutes does not advance the {unit} stepper")]
  NonTerminatingStep {
    minutes: i64,
    unit: Precision
  },
  #[error("cannot read `{0}` as a date")]
  InvalidDate(String),
  #[error("date arithmetic out of the representable range")]
  OutOfRange
}

pub type Result<T> = std::result::Result<T, Error>;
