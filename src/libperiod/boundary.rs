// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Offsets applied at the boundaries cut by the period algebra.
//!
//! Periods are closed on both ends, so removing `[a, b]` from a period leaves fragments ending strictly before `a` and starting strictly after `b`. How far "strictly" reaches is the `cut` epsilon. Likewise `Period::gap` shrinks the space between two periods by the `gap` epsilon on each side. The default policy uses one millisecond for cuts, whatever the precision, and one precision unit for gaps.

use crate::precision::Precision;
use chrono::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Epsilon
{
  /// The same offset for every precision.
  Fixed(Duration),
  /// One unit of the precision of the period being cut.
  Precision
}

impl Epsilon
{
  pub fn offset(&self, precision: Precision) -> Duration {
    match *self {
      Epsilon::Fixed(offset) => offset,
      Epsilon::Precision => precision.to_duration()
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryPolicy
{
  pub cut: Epsilon,
  pub gap: Epsilon
}

impl BoundaryPolicy
{
  pub fn new(cut: Epsilon, gap: Epsilon) -> BoundaryPolicy {
    BoundaryPolicy { cut: cut, gap: gap }
  }

  pub fn cut_offset(&self, precision: Precision) -> Duration {
    self.cut.offset(precision)
  }

  pub fn gap_offset(&self, precision: Precision) -> Duration {
    self.gap.offset(precision)
  }
}

impl Default for BoundaryPolicy
{
  fn default() -> BoundaryPolicy {
    BoundaryPolicy::new(Epsilon::Fixed(Duration::milliseconds(1)), Epsilon::Precision)
  }
}
