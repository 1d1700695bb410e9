// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! This library implements an algebra on calendar periods: closed ranges of instants `[start, end]` tagged with a precision (minute, hour, day, week, month or year). Two periods can be intersected, subtracted, merged, compared for adjacency and the space between them can be computed. A second part of the library walks calendar-aligned sequences of instants, stepped by an [`Interval`](interval/struct.Interval.html), such as "every 2 weeks, aligned on Sundays" or "every quarter, aligned on the first of the month".
//!
//! # Examples
//!
//! ```rust
//! use period::{Period, Precision};
//!
//! let january = Period::parse("2023-01-01", "2023-01-10", Precision::Day).unwrap();
//! let booking = Period::parse("2023-01-05", "2023-01-15", Precision::Day).unwrap();
//!
//! let shared = january.overlap(&booking).unwrap();
//! assert_eq!(shared.to_string(), "[2023-01-05T00:00:00.000Z, 2023-01-10T00:00:00.000Z]");
//!
//! let free = january.subtract(&booking);
//! assert_eq!(free.len(), 1);
//! assert_eq!(free[0].to_string(), "[2023-01-01T00:00:00.000Z, 2023-01-04T23:59:59.999Z]");
//! ```
//!
//! All arithmetic happens on absolute instants. Most calendar snapping uses UTC fields, but a few routines (`hours_with_interval`, `Period::months_in_interval`, `Period::years_in_interval`) read the fields of the local zone; each has an `_in` variant taking an explicit zone.
//!
//! # See also
//! * [interval module](interval/index.html) for step sizes.
//! * [stepping module](stepping/index.html) for the date generators.

pub mod boundary;
pub mod calendar;
pub mod error;
pub mod instant;
pub mod interval;
pub mod ops;
pub mod period;
pub mod precision;
pub mod stepping;

pub use crate::boundary::{BoundaryPolicy, Epsilon};
pub use crate::error::{Error, Result};
pub use crate::instant::ToInstant;
pub use crate::interval::Interval;
pub use crate::period::Period;
pub use crate::precision::Precision;
