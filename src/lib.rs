// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar Period Module
//!
//! This crate provides calendar-aware time-interval algebra: an immutable
//! half-open span `[start, end)` over zoned instants, with shifting,
//! extension, clamped trimming, and pairwise union/intersection.
//!
//! # Core types
//!
//! - [`Period<T>`] — half-open interval over any [`CalendarInstant`].
//! - [`CalendarInstant`] — trait for points in time with duration *and*
//!   calendar arithmetic, implemented for `chrono::DateTime<Z>`.
//! - [`Clock`] — injectable "now" capability used by the current-unit
//!   constructors ([`Period::this_hour`], [`Period::today`], …).
//! - [`SystemClock`] / [`FixedClock`] — the OS-backed clock and its
//!   deterministic test double.
//! - [`PeriodError`] — the single failure kind: combinator operands that
//!   do not overlap.
//! - [`UtcPeriod`] / [`ZonedPeriod`] — aliases for the common instantiations.
//!
//! # Semantics
//!
//! - **Half-open**: an instant `t` belongs to a period iff
//!   `start <= t < end`; `start == end` is the canonical empty period.
//! - **Touching periods overlap**: the combinators treat `left.end ==
//!   right.start` as overlap, so touching periods unite to their exact
//!   concatenation and intersect to a valid empty period — not a failure.
//! - **Trims clamp**: trimming more than the remaining span collapses to a
//!   zero-length period at the approached bound; a trim never produces an
//!   inverted interval.
//! - **Calendar arithmetic normalizes**: out-of-range days roll into the
//!   following month (January 31st plus one month lands in early March),
//!   and a calendar day keeps its calendar length across DST transitions.
//!
//! # Quick example
//!
//! ```
//! use calspan::{FixedClock, Period};
//! use chrono::{Duration, TimeZone, Utc};
//!
//! let now = Utc.with_ymd_and_hms(2024, 3, 15, 14, 42, 0).unwrap();
//! let today = Period::today(&FixedClock::new(now));
//! assert!(today.contains(now));
//!
//! let t = |h, m| Utc.with_ymd_and_hms(2024, 3, 15, h, m, 0).unwrap();
//! let review = Period::from_duration(t(9, 30), Duration::hours(1));
//! let standup = Period::from_duration(t(10, 0), Duration::hours(1));
//!
//! let overlap = review.try_intersection(&standup).unwrap();
//! assert_eq!(overlap.duration(), Duration::minutes(30));
//! ```

mod clock;
mod instant;
mod period;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use clock::{Clock, FixedClock, SystemClock};
pub use instant::CalendarInstant;
pub use period::{Period, PeriodError};

// ── Common instantiations ─────────────────────────────────────────────────

/// A period over UTC instants.
pub type UtcPeriod = Period<chrono::DateTime<chrono::Utc>>;

/// A period over instants in an IANA time zone.
pub type ZonedPeriod = Period<chrono::DateTime<chrono_tz::Tz>>;
