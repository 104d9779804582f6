// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time period / interval implementation.
//!
//! This module provides:
//! - [`Period<T>`]: an immutable half-open span `[start, end)` over any
//!   [`CalendarInstant`]
//! - [`PeriodError`]: the single failure kind, raised by the reporting
//!   combinators when their operands do not overlap
//!
//! Every operation returns a new value; a `Period` is never mutated.

use std::fmt;
use std::mem;

use chrono::{DateTime, Duration, TimeZone};
use thiserror::Error;

use crate::clock::Clock;
use crate::instant::CalendarInstant;

/// Failure raised by [`Period::union`] and [`Period::intersection`].
///
/// The `try_*` combinators signal the same condition with `None` instead;
/// callers that want to handle non-overlap locally should prefer them.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PeriodError {
    /// The operands of [`Period::union`] are strictly disjoint.
    #[error("periods to union does not overlap")]
    DisjointUnion,
    /// The operands of [`Period::intersection`] are strictly disjoint.
    #[error("periods to intersect does not overlap")]
    DisjointIntersection,
}

/// An immutable half-open time span `[start, end)`.
///
/// An instant `t` belongs to the period iff `start <= t < end`; a period
/// with `start == end` is empty and contains nothing.  Construction stores
/// the bounds verbatim — an inverted period (`start > end`) is representable,
/// and the trimming operations guarantee they never *produce* one.
///
/// # Examples
///
/// ```
/// use calspan::Period;
/// use chrono::{Duration, TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
/// let meeting = Period::from_duration(start, Duration::hours(1));
///
/// assert!(meeting.contains(start + Duration::minutes(59)));
/// assert!(!meeting.contains(meeting.end())); // half-open
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Period<T: CalendarInstant> {
    start: T,
    end: T,
}

impl<T: CalendarInstant> Period<T> {
    // ── constructors ──────────────────────────────────────────────────

    /// A period with the given bounds, stored verbatim.
    pub fn new(start: T, end: T) -> Self {
        Period { start, end }
    }

    /// A period starting at `start` and lasting `span`.
    ///
    /// # Examples
    ///
    /// ```
    /// use calspan::Period;
    /// use chrono::{Duration, TimeZone, Utc};
    ///
    /// let start = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
    /// let p = Period::from_duration(start, Duration::minutes(90));
    /// assert_eq!(p.duration(), Duration::minutes(90));
    /// ```
    pub fn from_duration(start: T, span: T::Span) -> Self {
        Period {
            start,
            end: start.add_span(span),
        }
    }

    /// A period starting at `start` and spanning a calendar offset.
    ///
    /// The end bound follows the calendar normalization of
    /// [`CalendarInstant::add_calendar`], so a one-month period starting
    /// January 31st ends in early March.
    pub fn from_calendar(start: T, years: i32, months: i32, days: i64) -> Self {
        Period {
            start,
            end: start.add_calendar(years, months, days),
        }
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// The inclusive start bound.
    #[inline]
    pub fn start(&self) -> T {
        self.start
    }

    /// The exclusive end bound.
    #[inline]
    pub fn end(&self) -> T {
        self.end
    }

    /// Both bounds as `(start, end)`.
    #[inline]
    pub fn bounds(&self) -> (T, T) {
        (self.start, self.end)
    }

    /// The signed span `end − start`; negative if the period is inverted.
    #[inline]
    pub fn duration(&self) -> T::Span {
        self.end.since(&self.start)
    }

    /// Whether `instant` falls inside the half-open span.
    #[inline]
    pub fn contains(&self, instant: T) -> bool {
        instant >= self.start && instant < self.end
    }

    // ── shifting ──────────────────────────────────────────────────────

    /// Translate both bounds forward by `span`.
    pub fn shift(&self, span: T::Span) -> Self {
        Period::new(self.start.add_span(span), self.end.add_span(span))
    }

    /// Translate both bounds by the same calendar offset.
    pub fn shift_calendar(&self, years: i32, months: i32, days: i64) -> Self {
        Period::new(
            self.start.add_calendar(years, months, days),
            self.end.add_calendar(years, months, days),
        )
    }

    /// Translate by whole calendar days.
    pub fn shift_days(&self, days: i64) -> Self {
        self.shift_calendar(0, 0, days)
    }

    /// Translate by whole calendar months.
    pub fn shift_months(&self, months: i32) -> Self {
        self.shift_calendar(0, months, 0)
    }

    /// Translate by whole calendar years.
    pub fn shift_years(&self, years: i32) -> Self {
        self.shift_calendar(years, 0, 0)
    }

    // ── extension ─────────────────────────────────────────────────────

    /// Move the start backward by `span`; the end is unchanged.
    ///
    /// A negative `span` shrinks the period instead; no clamping applies.
    pub fn extend_before(&self, span: T::Span) -> Self {
        Period::new(self.start.sub_span(span), self.end)
    }

    /// Move the end forward by `span`; the start is unchanged.
    pub fn extend_after(&self, span: T::Span) -> Self {
        Period::new(self.start, self.end.add_span(span))
    }

    /// Move the start backward by a calendar offset.
    ///
    /// The arguments are magnitudes; they are applied in the outward
    /// (past) direction.
    pub fn extend_calendar_before(&self, years: i32, months: i32, days: i64) -> Self {
        Period::new(self.start.add_calendar(-years, -months, -days), self.end)
    }

    /// Move the end forward by a calendar offset.
    pub fn extend_calendar_after(&self, years: i32, months: i32, days: i64) -> Self {
        Period::new(self.start, self.end.add_calendar(years, months, days))
    }

    // ── trimming ──────────────────────────────────────────────────────

    /// Move the start forward by `span`, clamped.
    ///
    /// If `span` exceeds the current [`duration`](Period::duration), the
    /// result collapses to the empty period `[end, end)` rather than
    /// overshooting past the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use calspan::Period;
    /// use chrono::{Duration, TimeZone, Utc};
    ///
    /// let start = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
    /// let p = Period::from_duration(start, Duration::hours(1));
    ///
    /// let trimmed = p.trim_before(Duration::hours(2));
    /// assert_eq!(trimmed.bounds(), (p.end(), p.end()));
    /// ```
    pub fn trim_before(&self, span: T::Span) -> Self {
        if span > self.duration() {
            return Period::new(self.end, self.end);
        }
        Period::new(self.start.add_span(span), self.end)
    }

    /// Move the end backward by `span`, clamped to `[start, start)`.
    pub fn trim_after(&self, span: T::Span) -> Self {
        if span > self.duration() {
            return Period::new(self.start, self.start);
        }
        Period::new(self.start, self.end.sub_span(span))
    }

    /// Move the start forward by a calendar offset, clamped.
    ///
    /// Calendar offsets have no fixed duration, so the clamp decision
    /// compares the shifted candidate start against the end bound directly:
    /// a candidate strictly past the end collapses to `[end, end)`.
    pub fn trim_calendar_before(&self, years: i32, months: i32, days: i64) -> Self {
        let candidate = self.start.add_calendar(years, months, days);
        if candidate > self.end {
            return Period::new(self.end, self.end);
        }
        Period::new(candidate, self.end)
    }

    /// Move the end backward by a calendar offset, clamped to `[start, start)`.
    ///
    /// The arguments are magnitudes applied toward the past.
    pub fn trim_calendar_after(&self, years: i32, months: i32, days: i64) -> Self {
        let candidate = self.end.add_calendar(-years, -months, -days);
        if candidate < self.start {
            return Period::new(self.start, self.start);
        }
        Period::new(self.start, candidate)
    }

    // ── pairwise combination ──────────────────────────────────────────

    /// The covering span of two overlapping periods, or `None` if they are
    /// strictly disjoint.
    ///
    /// Operands are first normalized so that `left` starts no later than
    /// `right`; the periods are disjoint iff `left.end() < right.start()`
    /// *strictly*.  Touching periods (`left.end() == right.start()`) are
    /// treated as overlapping, so their union is the exact concatenation.
    /// On success the result is `[left.start(), right.end())` — note that
    /// for nested operands this is the span up to the *later-starting*
    /// operand's end.
    ///
    /// # Examples
    ///
    /// ```
    /// use calspan::Period;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let t = |h| Utc.with_ymd_and_hms(2024, 3, 15, h, 0, 0).unwrap();
    /// let morning = Period::new(t(9), t(12));
    /// let midday = Period::new(t(12), t(14));
    ///
    /// // Touching periods concatenate.
    /// assert_eq!(morning.try_union(&midday), Some(Period::new(t(9), t(14))));
    ///
    /// let evening = Period::new(t(18), t(20));
    /// assert_eq!(morning.try_union(&evening), None);
    /// ```
    pub fn try_union(&self, other: &Self) -> Option<Self> {
        let (mut left, mut right) = (*self, *other);
        if left.start > right.start {
            mem::swap(&mut left, &mut right);
        }
        if left.end < right.start {
            return None;
        }
        Some(Period::new(left.start, right.end))
    }

    /// The overlap of two periods, or `None` if they are strictly disjoint.
    ///
    /// Uses the same normalization and the same strict disjointness test as
    /// [`try_union`](Period::try_union): touching periods overlap, and their
    /// intersection is the valid *empty* period at the shared bound — a
    /// `Some`, distinguishable from the disjoint `None`.  On success the
    /// result is `[right.start(), left.end())` — for nested operands this
    /// runs to the *earlier-starting* operand's end.
    ///
    /// # Examples
    ///
    /// ```
    /// use calspan::Period;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let t = |h| Utc.with_ymd_and_hms(2024, 3, 15, h, 0, 0).unwrap();
    /// let morning = Period::new(t(9), t(12));
    /// let midday = Period::new(t(12), t(14));
    ///
    /// let joint = morning.try_intersection(&midday).unwrap();
    /// assert_eq!(joint.bounds(), (t(12), t(12))); // empty, not a failure
    /// ```
    pub fn try_intersection(&self, other: &Self) -> Option<Self> {
        let (mut left, mut right) = (*self, *other);
        if left.start > right.start {
            mem::swap(&mut left, &mut right);
        }
        if left.end < right.start {
            return None;
        }
        Some(Period::new(right.start, left.end))
    }

    /// [`try_union`](Period::try_union), reporting disjoint operands as an
    /// error.
    pub fn union(&self, other: &Self) -> Result<Self, PeriodError> {
        self.try_union(other).ok_or(PeriodError::DisjointUnion)
    }

    /// [`try_intersection`](Period::try_intersection), reporting disjoint
    /// operands as an error.
    pub fn intersection(&self, other: &Self) -> Result<Self, PeriodError> {
        self.try_intersection(other)
            .ok_or(PeriodError::DisjointIntersection)
    }
}

// Duration-valued unit helpers.
impl<T: CalendarInstant<Span = Duration>> Period<T> {
    /// Translate by whole seconds.
    pub fn shift_seconds(&self, seconds: i64) -> Self {
        self.shift(Duration::seconds(seconds))
    }

    /// Translate by whole minutes.
    pub fn shift_minutes(&self, minutes: i64) -> Self {
        self.shift(Duration::minutes(minutes))
    }

    /// Translate by whole hours.
    pub fn shift_hours(&self, hours: i64) -> Self {
        self.shift(Duration::hours(hours))
    }
}

// Current calendar-unit constructors, driven by an explicit clock.
impl<Z: TimeZone> Period<DateTime<Z>>
where
    Z::Offset: Copy,
{
    /// The hour containing the clock's current instant: `[HH:00, HH:00 + 1h)`.
    pub fn this_hour<C>(clock: &C) -> Self
    where
        C: Clock<Instant = DateTime<Z>>,
    {
        Period::from_duration(clock.now().start_of_hour(), Duration::hours(1))
    }

    /// The calendar day containing the clock's current instant.
    ///
    /// The span is one *calendar* day, so on daylight-saving transition
    /// days it is 23 or 25 real hours long.
    pub fn today<C>(clock: &C) -> Self
    where
        C: Clock<Instant = DateTime<Z>>,
    {
        Period::from_calendar(clock.now().start_of_day(), 0, 0, 1)
    }

    /// The calendar week containing the clock's current instant.
    ///
    /// Weeks start on day 0 of the calendar's weekday numbering (Sunday);
    /// callers needing a different week start must offset externally.
    pub fn this_week<C>(clock: &C) -> Self
    where
        C: Clock<Instant = DateTime<Z>>,
    {
        Period::from_calendar(clock.now().start_of_week(), 0, 0, 7)
    }

    /// The calendar month containing the clock's current instant.
    pub fn this_month<C>(clock: &C) -> Self
    where
        C: Clock<Instant = DateTime<Z>>,
    {
        Period::from_calendar(clock.now().start_of_month(), 0, 1, 0)
    }

    /// The calendar year containing the clock's current instant.
    pub fn this_year<C>(clock: &C) -> Self
    where
        C: Clock<Instant = DateTime<Z>>,
    {
        Period::from_calendar(clock.now().start_of_year(), 1, 0, 0)
    }
}

// Display implementation
impl<T: CalendarInstant + fmt::Display> fmt::Display for Period<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
