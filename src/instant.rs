// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar-capable instant abstraction.
//!
//! [`CalendarInstant`] is the point-on-the-timeline contract used by
//! [`Period`](crate::Period).  An instant is a `Copy`, totally ordered value
//! that supports two independent kinds of arithmetic:
//!
//! - **duration arithmetic** — adding/subtracting a fixed span
//!   ([`add_span`](CalendarInstant::add_span),
//!   [`sub_span`](CalendarInstant::sub_span),
//!   [`since`](CalendarInstant::since));
//! - **calendar arithmetic** — adding an offset expressed in years, months
//!   and days ([`add_calendar`](CalendarInstant::add_calendar)), which is
//!   *not* reducible to a duration because month and day lengths vary.
//!
//! On top of that the trait exposes the calendar-aligned boundaries
//! (`start_of_hour` … `start_of_year`) that the current-unit period
//! constructors are built from.
//!
//! The single implementation covers `chrono::DateTime<Z>` for every zone
//! with a `Copy` offset (`Utc`, `FixedOffset`, `chrono_tz::Tz`), so an
//! instant always carries its location and all wall-clock computations
//! happen in that location.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Timelike,
};

/// A point in time with duration and calendar arithmetic.
///
/// Types implementing this trait can be used as the bounds of a
/// [`Period`](crate::Period) and as the output of a [`Clock`](crate::Clock).
pub trait CalendarInstant: Copy + Clone + PartialEq + PartialOrd + Sized {
    /// The signed span type used for duration arithmetic.
    type Span: Copy + PartialOrd;

    /// The signed span from `other` to `self` (`self − other`).
    fn since(&self, other: &Self) -> Self::Span;

    /// Translate this instant forward by `span`.
    fn add_span(&self, span: Self::Span) -> Self;

    /// Translate this instant backward by `span`.
    fn sub_span(&self, span: Self::Span) -> Self;

    /// Translate this instant by a calendar offset.
    ///
    /// Out-of-range components normalize: a month count past December rolls
    /// into the following year, and a day past the end of the target month
    /// rolls into the following month.  Adding one month to January 31st
    /// therefore lands in early March, it is never clamped to February 28th.
    fn add_calendar(&self, years: i32, months: i32, days: i64) -> Self;

    /// The start of the hour containing this instant, in its location.
    fn start_of_hour(&self) -> Self;

    /// Midnight of the calendar day containing this instant, in its location.
    fn start_of_day(&self) -> Self;

    /// Midnight of the first day (day 0 = Sunday) of the week containing
    /// this instant, in its location.
    fn start_of_week(&self) -> Self;

    /// Midnight of the first day of the month containing this instant.
    fn start_of_month(&self) -> Self;

    /// Midnight of January 1st of the year containing this instant.
    fn start_of_year(&self) -> Self;
}

/// Map a wall-clock time back onto the timeline of `zone`.
///
/// A folded wall time (DST clock-back) resolves to its earliest occurrence.
/// A skipped wall time (DST clock-forward) rolls forward in half-hour steps
/// until the zone accepts it; transition gaps are bounded, so the probe
/// terminates.
fn resolve_local<Z: TimeZone>(zone: &Z, wall: NaiveDateTime) -> DateTime<Z> {
    match zone.from_local_datetime(&wall) {
        LocalResult::Single(instant) => instant,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let mut probe = wall;
            loop {
                probe += Duration::minutes(30);
                if let Some(instant) = zone.from_local_datetime(&probe).earliest() {
                    return instant;
                }
            }
        }
    }
}

impl<Z: TimeZone> CalendarInstant for DateTime<Z>
where
    Z::Offset: Copy,
{
    type Span = Duration;

    #[inline]
    fn since(&self, other: &Self) -> Duration {
        *self - *other
    }

    #[inline]
    fn add_span(&self, span: Duration) -> Self {
        *self + span
    }

    #[inline]
    fn sub_span(&self, span: Duration) -> Self {
        *self - span
    }

    fn add_calendar(&self, years: i32, months: i32, days: i64) -> Self {
        let wall = self.naive_local();

        // Normalize the month count first, then let day overflow spill into
        // the following month(s) by counting from the first of the month.
        let month_count = wall.year() as i64 * 12
            + wall.month0() as i64
            + years as i64 * 12
            + months as i64;
        let first = i32::try_from(month_count.div_euclid(12))
            .ok()
            .and_then(|y| NaiveDate::from_ymd_opt(y, month_count.rem_euclid(12) as u32 + 1, 1))
            .expect("calendar offset out of chrono's representable range");
        let date = first + Duration::days(wall.day() as i64 - 1 + days);

        resolve_local(&self.timezone(), date.and_time(wall.time()))
    }

    fn start_of_hour(&self) -> Self {
        let wall = self.naive_local();
        let aligned = wall
            .date()
            .and_hms_opt(wall.hour(), 0, 0)
            .expect("hour start is a valid wall time");
        resolve_local(&self.timezone(), aligned)
    }

    fn start_of_day(&self) -> Self {
        let aligned = self.naive_local().date().and_time(NaiveTime::MIN);
        resolve_local(&self.timezone(), aligned)
    }

    fn start_of_week(&self) -> Self {
        let into_week = self.weekday().num_days_from_sunday() as i64;
        self.start_of_day().add_calendar(0, 0, -into_week)
    }

    fn start_of_month(&self) -> Self {
        let wall = self.naive_local();
        let first = NaiveDate::from_ymd_opt(wall.year(), wall.month(), 1)
            .expect("first of the month is a valid date");
        resolve_local(&self.timezone(), first.and_time(NaiveTime::MIN))
    }

    fn start_of_year(&self) -> Self {
        let first =
            NaiveDate::from_ymd_opt(self.year(), 1, 1).expect("January 1st is a valid date");
        resolve_local(&self.timezone(), first.and_time(NaiveTime::MIN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use chrono_tz::America::New_York;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn span_arithmetic_roundtrips() {
        let t = utc(2024, 3, 15, 10, 0, 0);
        let later = t.add_span(Duration::minutes(90));
        assert_eq!(later.since(&t), Duration::minutes(90));
        assert_eq!(later.sub_span(Duration::minutes(90)), t);
    }

    #[test]
    fn add_calendar_plain_offsets() {
        let t = utc(2024, 3, 15, 10, 30, 0);
        assert_eq!(t.add_calendar(1, 0, 0), utc(2025, 3, 15, 10, 30, 0));
        assert_eq!(t.add_calendar(0, 2, 0), utc(2024, 5, 15, 10, 30, 0));
        assert_eq!(t.add_calendar(0, 0, 20), utc(2024, 4, 4, 10, 30, 0));
    }

    #[test]
    fn add_calendar_rolls_overflowing_days() {
        // Jan 31 + 1 month = Feb 31, which normalizes into March.
        let leap = utc(2024, 1, 31, 12, 0, 0);
        assert_eq!(leap.add_calendar(0, 1, 0), utc(2024, 3, 2, 12, 0, 0));

        let common = utc(2023, 1, 31, 12, 0, 0);
        assert_eq!(common.add_calendar(0, 1, 0), utc(2023, 3, 3, 12, 0, 0));
    }

    #[test]
    fn add_calendar_rolls_months_into_years() {
        let t = utc(2023, 11, 15, 0, 0, 0);
        assert_eq!(t.add_calendar(0, 3, 0), utc(2024, 2, 15, 0, 0, 0));
        assert_eq!(t.add_calendar(0, -11, 0), utc(2022, 12, 15, 0, 0, 0));
    }

    #[test]
    fn add_calendar_negative_month_rolls_forward_from_long_month() {
        // Mar 31 − 1 month = Feb 31, which normalizes to Mar 2 in a leap year.
        let t = utc(2024, 3, 31, 6, 0, 0);
        assert_eq!(t.add_calendar(0, -1, 0), utc(2024, 3, 2, 6, 0, 0));
    }

    #[test]
    fn start_of_units_truncate_in_utc() {
        let t = utc(2024, 3, 15, 14, 42, 31);
        assert_eq!(t.start_of_hour(), utc(2024, 3, 15, 14, 0, 0));
        assert_eq!(t.start_of_day(), utc(2024, 3, 15, 0, 0, 0));
        assert_eq!(t.start_of_month(), utc(2024, 3, 1, 0, 0, 0));
        assert_eq!(t.start_of_year(), utc(2024, 1, 1, 0, 0, 0));
    }

    #[test]
    fn start_of_week_lands_on_sunday() {
        // 2024-03-15 is a Friday; its week began Sunday 2024-03-10.
        let t = utc(2024, 3, 15, 14, 42, 31);
        assert_eq!(t.start_of_week(), utc(2024, 3, 10, 0, 0, 0));

        // A Sunday is its own week start.
        let sunday = utc(2024, 3, 10, 23, 59, 59);
        assert_eq!(sunday.start_of_week(), utc(2024, 3, 10, 0, 0, 0));
    }

    #[test]
    fn start_of_day_respects_fixed_offsets() {
        let zone = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
        let t = utc(2024, 3, 15, 1, 0, 0).with_timezone(&zone); // 06:30 local
        let midnight = t.start_of_day();
        assert_eq!(
            midnight.naive_local(),
            utc(2024, 3, 15, 0, 0, 0).naive_utc()
        );
        assert_eq!(midnight.timezone(), zone);
    }

    #[test]
    fn add_calendar_across_spring_forward_keeps_wall_time() {
        // New York sprang forward on 2024-03-10; 15:00 exists on both days.
        let before = New_York.with_ymd_and_hms(2024, 3, 9, 15, 0, 0).unwrap();
        let after = before.add_calendar(0, 0, 1);
        assert_eq!(
            after,
            New_York.with_ymd_and_hms(2024, 3, 10, 15, 0, 0).unwrap()
        );
        // The calendar day advanced by one but only 23 real hours elapsed.
        assert_eq!(after.since(&before), Duration::hours(23));
    }

    #[test]
    fn skipped_wall_time_rolls_forward_through_the_gap() {
        // 02:30 did not exist in New York on 2024-03-10.
        let before = New_York.with_ymd_and_hms(2024, 3, 9, 2, 30, 0).unwrap();
        let after = before.add_calendar(0, 0, 1);
        assert_eq!(
            after,
            New_York.with_ymd_and_hms(2024, 3, 10, 3, 0, 0).unwrap()
        );
    }

    #[test]
    fn folded_wall_time_resolves_to_earliest() {
        // 01:30 occurred twice in New York on 2024-11-03; take the first.
        let before = New_York.with_ymd_and_hms(2024, 11, 2, 1, 30, 0).unwrap();
        let after = before.add_calendar(0, 0, 1);
        let expected = New_York
            .with_ymd_and_hms(2024, 11, 3, 1, 30, 0)
            .earliest()
            .unwrap();
        assert_eq!(after, expected);
    }
}
