//! `BusinessCalendar` trait and generic calendar implementations.
//!
//! A calendar knows which dates are working days (dias úteis) and can
//! navigate between them. Every operation is pure: for a fixed holiday
//! configuration the same input always yields the same output, and no
//! operation can fail.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};

use crate::holiday::Holiday;

/// First hour of the municipal working day (inclusive).
pub const BUSINESS_HOURS_START: u32 = 8;

/// First hour after the municipal working day (exclusive).
pub const BUSINESS_HOURS_END: u32 = 18;

/// A municipal working-day calendar.
///
/// Implementors supply [`holiday_on`](Self::holiday_on); the navigation
/// and counting operations are derived from it. Weekends are excluded
/// independently of holidays, so a holiday landing on a Saturday is not
/// "double counted"; both conditions simply OR into the same exclusion.
pub trait BusinessCalendar: std::fmt::Debug + Send + Sync {
    /// Human-readable name (e.g. `"Jardim (MS)"`).
    fn name(&self) -> &str;

    /// The holiday observed on `date`, if any.
    ///
    /// Weekends are not holidays; this reports declared holidays only.
    fn holiday_on(&self, date: NaiveDate) -> Option<Holiday>;

    /// Return `true` if `date` is a declared holiday.
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holiday_on(date).is_some()
    }

    /// Return `true` if `date` falls on a Saturday or Sunday.
    fn is_weekend(&self, date: NaiveDate) -> bool {
        matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Return `true` if `date` is a working day (not a weekend, not a
    /// holiday).
    fn is_working_day(&self, date: NaiveDate) -> bool {
        !self.is_weekend(date) && !self.is_holiday(date)
    }

    /// The first working day at or after `date`.
    ///
    /// Returns `date` unchanged when it is already a working day.
    /// Terminates because holidays are finite within any year and
    /// weekends recur weekly.
    fn next_working_day(&self, date: NaiveDate) -> NaiveDate {
        let mut d = date;
        while !self.is_working_day(d) {
            d = d.succ_opt().expect("calendar date range exhausted");
        }
        d
    }

    /// The first working day at or before `date`.
    fn previous_working_day(&self, date: NaiveDate) -> NaiveDate {
        let mut d = date;
        while !self.is_working_day(d) {
            d = d.pred_opt().expect("calendar date range exhausted");
        }
        d
    }

    /// Number of working days in the **inclusive** range `[start, end]`.
    ///
    /// Returns 0 when `start > end`.
    fn count_working_days(&self, start: NaiveDate, end: NaiveDate) -> u32 {
        if start > end {
            return 0;
        }
        let mut count = 0;
        let mut d = start;
        while d <= end {
            if self.is_working_day(d) {
                count += 1;
            }
            d = d.succ_opt().expect("calendar date range exhausted");
        }
        count
    }

    /// Advance `date` by exactly `n` working days, skipping weekends and
    /// holidays. `n == 0` returns `date` unchanged.
    fn add_working_days(&self, date: NaiveDate, n: u32) -> NaiveDate {
        let mut d = date;
        let mut remaining = n;
        while remaining > 0 {
            d = d.succ_opt().expect("calendar date range exhausted");
            if self.is_working_day(d) {
                remaining -= 1;
            }
        }
        d
    }

    /// Return `true` if `moment` falls within municipal business hours
    /// (08:00–18:00 on a working day).
    fn is_business_hours(&self, moment: NaiveDateTime) -> bool {
        self.is_business_hours_between(moment, BUSINESS_HOURS_START, BUSINESS_HOURS_END)
    }

    /// [`is_business_hours`](Self::is_business_hours) with explicit hour
    /// bounds: `start_hour <= hour < end_hour`.
    fn is_business_hours_between(
        &self,
        moment: NaiveDateTime,
        start_hour: u32,
        end_hour: u32,
    ) -> bool {
        if !self.is_working_day(moment.date()) {
            return false;
        }
        let h = moment.hour();
        start_hour <= h && h < end_hour
    }

    /// The earliest business moment at or after `moment`.
    ///
    /// * non-working day: the next working day at 08:00;
    /// * working day before opening: the same day at 08:00;
    /// * working day at or after closing: the next working day after
    ///   tomorrow's search start, at 08:00;
    /// * otherwise `moment` itself.
    fn next_business_moment(&self, moment: NaiveDateTime) -> NaiveDateTime {
        let date = moment.date();
        if !self.is_working_day(date) {
            return at_opening(self.next_working_day(date));
        }
        let hour = moment.hour();
        if hour < BUSINESS_HOURS_START {
            return at_opening(date);
        }
        if hour >= BUSINESS_HOURS_END {
            let tomorrow = date.succ_opt().expect("calendar date range exhausted");
            return at_opening(self.next_working_day(tomorrow));
        }
        moment
    }

    /// Every holiday observed in `year`, ascending by date, labeled with
    /// name and category.
    ///
    /// The default implementation scans the year day by day; concrete
    /// calendars with known holiday tables may enumerate directly.
    fn holiday_list(&self, year: i32) -> Vec<Holiday> {
        let mut out = Vec::new();
        let mut d = NaiveDate::from_ymd_opt(year, 1, 1).expect("January 1st always exists");
        while d.year() == year {
            if let Some(h) = self.holiday_on(d) {
                out.push(h);
            }
            match d.succ_opt() {
                Some(next) => d = next,
                None => break,
            }
        }
        out
    }
}

/// 08:00:00 on the given date.
fn at_opening(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(BUSINESS_HOURS_START, 0, 0)
        .expect("opening hour is a valid time of day")
}

/// A calendar with no holidays at all: weekends are the only
/// non-working days. Useful as a fixture and as the simplest possible
/// implementor.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendsOnly;

impl BusinessCalendar for WeekendsOnly {
    fn name(&self) -> &str {
        "Weekends Only"
    }

    fn holiday_on(&self, _date: NaiveDate) -> Option<Holiday> {
        None
    }
}

/// A calendar where every day is a working day, weekends included.
///
/// Used by tests that want alert evaluation without any business-day
/// gating effects.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOpen;

impl BusinessCalendar for AlwaysOpen {
    fn name(&self) -> &str {
        "Always Open"
    }

    fn holiday_on(&self, _date: NaiveDate) -> Option<Holiday> {
        None
    }

    fn is_weekend(&self, _date: NaiveDate) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn moment(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn weekends_only_saturday() {
        let cal = WeekendsOnly;
        // 2024-06-15 is a Saturday
        assert!(!cal.is_working_day(date(2024, 6, 15)));
        assert!(cal.is_working_day(date(2024, 6, 17)));
    }

    #[test]
    fn always_open_ignores_weekends() {
        let cal = AlwaysOpen;
        assert!(cal.is_working_day(date(2024, 6, 15)));
        assert!(cal.is_working_day(date(2024, 6, 16)));
    }

    #[test]
    fn next_working_day_skips_weekend() {
        let cal = WeekendsOnly;
        // Saturday → Monday
        assert_eq!(cal.next_working_day(date(2024, 6, 15)), date(2024, 6, 17));
        // Friday stays put
        assert_eq!(cal.next_working_day(date(2024, 6, 14)), date(2024, 6, 14));
    }

    #[test]
    fn previous_working_day_skips_weekend() {
        let cal = WeekendsOnly;
        // Sunday → Friday
        assert_eq!(
            cal.previous_working_day(date(2024, 6, 16)),
            date(2024, 6, 14)
        );
    }

    #[test]
    fn count_working_days_inclusive() {
        let cal = WeekendsOnly;
        // Mon 2024-06-10 .. Fri 2024-06-14
        assert_eq!(cal.count_working_days(date(2024, 6, 10), date(2024, 6, 14)), 5);
        // Across a weekend: Fri .. Mon
        assert_eq!(cal.count_working_days(date(2024, 6, 14), date(2024, 6, 17)), 2);
        // Inverted range
        assert_eq!(cal.count_working_days(date(2024, 6, 14), date(2024, 6, 10)), 0);
        // Single working day counts itself
        assert_eq!(cal.count_working_days(date(2024, 6, 12), date(2024, 6, 12)), 1);
        // Single non-working day counts nothing
        assert_eq!(cal.count_working_days(date(2024, 6, 15), date(2024, 6, 15)), 0);
    }

    #[test]
    fn add_working_days_skips_weekend() {
        let cal = WeekendsOnly;
        // Thu + 2 working days = Monday
        assert_eq!(cal.add_working_days(date(2024, 6, 13), 2), date(2024, 6, 17));
        // Zero is the identity, even from a Saturday
        assert_eq!(cal.add_working_days(date(2024, 6, 15), 0), date(2024, 6, 15));
        // Saturday + 1 working day = Monday
        assert_eq!(cal.add_working_days(date(2024, 6, 15), 1), date(2024, 6, 17));
    }

    #[test]
    fn business_hours_bounds() {
        let cal = WeekendsOnly;
        assert!(!cal.is_business_hours(moment(2024, 6, 12, 7, 59)));
        assert!(cal.is_business_hours(moment(2024, 6, 12, 8, 0)));
        assert!(cal.is_business_hours(moment(2024, 6, 12, 17, 59)));
        assert!(!cal.is_business_hours(moment(2024, 6, 12, 18, 0)));
        // Saturday inside the hour window is still not business hours
        assert!(!cal.is_business_hours(moment(2024, 6, 15, 10, 0)));
    }

    #[test]
    fn business_hours_custom_bounds() {
        let cal = WeekendsOnly;
        assert!(cal.is_business_hours_between(moment(2024, 6, 12, 6, 30), 6, 12));
        assert!(!cal.is_business_hours_between(moment(2024, 6, 12, 12, 0), 6, 12));
    }

    #[test]
    fn next_business_moment_transitions() {
        let cal = WeekendsOnly;
        // Inside business hours: unchanged
        let inside = moment(2024, 6, 12, 10, 30);
        assert_eq!(cal.next_business_moment(inside), inside);
        // Before opening on a working day: same day 08:00
        assert_eq!(
            cal.next_business_moment(moment(2024, 6, 12, 6, 0)),
            moment(2024, 6, 12, 8, 0)
        );
        // After closing on a Friday: Monday 08:00
        assert_eq!(
            cal.next_business_moment(moment(2024, 6, 14, 19, 0)),
            moment(2024, 6, 17, 8, 0)
        );
        // Saturday afternoon: Monday 08:00
        assert_eq!(
            cal.next_business_moment(moment(2024, 6, 15, 15, 0)),
            moment(2024, 6, 17, 8, 0)
        );
    }

    #[test]
    fn holiday_list_empty_for_weekends_only() {
        assert!(WeekendsOnly.holiday_list(2024).is_empty());
    }
}
