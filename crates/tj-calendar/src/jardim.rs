//! Municipal calendar for Jardim (MS).
//!
//! Weekends and the following holidays are observed:
//! * Confraternização Universal (Jan 1)
//! * Carnival Tuesday (Easter − 47)
//! * Feriado Estadual (Mar 25)
//! * Good Friday (Easter − 2)
//! * Easter Sunday
//! * Tiradentes (Apr 21)
//! * Corpus Christi (Easter + 60)
//! * Independence Day (Sep 7)
//! * Nossa Senhora Aparecida (Oct 12)
//! * Finados (Nov 2)
//! * Proclamação da República (Nov 15)
//! * Natal (Dec 25)
//!
//! plus any fixed-date municipal holidays configured at construction
//! time (none by default).

use chrono::{Datelike, Duration, NaiveDate};

use crate::calendar::BusinessCalendar;
use crate::easter::{self, easter_sunday};
use crate::holiday::{FixedHoliday, Holiday, HolidayCategory};

/// Fixed-date national holidays (month, day, name).
const NATIONAL_HOLIDAYS: [(u32, u32, &str); 7] = [
    (1, 1, "Confraternização Universal"),
    (4, 21, "Tiradentes"),
    (9, 7, "Independência do Brasil"),
    (10, 12, "Nossa Senhora Aparecida"),
    (11, 2, "Finados"),
    (11, 15, "Proclamação da República"),
    (12, 25, "Natal"),
];

/// Fixed-date state holidays (month, day, name).
const REGIONAL_HOLIDAYS: [(u32, u32, &str); 1] = [(3, 25, "Feriado Estadual")];

/// Easter-derived feasts (day offset from Easter Sunday, name).
const MOVABLE_FEASTS: [(i64, &str); 4] = [
    (easter::CARNIVAL_OFFSET, "Carnaval"),
    (easter::GOOD_FRIDAY_OFFSET, "Sexta-feira Santa"),
    (0, "Páscoa"),
    (easter::CORPUS_CHRISTI_OFFSET, "Corpus Christi"),
];

/// The working-day calendar of the municipality of Jardim.
///
/// Holds only the configured municipal additions; the national,
/// regional, and movable sets are constants. Two instances with the
/// same municipal configuration are interchangeable.
#[derive(Debug, Clone, Default)]
pub struct JardimCalendar {
    municipal: Vec<FixedHoliday>,
}

impl JardimCalendar {
    /// Calendar with no municipal additions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calendar with the given municipal holidays.
    pub fn with_municipal_holidays(municipal: Vec<FixedHoliday>) -> Self {
        Self { municipal }
    }

    /// Add a municipal holiday.
    pub fn add_municipal_holiday(&mut self, holiday: FixedHoliday) {
        self.municipal.push(holiday);
    }

    /// The configured municipal holidays.
    pub fn municipal_holidays(&self) -> &[FixedHoliday] {
        &self.municipal
    }
}

impl BusinessCalendar for JardimCalendar {
    fn name(&self) -> &str {
        "Jardim (MS)"
    }

    fn holiday_on(&self, date: NaiveDate) -> Option<Holiday> {
        let (m, d) = (date.month(), date.day());

        for &(hm, hd, name) in &NATIONAL_HOLIDAYS {
            if m == hm && d == hd {
                return Some(Holiday::new(date, name, HolidayCategory::National));
            }
        }
        for &(hm, hd, name) in &REGIONAL_HOLIDAYS {
            if m == hm && d == hd {
                return Some(Holiday::new(date, name, HolidayCategory::Regional));
            }
        }
        for fixed in &self.municipal {
            if fixed.matches(date) {
                return Some(Holiday::new(
                    date,
                    fixed.name.clone(),
                    HolidayCategory::Municipal,
                ));
            }
        }

        // Movable feasts derive from the queried date's own year.
        let easter = easter_sunday(date.year());
        for &(offset, name) in &MOVABLE_FEASTS {
            if date == easter + Duration::days(offset) {
                return Some(Holiday::new(date, name, HolidayCategory::Movable));
            }
        }
        None
    }

    /// Enumerates directly from the holiday tables instead of scanning
    /// the year. When a movable feast lands on a fixed date (Good Friday
    /// on March 25, as in 2016) both entries are listed.
    fn holiday_list(&self, year: i32) -> Vec<Holiday> {
        let mut out = Vec::new();

        for &(m, d, name) in &NATIONAL_HOLIDAYS {
            if let Some(date) = NaiveDate::from_ymd_opt(year, m, d) {
                out.push(Holiday::new(date, name, HolidayCategory::National));
            }
        }
        for &(m, d, name) in &REGIONAL_HOLIDAYS {
            if let Some(date) = NaiveDate::from_ymd_opt(year, m, d) {
                out.push(Holiday::new(date, name, HolidayCategory::Regional));
            }
        }
        for fixed in &self.municipal {
            if let Some(date) = NaiveDate::from_ymd_opt(year, fixed.month, fixed.day) {
                out.push(Holiday::new(
                    date,
                    fixed.name.clone(),
                    HolidayCategory::Municipal,
                ));
            }
        }
        let easter = easter_sunday(year);
        for &(offset, name) in &MOVABLE_FEASTS {
            out.push(Holiday::new(
                easter + Duration::days(offset),
                name,
                HolidayCategory::Movable,
            ));
        }

        out.sort_by_key(|h| h.date);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_years_day() {
        let cal = JardimCalendar::new();
        assert!(!cal.is_working_day(date(2024, 1, 1)));
        assert_eq!(
            cal.holiday_on(date(2024, 1, 1)).unwrap().category,
            HolidayCategory::National
        );
    }

    #[test]
    fn carnival_2023() {
        // Easter 2023: April 9 → Carnival Tuesday February 21
        let cal = JardimCalendar::new();
        assert!(!cal.is_working_day(date(2023, 2, 21)));
        let h = cal.holiday_on(date(2023, 2, 21)).unwrap();
        assert_eq!(h.name, "Carnaval");
        assert_eq!(h.category, HolidayCategory::Movable);
    }

    #[test]
    fn good_friday_2023() {
        let cal = JardimCalendar::new();
        assert!(!cal.is_working_day(date(2023, 4, 7)));
    }

    #[test]
    fn corpus_christi_2024() {
        let cal = JardimCalendar::new();
        // Easter 2024: March 31 → Corpus Christi May 30 (a Thursday)
        assert!(!cal.is_working_day(date(2024, 5, 30)));
    }

    #[test]
    fn tiradentes_day() {
        let cal = JardimCalendar::new();
        assert!(!cal.is_working_day(date(2023, 4, 21)));
    }

    #[test]
    fn regional_holiday() {
        let cal = JardimCalendar::new();
        assert!(!cal.is_working_day(date(2024, 3, 25)));
        assert_eq!(
            cal.holiday_on(date(2024, 3, 25)).unwrap().category,
            HolidayCategory::Regional
        );
    }

    #[test]
    fn municipal_extension() {
        let mut cal = JardimCalendar::new();
        // 2024-10-07 is a Monday and no default holiday
        assert!(cal.is_working_day(date(2024, 10, 7)));

        cal.add_municipal_holiday(FixedHoliday::new(10, 7, "Aniversário de Jardim").unwrap());
        assert!(!cal.is_working_day(date(2024, 10, 7)));
        let h = cal.holiday_on(date(2024, 10, 7)).unwrap();
        assert_eq!(h.category, HolidayCategory::Municipal);
        assert_eq!(h.name, "Aniversário de Jardim");
    }

    #[test]
    fn normal_business_day() {
        let cal = JardimCalendar::new();
        // 2024-06-12 is a Wednesday with nothing special
        assert!(cal.is_working_day(date(2024, 6, 12)));
        assert!(cal.holiday_on(date(2024, 6, 12)).is_none());
    }

    #[test]
    fn labour_day_is_not_observed() {
        // The dashboard's holiday table does not include May 1.
        let cal = JardimCalendar::new();
        // 2024-05-01 is a Wednesday
        assert!(cal.is_working_day(date(2024, 5, 1)));
    }

    #[test]
    fn holiday_list_2024() {
        let cal = JardimCalendar::new();
        let list = cal.holiday_list(2024);
        assert_eq!(list.len(), 12);

        // Sorted ascending
        for pair in list.windows(2) {
            assert!(pair[0].date <= pair[1].date);
        }

        // Every movable feast derives from 2024's Easter
        let movables: Vec<_> = list
            .iter()
            .filter(|h| h.category == HolidayCategory::Movable)
            .collect();
        assert_eq!(movables.len(), 4);
        assert_eq!(movables[0].date, date(2024, 2, 13)); // Carnaval
        assert_eq!(movables[1].date, date(2024, 3, 29)); // Sexta-feira Santa
        assert_eq!(movables[2].date, date(2024, 3, 31)); // Páscoa
        assert_eq!(movables[3].date, date(2024, 5, 30)); // Corpus Christi
    }

    #[test]
    fn holiday_list_keeps_coinciding_entries() {
        // Easter 2016: March 27 → Good Friday lands on March 25, the
        // regional holiday. Both entries must be listed.
        let cal = JardimCalendar::new();
        let list = cal.holiday_list(2016);
        assert_eq!(list.len(), 12);
        let on_mar_25: Vec<_> = list.iter().filter(|h| h.date == date(2016, 3, 25)).collect();
        assert_eq!(on_mar_25.len(), 2);
    }

    #[test]
    fn municipal_feb_29_only_in_leap_years() {
        let cal = JardimCalendar::with_municipal_holidays(vec![FixedHoliday::new(
            2,
            29,
            "Feriado Bissexto",
        )
        .unwrap()]);
        assert_eq!(cal.holiday_list(2024).len(), 13);
        assert_eq!(cal.holiday_list(2025).len(), 12);
    }
}
