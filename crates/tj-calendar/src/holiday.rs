//! Holiday records returned by calendar queries.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tj_core::ensure;
use tj_core::errors::Result;

/// The sphere a holiday belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HolidayCategory {
    /// Fixed-date national holiday.
    National,
    /// Fixed-date state holiday.
    Regional,
    /// Fixed-date municipal holiday, configured per calendar instance.
    Municipal,
    /// Easter-derived feast (Carnival, Good Friday, Easter, Corpus
    /// Christi).
    Movable,
}

impl std::fmt::Display for HolidayCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HolidayCategory::National => "national",
            HolidayCategory::Regional => "regional",
            HolidayCategory::Municipal => "municipal",
            HolidayCategory::Movable => "movable",
        };
        write!(f, "{s}")
    }
}

/// A dated, labeled holiday as reported by
/// [`BusinessCalendar::holiday_on`](crate::BusinessCalendar::holiday_on)
/// and [`holiday_list`](crate::BusinessCalendar::holiday_list).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The calendar date the holiday is observed on.
    pub date: NaiveDate,
    /// Human-readable name (e.g. `"Corpus Christi"`).
    pub name: String,
    /// Which sphere declared it.
    pub category: HolidayCategory,
}

impl Holiday {
    /// Convenience constructor.
    pub fn new(date: NaiveDate, name: impl Into<String>, category: HolidayCategory) -> Self {
        Self {
            date,
            name: name.into(),
            category,
        }
    }
}

/// A recurring month/day holiday, used to configure municipal additions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedHoliday {
    /// Month, 1–12.
    pub month: u32,
    /// Day of month, 1–31.
    pub day: u32,
    /// Human-readable name.
    pub name: String,
}

impl FixedHoliday {
    /// Create a fixed month/day holiday, validating the pair.
    ///
    /// February 29 is accepted; it is simply never observed outside leap
    /// years.
    pub fn new(month: u32, day: u32, name: impl Into<String>) -> Result<Self> {
        ensure!((1..=12).contains(&month), "month {month} out of range [1, 12]");
        let max_day = match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            _ => 29,
        };
        ensure!(
            (1..=max_day).contains(&day),
            "day {day} out of range [1, {max_day}] for month {month}"
        );
        Ok(Self {
            month,
            day,
            name: name.into(),
        })
    }

    /// Whether this holiday falls on `date`.
    pub fn matches(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.day() == self.day
    }
}
