//! Easter computation and the movable feasts derived from it.
//!
//! Uses Butcher's algorithm for the Gregorian calendar, which yields
//! Easter Sunday as an exact proleptic-Gregorian date. The Brazilian
//! movable holidays are fixed day offsets from that Sunday.

use chrono::{Duration, NaiveDate};

/// Day offset of Carnival (terça-feira de Carnaval) from Easter Sunday.
pub const CARNIVAL_OFFSET: i64 = -47;

/// Day offset of Good Friday from Easter Sunday.
pub const GOOD_FRIDAY_OFFSET: i64 = -2;

/// Day offset of Corpus Christi from Easter Sunday.
pub const CORPUS_CHRISTI_OFFSET: i64 = 60;

/// Easter Sunday of `year`, per Butcher's Gregorian algorithm.
///
/// The result always falls between March 22 and April 25.
pub fn easter_sunday(year: i32) -> NaiveDate {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
        .expect("Butcher's algorithm yields a valid March or April date")
}

/// Carnival Tuesday of `year` (Easter − 47 days).
pub fn carnival(year: i32) -> NaiveDate {
    easter_sunday(year) + Duration::days(CARNIVAL_OFFSET)
}

/// Good Friday of `year` (Easter − 2 days).
pub fn good_friday(year: i32) -> NaiveDate {
    easter_sunday(year) + Duration::days(GOOD_FRIDAY_OFFSET)
}

/// Corpus Christi of `year` (Easter + 60 days).
pub fn corpus_christi(year: i32) -> NaiveDate {
    easter_sunday(year) + Duration::days(CORPUS_CHRISTI_OFFSET)
}
