use std::sync::LazyLock;

use regex::Regex;

use super::{
  Calendar, CalendarKind, GREGORIAN_MONTHS, escape_regex, strip_marker,
  suffix_regex,
};
use crate::ymd::MonthTable;

// "OS" is Old Style.
static SUFFIX: LazyLock<Regex> =
  LazyLock::new(|| suffix_regex("JU|J|Julian|OS"));
static ESCAPE: LazyLock<Regex> = LazyLock::new(|| escape_regex("JULIAN"));

/// Proleptic Julian calendar. Same month names as the Gregorian one.
pub struct Julian;

impl Calendar for Julian {
  fn kind(&self) -> CalendarKind { CalendarKind::Julian }

  fn display_name(&self) -> &'static str { "Julian" }

  fn months(&self) -> &'static MonthTable { &GREGORIAN_MONTHS }

  fn is_a(&self, text: &str) -> Option<String> {
    strip_marker(text, &SUFFIX, &ESCAPE)
  }

  fn to_day_count(&self, year: i32, month: i32, day: i32) -> i64 {
    let (year, month, day) = (i64::from(year), i64::from(month), i64::from(day));
    let a = (14 - month).div_euclid(12);
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;
    day + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4) - 32083
  }

  fn from_day_count(&self, day_count: i64) -> (i32, i32, i32) {
    let j = day_count + 32082;
    let b = j.div_euclid(1461);
    let db = j.rem_euclid(1461);
    let a = (db / 365 + 1) * 3 / 4;
    let da = db - a * 365;
    let y = b * 4 + a;
    let m = (da * 5 + 308) / 153 - 2;
    let d = da - (m + 4) * 153 / 5 + 122;
    (
      (y - 4800 + (m + 2) / 12) as i32,
      ((m + 2) % 12 + 1) as i32,
      (d + 1) as i32,
    )
  }
}
