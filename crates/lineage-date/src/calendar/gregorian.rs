use std::sync::LazyLock;

use regex::Regex;

use super::{
  Calendar, CalendarKind, Delta, Julian, Parsed, escape_regex, strip_marker,
  suffix_regex,
};
use crate::ymd::{MonthTable, parse_ymd};

pub static GREGORIAN_MONTHS: MonthTable = MonthTable {
  names:     &[
    ("jan", 1),
    ("january", 1),
    ("feb", 2),
    ("february", 2),
    ("mar", 3),
    ("march", 3),
    ("apr", 4),
    ("april", 4),
    ("may", 5),
    ("jun", 6),
    ("june", 6),
    ("jul", 7),
    ("july", 7),
    ("aug", 8),
    ("august", 8),
    ("sep", 9),
    ("sept", 9),
    ("september", 9),
    ("oct", 10),
    ("october", 10),
    ("nov", 11),
    ("november", 11),
    ("dec", 12),
    ("december", 12),
  ],
  max_month: 12,
  max_day:   31,
};

/// First day the Gregorian calendar is assumed to apply. Earlier dates with
/// a known year are read as Julian.
const CUTOVER: (i32, i32, i32) = (1582, 2, 25);

static SUFFIX: LazyLock<Regex> =
  LazyLock::new(|| suffix_regex("GR|G|Gregorian"));
static ESCAPE: LazyLock<Regex> = LazyLock::new(|| escape_regex("GREGORIAN"));

/// Proleptic Gregorian calendar.
pub struct Gregorian;

impl Calendar for Gregorian {
  fn kind(&self) -> CalendarKind { CalendarKind::Gregorian }

  fn display_name(&self) -> &'static str { "" }

  fn months(&self) -> &'static MonthTable { &GREGORIAN_MONTHS }

  fn is_a(&self, text: &str) -> Option<String> {
    strip_marker(text, &SUFFIX, &ESCAPE)
  }

  fn to_day_count(&self, year: i32, month: i32, day: i32) -> i64 {
    let (year, month, day) = (i64::from(year), i64::from(month), i64::from(day));
    let a = (14 - month).div_euclid(12);
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;
    day + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4)
      - y.div_euclid(100)
      + y.div_euclid(400)
      - 32045
  }

  fn from_day_count(&self, day_count: i64) -> (i32, i32, i32) {
    let j = day_count + 32044;
    let g = j.div_euclid(146_097);
    let dg = j.rem_euclid(146_097);
    let c = (dg / 36524 + 1) * 3 / 4;
    let dc = dg - c * 36524;
    let b = dc / 1461;
    let db = dc % 1461;
    let a = (db / 365 + 1) * 3 / 4;
    let da = db - a * 365;
    let y = g * 400 + c * 100 + b * 4 + a;
    let m = (da * 5 + 308) / 153 - 2;
    let d = da - (m + 4) * 153 / 5 + 122;
    (
      (y - 4800 + (m + 2) / 12) as i32,
      ((m + 2) % 12 + 1) as i32,
      (d + 1) as i32,
    )
  }

  /// Dates before the cutover are handed to the Julian calendar, so a date
  /// is never shown in a calendar that was not yet in use.
  fn parse(&self, text: &str, delta: Delta) -> Option<Parsed> {
    let ymd = parse_ymd(text, self.months())?;
    if ymd.known.year && (ymd.year, ymd.month, ymd.day) < CUTOVER {
      return Julian.parse(text, delta);
    }
    self.resolve(ymd, delta)
  }
}
