//! Calendars sharing one day-count timeline (the Julian day number).
//!
//! A calendar converts calendar-local year/month/day to a day count and back,
//! recognises its own marker in free text (`is_a`), and renders a day count
//! with only the fields that were known.

mod french;
mod gregorian;
mod julian;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub use self::{
  french::{FRENCH_MONTHS, French},
  gregorian::{GREGORIAN_MONTHS, Gregorian},
  julian::Julian,
};
use crate::ymd::{Known, MonthTable, Ymd, parse_ymd, ymd_str};

/// The calendars a date can be expressed in.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CalendarKind {
  #[default]
  Gregorian,
  Julian,
  #[strum(to_string = "french_republican", serialize = "french")]
  FrenchRepublican,
}

impl CalendarKind {
  /// Order in which markers are tried. Gregorian comes last because it is
  /// also the fallback when no marker is present.
  pub const DETECTION_ORDER: [CalendarKind; 3] = [
    CalendarKind::Julian,
    CalendarKind::FrenchRepublican,
    CalendarKind::Gregorian,
  ];

  pub fn calendar(self) -> &'static dyn Calendar {
    match self {
      CalendarKind::Gregorian => &Gregorian,
      CalendarKind::Julian => &Julian,
      CalendarKind::FrenchRepublican => &French,
    }
  }
}

/// Signed year/month/day offsets collected from "+N days" style clauses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delta {
  pub years:  i32,
  pub months: i32,
  pub days:   i32,
}

/// Result of parsing a residual date in one calendar. `calendar` may differ
/// from the calendar that was asked, see [`Gregorian`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parsed {
  pub day_count: i64,
  pub known:     Known,
  pub calendar:  CalendarKind,
}

pub trait Calendar: Send + Sync {
  fn kind(&self) -> CalendarKind;

  /// Name appended to displayed dates, or empty when the rendering is
  /// unambiguous on its own.
  fn display_name(&self) -> &'static str;

  fn months(&self) -> &'static MonthTable;

  /// If `text` carries this calendar's marker, the text with the marker
  /// removed.
  fn is_a(&self, text: &str) -> Option<String>;

  fn to_day_count(&self, year: i32, month: i32, day: i32) -> i64;

  fn from_day_count(&self, day_count: i64) -> (i32, i32, i32);

  /// Parse a plain residual date and apply `delta`. `None` when the text is
  /// not a date in this calendar.
  fn parse(&self, text: &str, delta: Delta) -> Option<Parsed> {
    let ymd = parse_ymd(text, self.months())?;
    self.resolve(ymd, delta)
  }

  /// Apply `delta` to extracted fields and convert to a day count. Month
  /// offsets carry into the year, day offsets are added to the day count.
  /// `None` when the shifted year no longer fits.
  fn resolve(&self, ymd: Ymd, delta: Delta) -> Option<Parsed> {
    let per_year = i64::from(self.months().max_month);
    let months = i64::from(ymd.month) - 1 + i64::from(delta.months);
    let year = i64::from(ymd.year)
      + i64::from(delta.years)
      + months.div_euclid(per_year);
    let year = i32::try_from(year).ok()?;
    let month = i32::try_from(months.rem_euclid(per_year) + 1).ok()?;
    Some(Parsed {
      day_count: self.to_day_count(year, month, ymd.day)
        + i64::from(delta.days),
      known:     ymd.known,
      calendar:  self.kind(),
    })
  }

  /// Render `day_count` in this calendar, showing only the `known` fields.
  fn date_str(&self, day_count: i64, known: Known) -> String {
    let (year, month, day) = self.from_day_count(day_count);
    ymd_str(year, month, day, known)
  }
}

// ─── Markers ─────────────────────────────────────────────────────────────────

/// A trailing calendar name, either bare ("1700 J") or parenthesised
/// ("1700 (Julian)").
pub(crate) fn suffix_regex(names: &str) -> Regex {
  Regex::new(&format!(r"(?i)(?:^|\s+|\s*\()(?:{names})\)?\s*$"))
    .expect("static regex")
}

/// A GEDCOM calendar escape such as `@#DJULIAN@`.
pub(crate) fn escape_regex(escape: &str) -> Regex {
  Regex::new(&format!(r"(?i)^\s*@#D{}@\s*", regex::escape(escape)))
    .expect("static regex")
}

pub(crate) fn strip_marker(
  text: &str,
  suffix: &Regex,
  escape: &Regex,
) -> Option<String> {
  let m = escape.find(text).or_else(|| suffix.find(text))?;
  Some(format!("{}{}", &text[..m.start()], &text[m.end()..]))
}

/// Find the calendar whose marker `text` carries, defaulting to Gregorian.
/// Returns the calendar and the text with the marker removed.
pub fn detect(text: &str) -> (CalendarKind, String) {
  CalendarKind::DETECTION_ORDER
    .into_iter()
    .find_map(|kind| kind.calendar().is_a(text).map(|rest| (kind, rest)))
    .unwrap_or_else(|| (CalendarKind::Gregorian, text.to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn kind_names_round_trip_through_strings() {
    assert_eq!(CalendarKind::Julian.to_string(), "julian");
    assert_eq!(
      CalendarKind::FrenchRepublican.to_string(),
      "french_republican"
    );
    assert_eq!(
      "French".parse::<CalendarKind>().unwrap(),
      CalendarKind::FrenchRepublican
    );
    assert_eq!(
      "GREGORIAN".parse::<CalendarKind>().unwrap(),
      CalendarKind::Gregorian
    );
    assert!("hebrew".parse::<CalendarKind>().is_err());
  }

  #[test]
  fn detects_suffixes_and_escapes() {
    let (kind, rest) = detect("12 Jan 1700 (Julian)");
    assert_eq!(kind, CalendarKind::Julian);
    assert_eq!(rest, "12 Jan 1700");

    let (kind, rest) = detect("@#DJULIAN@ 12 JAN 1700");
    assert_eq!(kind, CalendarKind::Julian);
    assert_eq!(rest, "12 JAN 1700");

    let (kind, rest) = detect("@#DFRENCH R@ 1 VEND XI");
    assert_eq!(kind, CalendarKind::FrenchRepublican);
    assert_eq!(rest, "1 VEND XI");
  }

  #[test]
  fn month_names_ending_in_marker_letters_are_not_markers() {
    let (kind, rest) = detect("12 Aug");
    assert_eq!(kind, CalendarKind::Gregorian);
    assert_eq!(rest, "12 Aug");
  }

  #[test]
  fn french_month_names_imply_the_calendar() {
    let (kind, rest) = detect("3 brumaire XI");
    assert_eq!(kind, CalendarKind::FrenchRepublican);
    assert_eq!(rest, "3 brumaire XI");
  }

  #[test]
  fn month_delta_carries_into_year() {
    let p = Gregorian
      .parse("15 Nov 1800", Delta {
        months: 3,
        ..Delta::default()
      })
      .unwrap();
    assert_eq!(Gregorian.from_day_count(p.day_count), (1801, 2, 15));

    let p = Gregorian
      .parse("15 Feb 1800", Delta {
        months: -3,
        ..Delta::default()
      })
      .unwrap();
    assert_eq!(Gregorian.from_day_count(p.day_count), (1799, 11, 15));
  }
}
