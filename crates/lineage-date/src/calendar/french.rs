use std::sync::LazyLock;

use regex::Regex;

use super::{
  Calendar, CalendarKind, Delta, Parsed, escape_regex, strip_marker,
  suffix_regex,
};
use crate::{
  roman::to_roman,
  ymd::{Known, MonthTable, parse_ymd},
};

/// Display names, indexed by month - 1.
const MONTH_NAMES: [&str; 13] = [
  "vendemiaire",
  "brumaire",
  "frimaire",
  "nivose",
  "pluviose",
  "ventose",
  "germinal",
  "floreal",
  "prairial",
  "messidor",
  "thermidor",
  "fructidor",
  "jours complementaires",
];

pub static FRENCH_MONTHS: MonthTable = MonthTable {
  names:     &[
    ("vendemiaire", 1),
    ("vendémiaire", 1),
    ("vend", 1),
    ("brumaire", 2),
    ("brum", 2),
    ("frimaire", 3),
    ("frim", 3),
    ("nivose", 4),
    ("nivôse", 4),
    ("nivo", 4),
    ("pluviose", 5),
    ("pluviôse", 5),
    ("pluv", 5),
    ("ventose", 6),
    ("ventôse", 6),
    ("vent", 6),
    ("germinal", 7),
    ("germ", 7),
    ("floreal", 8),
    ("floréal", 8),
    ("flor", 8),
    ("prairial", 9),
    ("prai", 9),
    ("messidor", 10),
    ("mess", 10),
    ("thermidor", 11),
    ("ther", 11),
    ("fructidor", 12),
    ("fruc", 12),
    ("complementaire", 13),
    ("complementaires", 13),
    ("complémentaires", 13),
    ("sansculottide", 13),
    ("sansculottides", 13),
    ("comp", 13),
  ],
  max_month: 13,
  max_day:   30,
};

static SUFFIX: LazyLock<Regex> =
  LazyLock::new(|| suffix_regex("F|FR|French Republican|French"));
static ESCAPE: LazyLock<Regex> = LazyLock::new(|| escape_regex("FRENCH R"));
static MONTH_NAME: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"(?i)\b(?:vend[ée]miaire|brumaire|frimaire|niv[oô]se|pluvi[oô]se|vent[oô]se|germinal|flor[ée]al|prairial|messidor|thermidor|fructidor|compl[ée]mentaires?|sansculottides?)\b",
  )
  .expect("static regex")
});
static JOURS: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)\bjours\s+(compl[ée]mentaires?|sansculottides?)")
    .expect("static regex")
});

/// Day count of 1 vendemiaire I, minus one.
const EPOCH: i64 = 2_375_839;

/// French Republican calendar: twelve months of thirty days, then five or
/// six complementary days. Years are shown as Roman numerals.
pub struct French;

impl Calendar for French {
  fn kind(&self) -> CalendarKind { CalendarKind::FrenchRepublican }

  // Month names already identify the calendar.
  fn display_name(&self) -> &'static str { "" }

  fn months(&self) -> &'static MonthTable { &FRENCH_MONTHS }

  fn is_a(&self, text: &str) -> Option<String> {
    strip_marker(text, &SUFFIX, &ESCAPE)
      .or_else(|| MONTH_NAME.is_match(text).then(|| text.to_string()))
  }

  fn to_day_count(&self, year: i32, month: i32, day: i32) -> i64 {
    let (year, month, day) = (i64::from(year), i64::from(month), i64::from(day));
    EPOCH + (year - 1) * 365 + year.div_euclid(4) + (month - 1) * 30 + day
  }

  fn from_day_count(&self, day_count: i64) -> (i32, i32, i32) {
    let tmp = (day_count - 2_375_474) * 4 - 1;
    let year = tmp.div_euclid(1461);
    let day_of_year = tmp.rem_euclid(1461) / 4;
    (
      year as i32,
      (day_of_year / 30 + 1) as i32,
      (day_of_year % 30 + 1) as i32,
    )
  }

  /// Only years from I onward exist.
  fn parse(&self, text: &str, delta: Delta) -> Option<Parsed> {
    let text = JOURS.replace_all(text, "$1");
    let ymd = parse_ymd(&text, self.months())?;
    if ymd.year < 1 {
      return None;
    }
    self.resolve(ymd, delta)
  }

  fn date_str(&self, day_count: i64, known: Known) -> String {
    let (year, month, day) = self.from_day_count(day_count);
    let mut parts = Vec::new();
    if known.day {
      parts.push(day.to_string());
    }
    if known.month {
      let idx = usize::try_from(month - 1).unwrap_or(0);
      parts.push(MONTH_NAMES[idx.min(12)].to_string());
    }
    if known.year {
      parts.push(to_roman(u32::try_from(year).unwrap_or(0)));
    }
    parts.join(" ")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::calendar::Gregorian;

  #[test]
  fn epoch_is_22_september_1792() {
    assert_eq!(
      French.to_day_count(1, 1, 1),
      Gregorian.to_day_count(1792, 9, 22)
    );
  }

  #[test]
  fn round_trips() {
    for year in 1..=40 {
      for month in 1..=13 {
        let last = if month < 13 {
          30
        } else if (year + 1) % 4 == 0 {
          6
        } else {
          5
        };
        for day in 1..=last {
          let dc = French.to_day_count(year, month, day);
          assert_eq!(French.from_day_count(dc), (year, month, day));
        }
      }
    }
  }

  #[test]
  fn displays_month_names_and_roman_years() {
    let p = French.parse("3 brumaire XI", Delta::default()).unwrap();
    assert_eq!(French.date_str(p.day_count, p.known), "3 brumaire XI");

    let p = French
      .parse("2 jours complementaires III", Delta::default())
      .unwrap();
    assert_eq!(
      French.date_str(p.day_count, p.known),
      "2 jours complementaires III"
    );
  }

  #[test]
  fn accepts_gedcom_month_codes() {
    let p = French.parse("1 VEND 2", Delta::default()).unwrap();
    assert_eq!(French.from_day_count(p.day_count), (2, 1, 1));
  }

  #[test]
  fn years_before_the_republic_do_not_exist() {
    assert!(French.parse("1 vendemiaire 0", Delta::default()).is_none());
    assert!(French.parse("3 brumaire", Delta::default()).is_none());
  }
}
