//! Calendar-local year/month/day extraction from the residual date text.
//!
//! Each calendar supplies its own month-name table; everything else (numeric
//! layouts, Roman-numeral years, which fields were actually written) is
//! shared.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::roman::from_roman;

/// Which of year, month and day were present in the text, as opposed to
/// filled in with a default. Display never shows a field that is not known.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize,
)]
pub struct Known {
  pub year:  bool,
  pub month: bool,
  pub day:   bool,
}

impl Known {
  pub const ALL: Self = Self {
    year:  true,
    month: true,
    day:   true,
  };

  pub fn any(self) -> bool { self.year || self.month || self.day }
}

/// Year used when the text names a day and month but no year.
pub const UNKNOWN_YEAR: i32 = -4000;

/// A calendar-local date split into its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ymd {
  pub year:  i32,
  pub month: i32,
  pub day:   i32,
  pub known: Known,
}

/// Month names of one calendar, lower case, plus the highest month number.
pub struct MonthTable {
  pub names:     &'static [(&'static str, i32)],
  pub max_month: i32,
  pub max_day:   i32,
}

impl MonthTable {
  fn lookup(&self, name: &str) -> Option<i32> {
    let name = name.to_lowercase();
    self
      .names
      .iter()
      .find(|(n, _)| *n == name)
      .map(|(_, m)| *m)
  }
}

// ─── Grammar ─────────────────────────────────────────────────────────────────

const YEAR: &str = r"(\d{1,4}|(?-i:[MDCLXVI]+))";

static YYYY_MM_DD: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(&format!(r"^\s*{YEAR}[-/](\d{{1,2}})[-/](\d{{1,2}})\s*$"))
    .expect("static regex")
});
static YYYYMMDD: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^\s*(\d{4})(\d{2})(\d{2})\s*$").expect("static regex")
});
static MM_DD_YYYY: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(&format!(r"^\s*(\d{{2}})[-/](\d{{2}})[-/]{YEAR}\s*$"))
    .expect("static regex")
});
static DAY_MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(&format!(r"(?i)^\s*(\d{{1,2}})\s+(\p{{L}}+)\.?(?:,\s*|\s+){YEAR}\s*$"))
    .expect("static regex")
});
static MONTH_DAY_YEAR: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(&format!(
    r"(?i)^\s*(\p{{L}}+)\.?\s+(\d{{1,2}})(?:,\s*|\s+){YEAR}\s*$"
  ))
  .expect("static regex")
});
static MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(&format!(r"(?i)^\s*(\p{{L}}+)\.?,?\s+{YEAR}\s*$"))
    .expect("static regex")
});
static MM_DD: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^\s*(\d{2})[-/](\d{2})\s*$").expect("static regex")
});
static YEAR_MONTH: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(&format!(r"^\s*{YEAR}(?:[-/](\d{{1,2}}))?\s*$"))
    .expect("static regex")
});

fn year_of(s: &str) -> Option<i32> {
  if s.chars().all(|c| c.is_ascii_digit()) {
    s.parse().ok()
  } else {
    from_roman(s).and_then(|y| i32::try_from(y).ok())
  }
}

fn num(s: &str) -> Option<i32> { s.parse().ok() }

/// Numeric month/day pairs are read month first; a "month" above 12 means
/// the writer used day first.
fn month_day(first: i32, second: i32) -> (i32, i32) {
  if first > 12 { (second, first) } else { (first, second) }
}

/// Extract the fields of a plain date ("12 JAN 1800", "1800-01-12",
/// "JAN 1800", "1800"). Returns `None` when nothing in `text` is a date.
pub fn parse_ymd(text: &str, months: &MonthTable) -> Option<Ymd> {
  let ymd = match_ymd(text, months)?;
  let month_ok = !ymd.known.month || (1..=months.max_month).contains(&ymd.month);
  let day_ok = !ymd.known.day || (1..=months.max_day).contains(&ymd.day);
  (month_ok && day_ok).then_some(ymd)
}

fn match_ymd(text: &str, months: &MonthTable) -> Option<Ymd> {
  if let Some(c) = YYYY_MM_DD.captures(text).or_else(|| YYYYMMDD.captures(text))
  {
    return Some(Ymd {
      year:  year_of(&c[1])?,
      month: num(&c[2])?,
      day:   num(&c[3])?,
      known: Known::ALL,
    });
  }

  if let Some(c) = MM_DD_YYYY.captures(text) {
    let (month, day) = month_day(num(&c[1])?, num(&c[2])?);
    return Some(Ymd {
      year: year_of(&c[3])?,
      month,
      day,
      known: Known::ALL,
    });
  }

  if let Some(c) = DAY_MONTH_YEAR.captures(text)
    && let Some(month) = months.lookup(&c[2])
  {
    return Some(Ymd {
      year: year_of(&c[3])?,
      month,
      day: num(&c[1])?,
      known: Known::ALL,
    });
  }

  if let Some(c) = MONTH_DAY_YEAR.captures(text)
    && let Some(month) = months.lookup(&c[1])
  {
    return Some(Ymd {
      year: year_of(&c[3])?,
      month,
      day: num(&c[2])?,
      known: Known::ALL,
    });
  }

  if let Some(c) = MONTH_YEAR.captures(text)
    && let Some(month) = months.lookup(&c[1])
  {
    return Some(Ymd {
      year: year_of(&c[2])?,
      month,
      day: 1,
      known: Known {
        year:  true,
        month: true,
        day:   false,
      },
    });
  }

  if let Some(c) = MM_DD.captures(text) {
    let (month, day) = month_day(num(&c[1])?, num(&c[2])?);
    return Some(Ymd {
      year: UNKNOWN_YEAR,
      month,
      day,
      known: Known {
        year:  false,
        month: true,
        day:   true,
      },
    });
  }

  if let Some(c) = YEAR_MONTH.captures(text) {
    let year = year_of(&c[1])?;
    return Some(match c.get(2) {
      Some(m) => Ymd {
        year,
        month: num(m.as_str())?,
        day: 1,
        known: Known {
          year:  true,
          month: true,
          day:   false,
        },
      },
      None => Ymd {
        year,
        month: 1,
        day: 1,
        known: Known {
          year:  true,
          month: false,
          day:   false,
        },
      },
    });
  }

  None
}

/// Render calendar-local fields, omitting whatever is not known.
pub fn ymd_str(year: i32, month: i32, day: i32, known: Known) -> String {
  if !known.year {
    return format!("????-{month:02}-{day:02}");
  }
  match (known.month, known.day) {
    (true, true) => format!("{year}-{month:02}-{day:02}"),
    (true, false) => format!("{year}-{month:02}"),
    (false, true) => format!("{year}-??-{day:02}"),
    (false, false) => format!("{year}"),
  }
}
