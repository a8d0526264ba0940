//! A single, possibly partial and imprecise, point in time.
//!
//! Parsing is a fixed sequence of reductions over the input text: calendar
//! marker, before/after qualifier, about/estimated precision, time of day,
//! "+N days" adjustments, then the residual is handed to the calendar. No
//! step fails; anything not understood is left in the residual, and a
//! residual the calendar cannot read gives a date without a day count whose
//! display is the original text.

use std::{fmt, sync::LazyLock};

use chrono::NaiveTime;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::{
  calendar::{CalendarKind, Delta, detect},
  ymd::Known,
};

/// Whether the date is a bound rather than the date itself.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Qualifier {
  Before,
  #[default]
  On,
  After,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
  About,
  Estimated,
  #[default]
  Exact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Date {
  /// The text as it was written.
  pub text:      String,
  pub calendar:  CalendarKind,
  pub qualifier: Qualifier,
  pub precision: Precision,
  pub time:      Option<NaiveTime>,
  /// Position on the shared timeline; `None` when the text could not be
  /// read as a date.
  pub day_count: Option<i64>,
  pub known:     Known,
}

// ─── Grammar ─────────────────────────────────────────────────────────────────

static BEFORE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)(?:^|\D)(/)\d|(<|\bbefore\b|\bbef\b\.?|\bavant\b)")
    .expect("static regex")
});
static AFTER: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)\d(/)(?:\D|$)|(>|\bafter\b|\baft\b\.?|\bapr[eè]s\b)")
    .expect("static regex")
});
static ABOUT: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)\s*(?:\b(?:about|abt|circa|ca|environ|env)\b\.?|~)\s*")
    .expect("static regex")
});
static ESTIMATED: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"(?i)\s*(?:\b(?:estimated|est|calculated|cal)\b\.?\s*|\?\s*$)",
  )
  .expect("static regex")
});
static TIME: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)\s*(\d{1,2}):(\d{2})(?::(\d{2}))?\s*(am|pm)?")
    .expect("static regex")
});
const UNITS: &str = r"days?|jours?|months?|mois|years?|ans?";
static TRAILING_DELTA: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(&format!(r"(?i)\s*([-+])\s*(\d+)\s*({UNITS})\s*$"))
    .expect("static regex")
});
static LEADING_DELTA: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(&format!(r"(?i)^\s*([-+])\s*(\d+)\s*({UNITS})\b\s*"))
    .expect("static regex")
});

/// Remove the first marker matched by `re`. Group 1 is a slash that is the
/// only thing to drop; group 2 is a whole keyword.
fn strip_qualifier(re: &Regex, text: &str) -> Option<String> {
  let caps = re.captures(text)?;
  let m = caps.get(1).or_else(|| caps.get(2))?;
  Some(format!("{} {}", &text[..m.start()], &text[m.end()..]))
}

fn cut(text: &str, start: usize, end: usize, with: &str) -> String {
  format!("{}{with}{}", &text[..start], &text[end..])
}

fn parse_time(caps: &Captures) -> Option<NaiveTime> {
  let mut hour: u32 = caps[1].parse().ok()?;
  let minute: u32 = caps[2].parse().ok()?;
  let second: u32 = match caps.get(3) {
    Some(s) => s.as_str().parse().ok()?,
    None => 0,
  };
  match caps.get(4).map(|m| m.as_str().to_ascii_lowercase()).as_deref() {
    Some("pm") if hour < 12 => hour += 12,
    Some("am") if hour == 12 => hour = 0,
    _ => {}
  }
  NaiveTime::from_hms_opt(hour, minute, second)
}

/// Accumulate one "+N unit" clause. A clause whose amount does not fit, or
/// would overflow the running total, is dropped.
fn add_delta(delta: &mut Delta, caps: &Captures) {
  let Ok(amount) = caps[2].parse::<i32>() else {
    return;
  };
  let amount = if &caps[1] == "-" { -amount } else { amount };
  let unit = caps[3].to_ascii_lowercase();
  let total = if unit.starts_with('d') || unit.starts_with('j') {
    &mut delta.days
  } else if unit.starts_with("mo") {
    &mut delta.months
  } else {
    &mut delta.years
  };
  if let Some(sum) = total.checked_add(amount) {
    *total = sum;
  }
}

impl Date {
  pub fn parse(text: &str) -> Self {
    let (calendar, mut rest) = detect(text);

    let mut qualifier = Qualifier::On;
    if let Some(r) = strip_qualifier(&BEFORE, &rest) {
      qualifier = Qualifier::Before;
      rest = r;
    } else if let Some(r) = strip_qualifier(&AFTER, &rest) {
      qualifier = Qualifier::After;
      rest = r;
    }

    let mut precision = Precision::Exact;
    if let Some(m) = ABOUT.find(&rest) {
      precision = Precision::About;
      rest = cut(&rest, m.start(), m.end(), " ");
    } else if let Some(m) = ESTIMATED.find(&rest) {
      precision = Precision::Estimated;
      rest = cut(&rest, m.start(), m.end(), " ");
    }

    let found = TIME
      .captures(&rest)
      .and_then(|caps| Some((parse_time(&caps)?, caps.get(0)?.start())));
    let mut time = None;
    if let Some((t, start)) = found {
      time = Some(t);
      rest.truncate(start);
    }

    let mut delta = Delta::default();
    while let Some((start, end)) = TRAILING_DELTA
      .captures(&rest)
      .or_else(|| LEADING_DELTA.captures(&rest))
      .and_then(|caps| {
        add_delta(&mut delta, &caps);
        caps.get(0).map(|m| (m.start(), m.end()))
      })
    {
      rest = cut(&rest, start, end, " ");
    }

    let parsed = calendar.calendar().parse(rest.trim(), delta);
    Date {
      text: text.to_string(),
      calendar: parsed.map_or(calendar, |p| p.calendar),
      qualifier,
      precision,
      time,
      day_count: parsed.map(|p| p.day_count),
      known: parsed.map(|p| p.known).unwrap_or_default(),
    }
  }

  pub fn is_parsed(&self) -> bool { self.day_count.is_some() }

  /// The timeline position used to order dates across calendars.
  pub fn sort_key(&self) -> Option<i64> { self.day_count }

  /// Calendar-local fields in the date's own calendar.
  pub fn ymd(&self) -> Option<(i32, i32, i32)> {
    self
      .day_count
      .map(|dc| self.calendar.calendar().from_day_count(dc))
  }

  pub fn year(&self) -> Option<i32> {
    self.ymd().filter(|_| self.known.year).map(|(y, _, _)| y)
  }

  /// Render the date, in `calendar` when given and otherwise in the calendar
  /// it was written in. A date that could not be parsed renders as its
  /// original text.
  pub fn display(&self, calendar: Option<CalendarKind>) -> String {
    let Some(day_count) = self.day_count else {
      return self.text.clone();
    };
    let cal = calendar.unwrap_or(self.calendar).calendar();

    let mut out = String::new();
    if self.precision == Precision::About {
      out.push_str("ca ");
    }
    if self.qualifier == Qualifier::Before {
      out.push('/');
    }
    out.push_str(&cal.date_str(day_count, self.known));
    if let Some(time) = self.time {
      out.push(' ');
      out.push_str(&time.format("%H:%M:%S").to_string());
    }
    if self.qualifier == Qualifier::After {
      out.push('/');
    }
    if self.precision == Precision::Estimated {
      out.push_str(" ?");
    }
    let name = cal.display_name();
    if !name.is_empty() {
      out.push_str(&format!(" ({name})"));
    }
    out
  }
}

impl fmt::Display for Date {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.display(None))
  }
}
