use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{calendar::CalendarKind, date::Date};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
  /// "from A to B": the fact held over the whole period.
  From,
  /// "between A and B": the fact happened at some point in the period.
  Between,
}

/// Either a single date or a period delimited by two dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DateRange {
  Single(Date),
  Span {
    span:  SpanKind,
    start: Date,
    end:   Date,
  },
}

static FROM_TO: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)^\s*from\s+(.+?)\s+to\s+(.+?)\s*$").expect("static regex")
});
static BETWEEN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)^\s*(?:between|bet|btw)\.?\s+(.+?)\s+(?:and|&)\s+(.+?)\s*$")
    .expect("static regex")
});

impl DateRange {
  /// "from .. to .." is tried first, then "between .. and ..", and anything
  /// else is a single date.
  pub fn parse(text: &str) -> Self {
    if let Some(c) = FROM_TO.captures(text) {
      return DateRange::Span {
        span:  SpanKind::From,
        start: Date::parse(&c[1]),
        end:   Date::parse(&c[2]),
      };
    }
    if let Some(c) = BETWEEN.captures(text) {
      return DateRange::Span {
        span:  SpanKind::Between,
        start: Date::parse(&c[1]),
        end:   Date::parse(&c[2]),
      };
    }
    DateRange::Single(Date::parse(text))
  }

  pub fn span_kind(&self) -> Option<SpanKind> {
    match self {
      DateRange::Single(_) => None,
      DateRange::Span { span, .. } => Some(*span),
    }
  }

  /// The single date, or the start of the span.
  pub fn first(&self) -> &Date {
    match self {
      DateRange::Single(date) => date,
      DateRange::Span { start, .. } => start,
    }
  }

  pub fn sort_key(&self) -> Option<i64> { self.first().sort_key() }

  pub fn display(&self, calendar: Option<CalendarKind>) -> String {
    match self {
      DateRange::Single(date) => date.display(calendar),
      DateRange::Span {
        span: SpanKind::From,
        start,
        end,
      } => format!(
        "from {} to {}",
        start.display(calendar),
        end.display(calendar)
      ),
      DateRange::Span {
        span: SpanKind::Between,
        start,
        end,
      } => format!(
        "between {} and {}",
        start.display(calendar),
        end.display(calendar)
      ),
    }
  }
}

impl fmt::Display for DateRange {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.display(None))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn between_two_years() {
    let r = DateRange::parse("between 1800 and 1850");
    assert_eq!(r.span_kind(), Some(SpanKind::Between));
    let DateRange::Span { start, end, .. } = &r else {
      panic!("expected a span");
    };
    assert_eq!(start.year(), Some(1800));
    assert_eq!(end.year(), Some(1850));
    assert_eq!(r.to_string(), "between 1800 and 1850");
  }

  #[test]
  fn from_to() {
    let r = DateRange::parse("FROM 1 JAN 1800 TO 3 MAR 1801");
    assert_eq!(r.span_kind(), Some(SpanKind::From));
    assert_eq!(r.to_string(), "from 1800-01-01 to 1801-03-03");
  }

  #[test]
  fn gedcom_bet_and() {
    let r = DateRange::parse("BET 1700 AND 1710");
    assert_eq!(r.span_kind(), Some(SpanKind::Between));
  }

  #[test]
  fn from_to_wins_over_between() {
    let r = DateRange::parse("from between 1 and 2 to 1850");
    assert_eq!(r.span_kind(), Some(SpanKind::From));
  }

  #[test]
  fn single_date() {
    let r = DateRange::parse("abt 1750");
    assert_eq!(r.span_kind(), None);
    assert_eq!(r.first().year(), Some(1750));
    assert_eq!(r.sort_key(), r.first().sort_key());
  }

  #[test]
  fn stacked_large_offsets_still_parse() {
    let r = DateRange::parse("1800 +2000000000 years +2000000000 years");
    assert_eq!(r.first().year(), Some(2_000_001_800));

    let r = DateRange::parse("1800 +2000000000 days +2000000000 days");
    assert!(r.sort_key().is_some());

    let r = DateRange::parse(
      "between 1800 +2000000000 days +2000000000 days and 1850",
    );
    assert_eq!(r.span_kind(), Some(SpanKind::Between));
    assert!(!r.display(None).is_empty());
  }

  #[test]
  fn unparsed_range_keeps_each_side() {
    let r = DateRange::parse("between spring and summer");
    assert_eq!(r.to_string(), "between spring and summer");
    assert_eq!(r.sort_key(), None);
  }
}
