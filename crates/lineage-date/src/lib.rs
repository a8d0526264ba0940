//! Free-form genealogical dates.
//!
//! Parses strings such as "abt 1750", "bef 12 Jan 1800 (Julian)" or
//! "between 1800 and 1850" into calendar-independent day counts, keeping
//! which fields were actually written so a date can be displayed again in
//! its own calendar without inventing precision. Parsing never fails: text
//! that is not a date is kept as-is.

pub mod calendar;
pub mod date;
pub mod range;
pub mod roman;
pub mod ymd;

pub use calendar::{Calendar, CalendarKind};
pub use date::{Date, Precision, Qualifier};
pub use range::{DateRange, SpanKind};
pub use ymd::Known;
