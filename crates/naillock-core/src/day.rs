//! Calendar day, the join and sort key between logs and photos.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A calendar date, rendered and parsed strictly as ISO-8601 `YYYY-MM-DD`.
///
/// Ordering is chronological, which is also the lexical order of the string
/// form.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Day(NaiveDate);

impl Day {
  pub fn new(date: NaiveDate) -> Self { Self(date) }

  pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
    NaiveDate::from_ymd_opt(year, month, day).map(Self)
  }

  /// The current day in the local timezone. Engines never call this; it is
  /// for the outermost layer to pass in as `today`.
  pub fn today() -> Self { Self(chrono::Local::now().date_naive()) }

  pub fn date(self) -> NaiveDate { self.0 }

  /// The day before, or `None` at the start of the representable calendar.
  pub fn pred(self) -> Option<Self> { self.0.pred_opt().map(Self) }

  /// The day after, or `None` at the end of the representable calendar.
  pub fn succ(self) -> Option<Self> { self.0.succ_opt().map(Self) }
}

impl fmt::Display for Day {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{:04}-{:02}-{:02}",
      self.0.year(),
      self.0.month(),
      self.0.day()
    )
  }
}

impl FromStr for Day {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    // chrono accepts unpadded fields and signed years; the key format
    // does not.
    let bytes = s.as_bytes();
    let shaped = bytes.len() == 10
      && bytes[4] == b'-'
      && bytes[7] == b'-'
      && bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
      return Err(Error::InvalidDay(s.to_owned()));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
      .map(Self)
      .map_err(|_| Error::InvalidDay(s.to_owned()))
  }
}

impl TryFrom<String> for Day {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> { s.parse() }
}

impl From<Day> for String {
  fn from(day: Day) -> Self { day.to_string() }
}

impl From<NaiveDate> for Day {
  fn from(date: NaiveDate) -> Self { Self(date) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_and_displays_iso() {
    let day: Day = "2024-03-09".parse().unwrap();
    assert_eq!(day, Day::from_ymd(2024, 3, 9).unwrap());
    assert_eq!(day.to_string(), "2024-03-09");
  }

  #[test]
  fn rejects_loose_formats() {
    for bad in ["2024-3-9", "24-03-09", "2024/03/09", "2024-02-30", "", "+2024-03-09"] {
      assert!(
        matches!(bad.parse::<Day>(), Err(Error::InvalidDay(_))),
        "{bad:?} should be rejected"
      );
    }
  }

  #[test]
  fn pred_crosses_month_and_year() {
    let day: Day = "2025-01-01".parse().unwrap();
    assert_eq!(day.pred().unwrap().to_string(), "2024-12-31");
    assert_eq!(day.pred().unwrap().succ().unwrap(), day);
  }

  #[test]
  fn serde_uses_string_form() {
    let day: Day = "2024-10-01".parse().unwrap();
    let json = serde_json::to_string(&day).unwrap();
    assert_eq!(json, "\"2024-10-01\"");
    let back: Day = serde_json::from_str(&json).unwrap();
    assert_eq!(back, day);
    assert!(serde_json::from_str::<Day>("\"2024-1-1\"").is_err());
  }
}
