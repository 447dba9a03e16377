//! Billing periods.
//!
//! A billing period runs from the 10th of one calendar month up to (but not
//! including) the 10th of the next. It is named after the month it starts in,
//! so the period labelled "March 2024" covers 2024-03-10 ..= 2024-04-09.
//!
//! Periods are keyed by `(year, month)`; the English month-name label exists
//! only for display and for decoding spreadsheet cells. It is produced from a
//! fixed table and never depends on the process locale.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Day of month on which a new billing period begins.
pub const CUTOFF_DAY: u32 = 10;

const MONTH_NAMES: [&str; 12] = [
  "January",
  "February",
  "March",
  "April",
  "May",
  "June",
  "July",
  "August",
  "September",
  "October",
  "November",
  "December",
];

/// A billing period, identified by the year and month it starts in.
///
/// Serialises as the ISO `YYYY-MM` string.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
  /// Always the `CUTOFF_DAY`th of the starting month.
  start: NaiveDate,
}

impl Period {
  /// The period starting in `month` of `year`. Returns `None` for a month
  /// outside `1..=12` or a year chrono cannot represent.
  pub fn new(year: i32, month: u32) -> Option<Self> {
    NaiveDate::from_ymd_opt(year, month, CUTOFF_DAY).map(|start| Self { start })
  }

  pub fn year(&self) -> i32 { self.start.year() }

  pub fn month(&self) -> u32 { self.start.month() }

  /// First day of the period.
  pub fn start(&self) -> NaiveDate { self.start }

  /// First day of the following period (exclusive upper bound).
  pub fn end(&self) -> NaiveDate {
    self
      .start
      .checked_add_months(Months::new(1))
      .unwrap_or(NaiveDate::MAX)
  }

  pub fn contains(&self, date: NaiveDate) -> bool {
    date >= self.start && date < self.end()
  }

  pub fn next(&self) -> Option<Self> {
    self
      .start
      .checked_add_months(Months::new(1))
      .map(|start| Self { start })
  }

  pub fn prev(&self) -> Option<Self> {
    self
      .start
      .checked_sub_months(Months::new(1))
      .map(|start| Self { start })
  }

  /// Display label, e.g. `"December 2023"`.
  pub fn label(&self) -> String {
    format!("{} {}", MONTH_NAMES[self.month0()], self.year())
  }

  /// Locale-independent key, e.g. `"2023-12"`.
  pub fn iso(&self) -> String {
    format!("{:04}-{:02}", self.year(), self.month())
  }

  fn month0(&self) -> usize { self.start.month0() as usize }
}

/// The billing period `date` falls into.
///
/// On or after the 10th the period is the date's own month; before the 10th
/// it is the previous month, rolling back across the year boundary in
/// January.
pub fn resolve_period(date: NaiveDate) -> Period {
  let (year, month) = if date.day() >= CUTOFF_DAY {
    (date.year(), date.month())
  } else if date.month() == 1 {
    (date.year() - 1, 12)
  } else {
    (date.year(), date.month() - 1)
  };

  // Only the first month chrono can represent lacks a predecessor; clamp to
  // it.
  Period::new(year, month)
    .or_else(|| Period::new(date.year(), date.month()))
    .unwrap_or(Period { start: date })
}

impl fmt::Display for Period {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.label())
  }
}

impl FromStr for Period {
  type Err = Error;

  /// Accepts the display label (`"March 2024"`, exact capitalisation) or
  /// the ISO key (`"2024-03"`).
  fn from_str(s: &str) -> Result<Self> {
    let invalid = || Error::InvalidPeriod(s.to_owned());

    if let Some((name, year)) = s.split_once(' ') {
      let month = MONTH_NAMES
        .iter()
        .position(|m| *m == name)
        .ok_or_else(invalid)?;
      let year: i32 = year.parse().map_err(|_| invalid())?;
      return Period::new(year, month as u32 + 1).ok_or_else(invalid);
    }

    let (year, month) = s.split_once('-').ok_or_else(invalid)?;
    if year.len() != 4 || month.len() != 2 {
      return Err(invalid());
    }
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    Period::new(year, month).ok_or_else(invalid)
  }
}

impl TryFrom<String> for Period {
  type Error = Error;

  fn try_from(value: String) -> Result<Self> { value.parse() }
}

impl From<Period> for String {
  fn from(p: Period) -> Self { p.iso() }
}
