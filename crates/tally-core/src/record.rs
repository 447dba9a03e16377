//! Typed records decoded from raw store rows.
//!
//! Decoding is lenient: the header row is skipped, missing trailing cells
//! read as empty, and a debt row that cannot be decoded is dropped with a log
//! line instead of failing the whole table.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, period::Period, store::Row};

/// Formats accepted for date cells, tried in order.
const DATE_FORMATS: [&str; 2] = ["%d.%m.%Y", "%Y-%m-%d"];

// ─── Records ─────────────────────────────────────────────────────────────────

/// A row of the `employees` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
  /// Opaque identifier, compared as a string. For chat users this is their
  /// numeric chat id.
  pub id:   String,
  /// Display name; also the key debt rows are joined on. `None` when the
  /// row has no name cell.
  pub name: Option<String>,
}

/// A row of the `admins` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
  pub id: String,
}

/// One purchase charged to an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtEntry {
  /// `None` if the date cell is empty or in an unrecognised format. Such a
  /// row still counts towards its period but matches no date query.
  pub date:          Option<NaiveDate>,
  pub employee_name: String,
  pub items:         String,
  pub amount:        Decimal,
  /// The billing period as written in the row. Not recomputed from `date`;
  /// `None` if the cell is missing or unrecognised.
  pub period:        Option<Period>,
}

// ─── Cell parsing ────────────────────────────────────────────────────────────

/// Parse a date cell written as `DD.MM.YYYY` or `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
  let s = s.trim();
  DATE_FORMATS
    .iter()
    .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    .ok_or_else(|| Error::InvalidDate(s.to_owned()))
}

/// Parse an amount cell. Returns `None` for anything that is not a
/// non-negative decimal.
pub fn parse_amount(s: &str) -> Option<Decimal> {
  let s = s.trim();
  let amount = Decimal::from_str(s)
    .or_else(|_| Decimal::from_scientific(s))
    .ok()?;
  (!amount.is_sign_negative() || amount.is_zero()).then_some(amount)
}

fn cell(row: &Row, idx: usize) -> &str {
  row.get(idx).map(String::as_str).unwrap_or("")
}

// ─── Row decoding ────────────────────────────────────────────────────────────

impl DebtEntry {
  /// Decode a `debts` row: `date, employee, items, amount[, period]`.
  ///
  /// Rows with fewer than four cells or an invalid amount yield `None`.
  pub fn from_row(row: &Row) -> Option<Self> {
    if row.len() < 4 {
      return None;
    }
    let date = parse_date(cell(row, 0)).ok();
    let amount = parse_amount(cell(row, 3))?;
    let period = match cell(row, 4) {
      "" => None,
      raw => raw.parse().ok(),
    };

    Some(Self {
      date,
      employee_name: cell(row, 1).to_owned(),
      items: cell(row, 2).to_owned(),
      amount,
      period,
    })
  }
}

/// Decode the `debts` table, skipping the header and any bad row.
pub fn decode_debts(rows: &[Row]) -> Vec<DebtEntry> {
  rows
    .iter()
    .enumerate()
    .skip(1)
    .filter_map(|(idx, row)| {
      let entry = DebtEntry::from_row(row);
      if entry.is_none() {
        tracing::debug!(row = idx + 1, cells = ?row, "skipping malformed debt row");
      }
      entry
    })
    .collect()
}

/// Decode the `employees` table, one record per row after the header.
///
/// Blank cells are kept: an empty id never resolves a user, and a row
/// without a name takes part in neither summaries nor reminders.
pub fn decode_employees(rows: &[Row]) -> Vec<Employee> {
  rows
    .iter()
    .skip(1)
    .map(|row| Employee {
      id:   cell(row, 0).to_owned(),
      name: Some(cell(row, 1))
        .filter(|n| !n.is_empty())
        .map(str::to_owned),
    })
    .collect()
}

/// Decode the `admins` table. Rows without an id are skipped.
pub fn decode_admins(rows: &[Row]) -> Vec<Admin> {
  rows
    .iter()
    .skip(1)
    .filter(|row| !cell(row, 0).is_empty())
    .map(|row| Admin {
      id: cell(row, 0).to_owned(),
    })
    .collect()
}
