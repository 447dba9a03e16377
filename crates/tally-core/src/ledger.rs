//! Debt aggregation over a decoded snapshot of the `debts` table.
//!
//! Every function here is pure: callers fetch and decode rows, these
//! functions filter and sum them. Employee names are compared exactly, with
//! no trimming or case folding.
//!
//! Sums never panic. An amount that would overflow a running sum is left out
//! of it and logged.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{period::Period, record::DebtEntry};

// ─── Result types ────────────────────────────────────────────────────────────

/// One line of an employee's itemised period statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtDetail {
  /// `None` if the row's date cell could not be read.
  pub date:   Option<NaiveDate>,
  pub items:  String,
  pub amount: Decimal,
}

/// An employee's debt for one billing period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotal {
  pub employee_name: String,
  pub period:        Period,
  pub total:         Decimal,
  /// Matching rows in store order.
  pub details:       Vec<DebtDetail>,
}

/// One purchase made on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEntry {
  pub employee_name: String,
  pub items:         String,
  pub amount:        Decimal,
}

/// A [`DebtDetail`] annotated with the cumulative sum up to and including it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningDetail {
  #[serde(flatten)]
  pub detail:        DebtDetail,
  pub running_total: Decimal,
}

// ─── Aggregation ─────────────────────────────────────────────────────────────

/// Sum and itemise the entries of `employee_name` in `period`.
///
/// An entry matches only if its written period equals `period`; entries with
/// no period never match. The entry's date plays no part. No matches gives a
/// zero total and no details.
///
/// A matching entry whose amount would overflow the total is left out of
/// both the total and the details.
pub fn total_for_period(
  entries: &[DebtEntry],
  employee_name: &str,
  period: Period,
) -> PeriodTotal {
  let mut total = Decimal::ZERO;
  let mut details = Vec::new();

  for e in entries
    .iter()
    .filter(|e| e.employee_name == employee_name && e.period == Some(period))
  {
    if !accumulate(&mut total, e.amount) {
      tracing::warn!(
        employee = employee_name,
        %period,
        amount = %e.amount,
        "period total overflowed"
      );
      continue;
    }
    details.push(DebtDetail {
      date:   e.date,
      items:  e.items.clone(),
      amount: e.amount,
    });
  }

  PeriodTotal {
    employee_name: employee_name.to_owned(),
    period,
    total,
    details,
  }
}

/// Entries recorded on exactly `date`, optionally restricted to one
/// employee. Store order is preserved.
pub fn entries_for_date(
  entries: &[DebtEntry],
  date: NaiveDate,
  employee_name: Option<&str>,
) -> Vec<DailyEntry> {
  entries
    .iter()
    .filter(|e| e.date == Some(date))
    .filter(|e| employee_name.is_none_or(|name| e.employee_name == name))
    .map(|e| DailyEntry {
      employee_name: e.employee_name.clone(),
      items:         e.items.clone(),
      amount:        e.amount,
    })
    .collect()
}

/// Sum of a day's entries.
pub fn daily_total(entries: &[DailyEntry]) -> Decimal {
  let mut total = Decimal::ZERO;
  for e in entries {
    if !accumulate(&mut total, e.amount) {
      tracing::warn!(
        employee = %e.employee_name,
        amount = %e.amount,
        "daily total overflowed"
      );
    }
  }
  total
}

/// Annotate `details` with a cumulative sum, in the order given.
///
/// A detail that would overflow the sum is dropped.
pub fn running_total(details: &[DebtDetail]) -> Vec<RunningDetail> {
  let mut acc = Decimal::ZERO;
  details
    .iter()
    .filter_map(|detail| {
      if !accumulate(&mut acc, detail.amount) {
        return None;
      }
      Some(RunningDetail {
        detail:        detail.clone(),
        running_total: acc,
      })
    })
    .collect()
}

/// Add `amount` to `acc`. On overflow `acc` is unchanged and `false` is
/// returned.
pub(crate) fn accumulate(acc: &mut Decimal, amount: Decimal) -> bool {
  match acc.checked_add(amount) {
    Some(sum) => {
      *acc = sum;
      true
    }
    None => false,
  }
}
