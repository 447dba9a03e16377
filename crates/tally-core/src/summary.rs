//! Organisation-wide totals for a billing period.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
  ledger::accumulate,
  period::Period,
  record::{DebtEntry, Employee},
};

/// Per-period, per-employee debt totals built from one snapshot.
///
/// Lets a batch of per-employee lookups share a single pass over the debt
/// rows. Lookups agree with [`crate::ledger::total_for_period`] on the same
/// snapshot.
#[derive(Debug, Default)]
pub struct DebtIndex {
  totals: HashMap<Period, HashMap<String, Decimal>>,
}

impl DebtIndex {
  pub fn build(entries: &[DebtEntry]) -> Self {
    let mut totals: HashMap<Period, HashMap<String, Decimal>> = HashMap::new();
    for entry in entries {
      let Some(period) = entry.period else { continue };
      let total = totals
        .entry(period)
        .or_default()
        .entry(entry.employee_name.clone())
        .or_default();
      if !accumulate(total, entry.amount) {
        tracing::warn!(
          employee = %entry.employee_name,
          %period,
          amount = %entry.amount,
          "period total overflowed"
        );
      }
    }
    Self { totals }
  }

  /// Total for `employee_name` in `period`; zero if there is none.
  pub fn total(&self, employee_name: &str, period: Period) -> Decimal {
    self
      .totals
      .get(&period)
      .and_then(|by_name| by_name.get(employee_name))
      .copied()
      .unwrap_or_default()
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTotal {
  pub employee_name: String,
  pub total:         Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationSummary {
  pub period:       Period,
  pub grand_total:  Decimal,
  /// Employees with a non-zero total, in employee-table order.
  pub per_employee: Vec<EmployeeTotal>,
}

/// Build the summary for `period`.
///
/// Employees are taken in table order and are not deduplicated: a name
/// listed twice appears, and counts towards the grand total, twice.
/// Employees without a name are ignored, as is an employee whose total
/// would overflow the grand total.
pub fn organization_summary(
  employees: &[Employee],
  index: &DebtIndex,
  period: Period,
) -> OrganizationSummary {
  let mut grand_total = Decimal::ZERO;
  let mut per_employee = Vec::new();

  for name in employees.iter().filter_map(|e| e.name.as_deref()) {
    let total = index.total(name, period);
    if total <= Decimal::ZERO {
      continue;
    }
    if !accumulate(&mut grand_total, total) {
      tracing::warn!(employee = name, %period, %total, "grand total overflowed");
      continue;
    }
    per_employee.push(EmployeeTotal {
      employee_name: name.to_owned(),
      total,
    });
  }

  OrganizationSummary {
    period,
    grand_total,
    per_employee,
  }
}
