//! Planning the balance reminders broadcast to employees.
//!
//! Planning only decides who gets told what. Delivery belongs to whichever
//! transport the caller wires up.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{period::Period, record::Employee, summary::DebtIndex};

/// A reminder for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
  /// The employee id read as a numeric chat id.
  pub chat_id:       i64,
  pub employee_name: String,
  pub total:         Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPlan {
  pub period:  Period,
  pub notices: Vec<Notice>,
  /// Named employee rows whose id is blank or not a numeric chat id.
  pub errors:  usize,
  /// Rows with nothing owed this period, or without a name.
  pub skipped: usize,
}

/// Decide which employees are reminded of their `period` balance.
///
/// Every employee row lands in exactly one of `notices`, `errors` or
/// `skipped`.
pub fn plan_notifications(
  employees: &[Employee],
  index: &DebtIndex,
  period: Period,
) -> NotificationPlan {
  let mut plan = NotificationPlan {
    period,
    notices: Vec::new(),
    errors: 0,
    skipped: 0,
  };

  for employee in employees {
    let Some(name) = employee.name.as_deref() else {
      plan.skipped += 1;
      continue;
    };
    let Ok(chat_id) = employee.id.parse::<i64>() else {
      tracing::warn!(id = %employee.id, name, "employee id is not a chat id");
      plan.errors += 1;
      continue;
    };

    let total = index.total(name, period);
    if total > Decimal::ZERO {
      plan.notices.push(Notice {
        chat_id,
        employee_name: name.to_owned(),
        total,
      });
    } else {
      plan.skipped += 1;
    }
  }

  plan
}
