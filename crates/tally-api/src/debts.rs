//! Handlers for `/debts` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/debts/total` | `?employee` required; optional `period` (`YYYY-MM` or `March 2024`) |
//! | `GET`  | `/debts/daily` | `?date` required; optional `employee` |

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_core::{
  Ledger, Period,
  ledger::{DailyEntry, RunningDetail, daily_total, running_total},
  record::parse_date,
  store::LedgerStore,
};

use crate::error::ApiError;

// ─── Period total ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TotalParams {
  /// Employee display name, matched exactly.
  pub employee: String,
  /// Defaults to the current period.
  pub period:   Option<Period>,
}

#[derive(Debug, Serialize)]
pub struct TotalBody {
  pub employee: String,
  pub period:   Period,
  pub label:    String,
  pub total:    Decimal,
  /// Itemised statement in store order with cumulative totals.
  pub details:  Vec<RunningDetail>,
}

/// `GET /debts/total?employee=<name>[&period=<period>]`
pub async fn total<S>(
  State(ledger): State<Ledger<S>>,
  Query(params): Query<TotalParams>,
) -> Result<Json<TotalBody>, ApiError>
where
  S: LedgerStore + 'static,
{
  let result = ledger
    .total_for_period(&params.employee, params.period)
    .await?;

  Ok(Json(TotalBody {
    label:    result.period.label(),
    details:  running_total(&result.details),
    employee: result.employee_name,
    period:   result.period,
    total:    result.total,
  }))
}

// ─── Daily entries ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DailyParams {
  /// `DD.MM.YYYY` or `YYYY-MM-DD`.
  pub date:     String,
  pub employee: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DailyBody {
  pub date:     NaiveDate,
  pub employee: Option<String>,
  pub total:    Decimal,
  pub entries:  Vec<DailyEntry>,
}

/// `GET /debts/daily?date=<date>[&employee=<name>]`
pub async fn daily<S>(
  State(ledger): State<Ledger<S>>,
  Query(params): Query<DailyParams>,
) -> Result<Json<DailyBody>, ApiError>
where
  S: LedgerStore + 'static,
{
  let date = parse_date(&params.date)?;
  let entries = ledger
    .entries_for_date(date, params.employee.as_deref())
    .await?;

  Ok(Json(DailyBody {
    date,
    employee: params.employee,
    total: daily_total(&entries),
    entries,
  }))
}
