//! Handlers for `/periods` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/periods/current` | Period containing today |
//! | `GET`  | `/periods/resolve` | `?date=DD.MM.YYYY` or `YYYY-MM-DD` |

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tally_core::{Ledger, Period, record::parse_date, resolve_period, store::LedgerStore};

use crate::error::ApiError;

/// A billing period with its display label and date bounds.
#[derive(Debug, Serialize)]
pub struct PeriodBody {
  pub period: Period,
  pub label:  String,
  pub start:  NaiveDate,
  /// Exclusive.
  pub end:    NaiveDate,
}

impl From<Period> for PeriodBody {
  fn from(p: Period) -> Self {
    Self {
      period: p,
      label:  p.label(),
      start:  p.start(),
      end:    p.end(),
    }
  }
}

/// `GET /periods/current`
pub async fn current<S>(State(ledger): State<Ledger<S>>) -> Json<PeriodBody>
where
  S: LedgerStore + 'static,
{
  Json(ledger.current_period().into())
}

#[derive(Debug, Deserialize)]
pub struct ResolveParams {
  pub date: String,
}

/// `GET /periods/resolve?date=<date>`
pub async fn resolve(
  Query(params): Query<ResolveParams>,
) -> Result<Json<PeriodBody>, ApiError> {
  let date = parse_date(&params.date)?;
  Ok(Json(resolve_period(date).into()))
}
