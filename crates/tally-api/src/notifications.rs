//! Handler for `POST /notifications/plan`.
//!
//! Computes who would be reminded of their balance. Sending is left to the
//! caller's transport.

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;
use tally_core::{Ledger, Period, notify::NotificationPlan, store::LedgerStore};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct PlanParams {
  pub period: Option<Period>,
}

/// `POST /notifications/plan[?period=<period>]`
pub async fn plan<S>(
  State(ledger): State<Ledger<S>>,
  Query(params): Query<PlanParams>,
) -> Result<Json<NotificationPlan>, ApiError>
where
  S: LedgerStore + 'static,
{
  let plan = ledger.notification_plan(params.period).await?;
  tracing::info!(
    period = %plan.period,
    notices = plan.notices.len(),
    errors = plan.errors,
    skipped = plan.skipped,
    "notification plan computed"
  );
  Ok(Json(plan))
}
