//! Handler for `GET /summary`.

use axum::{
  Json,
  extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tally_core::{Ledger, Period, store::LedgerStore, summary::OrganizationSummary};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SummaryParams {
  pub period: Option<Period>,
}

#[derive(Debug, Serialize)]
pub struct SummaryBody {
  pub label:   String,
  #[serde(flatten)]
  pub summary: OrganizationSummary,
}

/// `GET /summary[?period=<period>]`
pub async fn handler<S>(
  State(ledger): State<Ledger<S>>,
  Query(params): Query<SummaryParams>,
) -> Result<Json<SummaryBody>, ApiError>
where
  S: LedgerStore + 'static,
{
  let summary = ledger.organization_summary(params.period).await?;
  Ok(Json(SummaryBody {
    label: summary.period.label(),
    summary,
  }))
}
