//! The daily job: log the organisation summary and, on the configured day of
//! the month, remind every employee of their balance.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use tally_core::{Ledger, resolve_period, store::LedgerStore};

use crate::{config::NotificationConfig, notifier::Notifier};

/// What one run of the job did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
  pub sent:    usize,
  /// Plan errors plus failed deliveries.
  pub errors:  usize,
  pub skipped: usize,
}

/// The first instant strictly after `now` at `hour:00`.
///
/// `hour` must be below 24; larger values are clamped to 23.
pub fn next_run_after(now: NaiveDateTime, hour: u32) -> NaiveDateTime {
  let at = NaiveTime::from_hms_opt(hour.min(23), 0, 0).unwrap_or(NaiveTime::MIN);
  let today = now.date().and_time(at);
  if today > now {
    today
  } else {
    today + TimeDelta::days(1)
  }
}

/// Run the job once for `today`.
///
/// Reminders are only sent when `today` falls on `config.day`, and cover the
/// period containing yesterday. On other days the report is empty.
pub async fn run_once<S, N>(
  ledger: &Ledger<S>,
  notifier: &N,
  config: &NotificationConfig,
  today: NaiveDate,
) -> tally_core::Result<RunReport>
where
  S: LedgerStore,
  N: Notifier,
{
  let summary = ledger.organization_summary(None).await?;
  tracing::info!(
    period = %summary.period,
    grand_total = %summary.grand_total,
    debtors = summary.per_employee.len(),
    "daily summary"
  );

  if today.day() != config.day {
    return Ok(RunReport::default());
  }

  let yesterday = today.pred_opt().unwrap_or(today);
  let plan = ledger
    .notification_plan(Some(resolve_period(yesterday)))
    .await?;
  let mut report = RunReport {
    sent:    0,
    errors:  plan.errors,
    skipped: plan.skipped,
  };
  for notice in &plan.notices {
    match notifier.send(notice).await {
      Ok(()) => report.sent += 1,
      Err(e) => {
        tracing::warn!(chat_id = notice.chat_id, error = %e, "reminder failed");
        report.errors += 1;
      }
    }
  }

  tracing::info!(
    period = %plan.period,
    sent = report.sent,
    errors = report.errors,
    skipped = report.skipped,
    "reminders sent"
  );
  Ok(report)
}

/// Run the job forever at `config.hour` local time.
///
/// A failing run is logged and retried the next day.
pub async fn run_daily<S, N>(ledger: Ledger<S>, notifier: N, config: NotificationConfig)
where
  S: LedgerStore + 'static,
  N: Notifier + 'static,
{
  loop {
    let now = Local::now().naive_local();
    let next = next_run_after(now, config.hour);
    let wait = (next - now).to_std().unwrap_or_default();
    tracing::debug!(%next, "next daily run");
    tokio::time::sleep(wait).await;

    let today = Local::now().date_naive();
    if let Err(e) = run_once(&ledger, &notifier, &config, today).await {
      tracing::error!(error = %e, "daily run failed");
    }
  }
}
