//! [`Ledger`]: the aggregation engine bound to a store.
//!
//! Each call reads a fresh snapshot of the tables it needs and runs the pure
//! functions from [`crate::ledger`], [`crate::summary`] and friends over it.
//! Nothing is cached between calls, and the reads inside one call are not
//! transactional with respect to each other.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::{
  Error, Result,
  identity::{self, Role},
  ledger::{self, DailyEntry, PeriodTotal},
  notify::{self, NotificationPlan},
  period::{Period, resolve_period},
  record::{self, Admin, DebtEntry, Employee},
  store::{LedgerStore, Row, Table},
  summary::{self, DebtIndex, OrganizationSummary},
};

// ─── Clock ───────────────────────────────────────────────────────────────────

/// Source of "today", used to resolve the current billing period.
pub trait Clock: Send + Sync {
  fn today(&self) -> NaiveDate;
}

/// The local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn today(&self) -> NaiveDate { Local::now().date_naive() }
}

/// A clock stuck on one day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
  fn today(&self) -> NaiveDate { self.0 }
}

// ─── Ledger ──────────────────────────────────────────────────────────────────

/// Debt queries over a [`LedgerStore`].
///
/// Cloning is cheap; clones share the store and clock.
pub struct Ledger<S> {
  store: Arc<S>,
  clock: Arc<dyn Clock>,
}

impl<S> Clone for Ledger<S> {
  fn clone(&self) -> Self {
    Self {
      store: Arc::clone(&self.store),
      clock: Arc::clone(&self.clock),
    }
  }
}

impl<S: LedgerStore> Ledger<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self {
      store,
      clock: Arc::new(SystemClock),
    }
  }

  /// Replace the clock used to resolve the current period.
  pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
    self.clock = Arc::new(clock);
    self
  }

  pub fn store(&self) -> &Arc<S> { &self.store }

  pub fn today(&self) -> NaiveDate { self.clock.today() }

  pub fn current_period(&self) -> Period { resolve_period(self.today()) }

  fn period_or_current(&self, period: Option<Period>) -> Period {
    period.unwrap_or_else(|| self.current_period())
  }

  // ── Snapshots ─────────────────────────────────────────────────────────────

  async fn rows(&self, table: Table) -> Result<Vec<Row>> {
    self.store.read_rows(table).await.map_err(|e| {
      tracing::warn!(%table, error = %e, "store read failed");
      Error::Store {
        table,
        source: Box::new(e),
      }
    })
  }

  pub async fn debts(&self) -> Result<Vec<DebtEntry>> {
    Ok(record::decode_debts(&self.rows(Table::Debts).await?))
  }

  pub async fn employees(&self) -> Result<Vec<Employee>> {
    Ok(record::decode_employees(&self.rows(Table::Employees).await?))
  }

  pub async fn admins(&self) -> Result<Vec<Admin>> {
    Ok(record::decode_admins(&self.rows(Table::Admins).await?))
  }

  // ── Aggregation ───────────────────────────────────────────────────────────

  /// Debt of `employee_name` in `period` (default: the current period).
  pub async fn total_for_period(
    &self,
    employee_name: &str,
    period: Option<Period>,
  ) -> Result<PeriodTotal> {
    let period = self.period_or_current(period);
    let debts = self.debts().await?;
    Ok(ledger::total_for_period(&debts, employee_name, period))
  }

  /// Purchases recorded on `date`, optionally for one employee only.
  pub async fn entries_for_date(
    &self,
    date: NaiveDate,
    employee_name: Option<&str>,
  ) -> Result<Vec<DailyEntry>> {
    let debts = self.debts().await?;
    Ok(ledger::entries_for_date(&debts, date, employee_name))
  }

  /// Totals of every employee with debt in `period` (default: current).
  pub async fn organization_summary(
    &self,
    period: Option<Period>,
  ) -> Result<OrganizationSummary> {
    let period = self.period_or_current(period);
    let employees = self.employees().await?;
    let index = DebtIndex::build(&self.debts().await?);
    Ok(summary::organization_summary(&employees, &index, period))
  }

  /// Reminders to send for `period` (default: current).
  pub async fn notification_plan(
    &self,
    period: Option<Period>,
  ) -> Result<NotificationPlan> {
    let period = self.period_or_current(period);
    let employees = self.employees().await?;
    let index = DebtIndex::build(&self.debts().await?);
    Ok(notify::plan_notifications(&employees, &index, period))
  }

  // ── Identity ──────────────────────────────────────────────────────────────

  /// Resolve `user_id`. The employees table is only read if the id is not
  /// an admin.
  pub async fn role_of(&self, user_id: &str) -> Result<Role> {
    let admins = self.admins().await?;
    if identity::role_of(&admins, &[], user_id) == Role::Admin {
      return Ok(Role::Admin);
    }
    let employees = self.employees().await?;
    Ok(identity::role_of(&[], &employees, user_id))
  }

  pub async fn employee_name(&self, user_id: &str) -> Result<Option<String>> {
    let employees = self.employees().await?;
    Ok(identity::employee_name(&employees, user_id).map(str::to_owned))
  }

  /// Named employees in table order, duplicates included.
  pub async fn employee_names(&self) -> Result<Vec<String>> {
    Ok(
      self
        .employees()
        .await?
        .into_iter()
        .filter_map(|e| e.name)
        .collect(),
    )
  }
}

#[cfg(test)]
mod tests {
  use rust_decimal::Decimal;
  use rust_decimal_macros::dec;

  use super::*;
  use crate::memory::MemoryStore;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn seeded() -> MemoryStore {
    let store = MemoryStore::new();
    store
      .push(Table::Employees, &["101", "Ann"])
      .push(Table::Employees, &["102", "Bob"])
      .push(Table::Employees, &["103", "Cleo"])
      .push(Table::Admins, &["900"]);
    store
      .push(Table::Debts, &["11.03.2024", "Ann", "coffee", "20", "March 2024"])
      .push(Table::Debts, &["12.03.2024", "Cleo", "salad", "30", "March 2024"])
      .push(Table::Debts, &["12.03.2024", "Ann", "cake", "30", "March 2024"])
      .push(Table::Debts, &["12.03.2024", "Ann", "tea", "oops", "March 2024"])
      .push(Table::Debts, &["05.03.2024", "Bob", "bun", "12", "February 2024"]);
    store
  }

  fn ledger(store: MemoryStore, today: NaiveDate) -> Ledger<MemoryStore> {
    Ledger::new(Arc::new(store)).with_clock(FixedClock(today))
  }

  #[tokio::test]
  async fn current_period_follows_clock() {
    let l = ledger(MemoryStore::new(), date(2024, 1, 5));
    assert_eq!(l.current_period().label(), "December 2023");
  }

  #[tokio::test]
  async fn total_defaults_to_current_period() {
    let l = ledger(seeded(), date(2024, 3, 20));
    let ann = l.total_for_period("Ann", None).await.unwrap();
    assert_eq!(ann.period, Period::new(2024, 3).unwrap());
    assert_eq!(ann.total, dec!(50));
    assert_eq!(ann.details.len(), 2);

    let bob = l.total_for_period("Bob", None).await.unwrap();
    assert_eq!(bob.total, Decimal::ZERO);

    let bob = l
      .total_for_period("Bob", Period::new(2024, 2))
      .await
      .unwrap();
    assert_eq!(bob.total, dec!(12));
  }

  #[tokio::test]
  async fn malformed_amount_is_skipped_not_fatal() {
    let store = MemoryStore::new();
    for amount in ["1", "2", "x", "3", "4"] {
      store.push(Table::Debts, &["15.03.2024", "Ann", "item", amount, "March 2024"]);
    }
    let l = ledger(store, date(2024, 3, 20));
    let ann = l.total_for_period("Ann", None).await.unwrap();
    assert_eq!(ann.total, dec!(10));
    assert_eq!(ann.details.len(), 4);
  }

  #[tokio::test]
  async fn rows_with_unreadable_dates_still_count() {
    let store = MemoryStore::new();
    store
      .push(Table::Debts, &["11.03.2024", "Ann", "tea", "5", "March 2024"])
      .push(Table::Debts, &["3/12/2024", "Ann", "cake", "7", "March 2024"])
      .push(Table::Debts, &["", "Ann", "bun", "2", "March 2024"]);
    let l = ledger(store, date(2024, 3, 20));

    let ann = l.total_for_period("Ann", None).await.unwrap();
    assert_eq!(ann.total, dec!(14));
    assert_eq!(ann.details.len(), 3);

    let day = l.entries_for_date(date(2024, 3, 11), None).await.unwrap();
    assert_eq!(day.len(), 1);
  }

  #[tokio::test]
  async fn summary_over_store() {
    let l = ledger(seeded(), date(2024, 3, 20));
    let summary = l.organization_summary(None).await.unwrap();
    let names: Vec<&str> = summary
      .per_employee
      .iter()
      .map(|t| t.employee_name.as_str())
      .collect();
    assert_eq!(names, ["Ann", "Cleo"]);
    assert_eq!(summary.grand_total, dec!(80));
  }

  #[tokio::test]
  async fn entries_for_date_over_store() {
    let l = ledger(seeded(), date(2024, 3, 20));
    let all = l.entries_for_date(date(2024, 3, 12), None).await.unwrap();
    assert_eq!(all.len(), 2);
    let ann = l
      .entries_for_date(date(2024, 3, 12), Some("Ann"))
      .await
      .unwrap();
    assert_eq!(ann.len(), 1);
    assert_eq!(ann[0].items, "cake");
  }

  #[tokio::test]
  async fn identity_lookups() {
    let l = ledger(seeded(), date(2024, 3, 20));
    assert_eq!(l.role_of("900").await.unwrap(), Role::Admin);
    assert_eq!(l.role_of("101").await.unwrap(), Role::Employee);
    assert_eq!(l.role_of("555").await.unwrap(), Role::Unknown);
    assert_eq!(l.employee_name("102").await.unwrap().as_deref(), Some("Bob"));
    assert_eq!(l.employee_names().await.unwrap(), ["Ann", "Bob", "Cleo"]);
  }

  #[tokio::test]
  async fn notification_plan_over_store() {
    let l = ledger(seeded(), date(2024, 3, 20));
    let plan = l.notification_plan(None).await.unwrap();
    let ids: Vec<i64> = plan.notices.iter().map(|n| n.chat_id).collect();
    assert_eq!(ids, [101, 103]);
    assert_eq!(plan.skipped, 1);
    assert_eq!(plan.errors, 0);
  }

  #[tokio::test]
  async fn unavailable_store_is_an_error_not_zero() {
    let store = seeded();
    store.set_offline(true);
    let l = ledger(store, date(2024, 3, 20));

    let err = l.total_for_period("Ann", None).await.unwrap_err();
    assert!(err.is_store());
    assert!(matches!(err, Error::Store { table: Table::Debts, .. }));

    assert!(l.organization_summary(None).await.unwrap_err().is_store());
    assert!(l.role_of("900").await.unwrap_err().is_store());
  }
}
