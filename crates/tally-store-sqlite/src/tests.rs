//! Integration tests for `SqliteStore` against an in-memory database.

use std::sync::Arc;

use rust_decimal_macros::dec;
use tally_core::{
  Ledger, Period,
  service::FixedClock,
  store::{LedgerStore, Row, Table},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn row(cells: &[&str]) -> Row { cells.iter().map(|c| (*c).to_owned()).collect() }

// ─── Schema ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn fresh_store_has_header_rows() {
  let s = store().await;
  for table in Table::ALL {
    let rows = s.read_rows(table).await.unwrap();
    assert_eq!(rows, vec![table.header_row()], "{table}");
  }
}

#[tokio::test]
async fn reopening_does_not_duplicate_headers() {
  let dir = std::env::temp_dir().join(format!("tally-test-{}", std::process::id()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("reopen.db");
  let _ = std::fs::remove_file(&path);

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.append_rows(Table::Admins, vec![row(&["1"])]).await.unwrap();
  }
  let s = SqliteStore::open(&path).await.unwrap();
  let rows = s.read_rows(Table::Admins).await.unwrap();
  assert_eq!(rows, vec![row(&["id"]), row(&["1"])]);

  drop(s);
  let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn undecodable_row_is_skipped() {
  let dir = std::env::temp_dir().join(format!("tally-test-bad-{}", std::process::id()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("bad.db");
  let _ = std::fs::remove_file(&path);

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.append_rows(Table::Admins, vec![row(&["1"])]).await.unwrap();
  }
  {
    let conn = rusqlite::Connection::open(&path).unwrap();
    for cells in ["not json", "[1, 2]"] {
      conn
        .execute(
          "INSERT INTO sheet_rows (sheet, cells) VALUES ('admins', ?1)",
          rusqlite::params![cells],
        )
        .unwrap();
    }
  }
  let s = SqliteStore::open(&path).await.unwrap();
  s.append_rows(Table::Admins, vec![row(&["2"])]).await.unwrap();

  let rows = s.read_rows(Table::Admins).await.unwrap();
  assert_eq!(rows, vec![row(&["id"]), row(&["1"]), row(&["2"])]);

  drop(s);
  let _ = std::fs::remove_dir_all(&dir);
}

// ─── Rows ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn append_and_read_preserve_order_per_table() {
  let s = store().await;

  s.append_rows(Table::Employees, vec![row(&["101", "Ann"])])
    .await
    .unwrap();
  s.append_rows(Table::Admins, vec![row(&["900"])]).await.unwrap();
  s.append_rows(Table::Employees, vec![row(&["102", "Bob"]), row(&["103"])])
    .await
    .unwrap();

  let employees = s.read_rows(Table::Employees).await.unwrap();
  assert_eq!(employees, vec![
    row(&["id", "name"]),
    row(&["101", "Ann"]),
    row(&["102", "Bob"]),
    row(&["103"]),
  ]);

  let admins = s.read_rows(Table::Admins).await.unwrap();
  assert_eq!(admins.len(), 2);
}

#[tokio::test]
async fn append_nothing_is_a_no_op() {
  let s = store().await;
  s.append_rows(Table::Debts, vec![]).await.unwrap();
  assert_eq!(s.read_rows(Table::Debts).await.unwrap().len(), 1);
}

#[tokio::test]
async fn row_counts_include_headers() {
  let s = store().await;
  s.append_rows(Table::Debts, vec![
    row(&["11.03.2024", "Ann", "tea", "2", "March 2024"]),
    row(&["12.03.2024", "Ann", "bun", "3", "March 2024"]),
  ])
  .await
  .unwrap();

  let counts = s.row_counts().await.unwrap();
  assert!(counts.contains(&(Table::Debts, 3)));
  assert!(counts.contains(&(Table::Employees, 1)));
  assert!(counts.contains(&(Table::Admins, 1)));
}

// ─── Ledger over SQLite ──────────────────────────────────────────────────────

#[tokio::test]
async fn ledger_aggregates_from_sqlite() {
  let s = store().await;
  s.append_rows(Table::Employees, vec![
    row(&["101", "Ann"]),
    row(&["102", "Bob"]),
  ])
  .await
  .unwrap();
  s.append_rows(Table::Debts, vec![
    row(&["11.03.2024", "Ann", "tea", "2.40", "March 2024"]),
    row(&["12.03.2024", "Ann", "bun", "bad", "March 2024"]),
    row(&["12.03.2024", "Bob", "soup", "6", "2024-03"]),
    row(&["01.03.2024", "Ann", "cake", "9", "February 2024"]),
  ])
  .await
  .unwrap();

  let today = chrono_date(2024, 3, 15);
  let ledger = Ledger::new(Arc::new(s)).with_clock(FixedClock(today));

  let ann = ledger.total_for_period("Ann", None).await.unwrap();
  assert_eq!(ann.total, dec!(2.40));

  let feb = ledger
    .total_for_period("Ann", Period::new(2024, 2))
    .await
    .unwrap();
  assert_eq!(feb.total, dec!(9));

  let summary = ledger.organization_summary(None).await.unwrap();
  assert_eq!(summary.grand_total, dec!(8.40));
}

fn chrono_date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
  chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
