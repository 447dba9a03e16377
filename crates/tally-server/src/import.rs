//! Bulk loading of rows from CSV files.

use std::{io::Read, path::Path};

use anyhow::Context as _;
use tally_core::store::{LedgerStore, Row, Table};

/// Read every record of a CSV with a header line. Records may have differing
/// lengths; cells are trimmed.
pub fn read_csv(reader: impl Read) -> anyhow::Result<Vec<Row>> {
  let mut rdr = csv::ReaderBuilder::new()
    .has_headers(true)
    .flexible(true)
    .trim(csv::Trim::All)
    .from_reader(reader);

  rdr
    .records()
    .map(|record| {
      let record = record.context("malformed CSV record")?;
      Ok(record.iter().map(str::to_owned).collect())
    })
    .collect()
}

/// Append the rows of the CSV at `path` to `table`. Returns the row count.
pub async fn import_file<S>(store: &S, table: Table, path: &Path) -> anyhow::Result<usize>
where
  S: LedgerStore,
{
  let file = std::fs::File::open(path)
    .with_context(|| format!("failed to open {}", path.display()))?;
  let rows = read_csv(file)?;
  let count = rows.len();

  store
    .append_rows(table, rows)
    .await
    .with_context(|| format!("failed to append to {table}"))?;

  tracing::info!(%table, count, path = %path.display(), "imported rows");
  Ok(count)
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use chrono::NaiveDate;
  use rust_decimal_macros::dec;
  use tally_core::{Ledger, memory::MemoryStore, service::FixedClock};

  use super::*;

  const DEBTS: &str = "\
date,employee,items,amount,period
11.03.2024, Ann ,coffee,2.5,March 2024
12.03.2024,Ann,cake,4
";

  #[test]
  fn short_records_are_kept() {
    let rows = read_csv(DEBTS.as_bytes()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][1], "Ann");
    assert_eq!(rows[1].len(), 4);
  }

  #[tokio::test]
  async fn imported_debts_are_aggregated() {
    let path = std::env::temp_dir()
      .join(format!("tally-import-{}.csv", std::process::id()));
    std::fs::write(&path, DEBTS).unwrap();

    let store = MemoryStore::new();
    let count = import_file(&store, Table::Debts, &path).await.unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(count, 2);

    // The second row has no period cell and is not attributed to any period.
    let today = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
    let ledger = Ledger::new(Arc::new(store)).with_clock(FixedClock(today));
    let ann = ledger.total_for_period("Ann", None).await.unwrap();
    assert_eq!(ann.total, dec!(2.5));
  }

  #[tokio::test]
  async fn missing_file_is_an_error() {
    let store = MemoryStore::new();
    let err = import_file(&store, Table::Admins, Path::new("/nonexistent/a.csv"))
      .await
      .unwrap_err();
    assert!(err.to_string().contains("failed to open"));
  }
}
