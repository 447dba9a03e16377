//! The `LedgerStore` trait and the tables it serves.
//!
//! The trait is implemented by storage backends (e.g. `tally-store-sqlite`,
//! or [`crate::memory::MemoryStore`]). Everything above it works on plain
//! string rows and never sees backend types.

use std::future::Future;

use serde::{Deserialize, Serialize};

/// One spreadsheet row: cells in column order. Trailing empty cells may be
/// missing entirely.
pub type Row = Vec<String>;

// ─── Tables ──────────────────────────────────────────────────────────────────

/// The three tables the ledger is built from.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Table {
  Employees,
  Debts,
  Admins,
}

impl Table {
  pub const ALL: [Table; 3] = [Table::Employees, Table::Debts, Table::Admins];

  /// The header row a freshly created table starts with.
  pub fn header(self) -> &'static [&'static str] {
    match self {
      Table::Employees => &["id", "name"],
      Table::Debts => &["date", "employee", "items", "amount", "period"],
      Table::Admins => &["id"],
    }
  }

  pub fn header_row(self) -> Row {
    self.header().iter().map(|c| (*c).to_owned()).collect()
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the tabular store backing the ledger.
///
/// Tables are append-only; there is no update or delete. Reads return every
/// row in store order, header first.
///
/// A backend that cannot reach its data must return an error rather than an
/// empty table.
pub trait LedgerStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All rows of `table`, header row first.
  fn read_rows(
    &self,
    table: Table,
  ) -> impl Future<Output = Result<Vec<Row>, Self::Error>> + Send + '_;

  /// Append `rows` after the last row of `table`, preserving their order.
  fn append_rows(
    &self,
    table: Table,
    rows: Vec<Row>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn table_names_round_trip() {
    for table in Table::ALL {
      let name = table.to_string();
      assert_eq!(name.parse::<Table>().unwrap(), table);
    }
    assert_eq!(Table::Debts.as_ref(), "debts");
    assert!("Debts ".parse::<Table>().is_err());
  }

  #[test]
  fn debts_header_has_five_columns() {
    assert_eq!(Table::Debts.header_row().len(), 5);
  }
}
