//! [`MemoryStore`]: an in-process [`LedgerStore`] for tests and embedding.

use std::{
  collections::HashMap,
  sync::{Arc, RwLock},
};

use thiserror::Error;

use crate::store::{LedgerStore, Row, Table};

#[derive(Debug, Error)]
pub enum MemoryError {
  #[error("store is offline")]
  Offline,

  #[error("store lock poisoned")]
  Poisoned,
}

#[derive(Default)]
struct Inner {
  tables:  HashMap<Table, Vec<Row>>,
  offline: bool,
}

/// A store holding every table in memory.
///
/// Cloning is cheap and clones share the same tables. Can be switched
/// offline to exercise the unavailable-store path.
#[derive(Clone)]
pub struct MemoryStore {
  inner: Arc<RwLock<Inner>>,
}

impl Default for MemoryStore {
  fn default() -> Self { Self::new() }
}

impl MemoryStore {
  /// An empty store whose tables contain only their header rows.
  pub fn new() -> Self {
    let tables = Table::ALL
      .into_iter()
      .map(|t| (t, vec![t.header_row()]))
      .collect();
    Self {
      inner: Arc::new(RwLock::new(Inner {
        tables,
        offline: false,
      })),
    }
  }

  /// Append one row given as string slices. Ignores the offline flag.
  pub fn push(&self, table: Table, cells: &[&str]) -> &Self {
    if let Ok(mut inner) = self.inner.write() {
      inner
        .tables
        .entry(table)
        .or_default()
        .push(cells.iter().map(|c| (*c).to_owned()).collect());
    }
    self
  }

  pub fn set_offline(&self, offline: bool) {
    if let Ok(mut inner) = self.inner.write() {
      inner.offline = offline;
    }
  }
}

impl LedgerStore for MemoryStore {
  type Error = MemoryError;

  async fn read_rows(&self, table: Table) -> Result<Vec<Row>, MemoryError> {
    let inner = self.inner.read().map_err(|_| MemoryError::Poisoned)?;
    if inner.offline {
      return Err(MemoryError::Offline);
    }
    Ok(inner.tables.get(&table).cloned().unwrap_or_default())
  }

  async fn append_rows(
    &self,
    table: Table,
    rows: Vec<Row>,
  ) -> Result<(), MemoryError> {
    let mut inner = self.inner.write().map_err(|_| MemoryError::Poisoned)?;
    if inner.offline {
      return Err(MemoryError::Offline);
    }
    inner.tables.entry(table).or_default().extend(rows);
    Ok(())
  }
}
