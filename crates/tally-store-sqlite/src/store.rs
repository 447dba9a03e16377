//! [`SqliteStore`]: the SQLite implementation of [`LedgerStore`].

use std::path::Path;

use tally_core::store::{LedgerStore, Row, Table};

use crate::{
  Error, Result,
  encode::{decode_cells, encode_cells},
  schema::{COUNT_ROWS, INSERT_ROW, SCHEMA, SELECT_ROWS},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A ledger store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Create the schema and give every empty table its header row.
  async fn init_schema(&self) -> Result<()> {
    let headers = Table::ALL
      .into_iter()
      .map(|t| -> Result<(String, String)> {
        Ok((t.as_ref().to_owned(), encode_cells(&t.header_row())?))
      })
      .collect::<Result<Vec<_>>>()?;

    self
      .conn
      .call(move |conn| {
        conn.execute_batch(SCHEMA)?;
        let tx = conn.transaction()?;
        for (sheet, header) in headers {
          let existing: i64 = tx.query_row(
            "SELECT COUNT(*) FROM sheet_rows WHERE sheet = ?1",
            rusqlite::params![sheet],
            |r| r.get(0),
          )?;
          if existing == 0 {
            tx.execute(INSERT_ROW, rusqlite::params![sheet, header])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Number of stored rows per table, header included.
  pub async fn row_counts(&self) -> Result<Vec<(Table, usize)>> {
    let raw: Vec<(String, i64)> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(COUNT_ROWS)?;
        let rows = stmt
          .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raw
      .into_iter()
      .map(|(sheet, count)| -> Result<(Table, usize)> {
        let table = sheet
          .parse::<Table>()
          .map_err(|_| Error::UnknownTable(sheet.clone()))?;
        Ok((table, count.max(0) as usize))
      })
      .collect()
  }
}

// ─── LedgerStore impl ────────────────────────────────────────────────────────

impl LedgerStore for SqliteStore {
  type Error = Error;

  async fn read_rows(&self, table: Table) -> Result<Vec<Row>> {
    let sheet = table.as_ref().to_owned();

    let raws: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(SELECT_ROWS)?;
        let rows = stmt
          .query_map(rusqlite::params![sheet], |row| row.get::<_, String>(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let rows = raws
      .iter()
      .enumerate()
      .filter_map(|(idx, raw)| match decode_cells(raw) {
        Ok(row) => Some(row),
        Err(e) => {
          tracing::warn!(%table, row = idx + 1, error = %e, "skipping undecodable row");
          None
        }
      })
      .collect();
    Ok(rows)
  }

  async fn append_rows(&self, table: Table, rows: Vec<Row>) -> Result<()> {
    let sheet = table.as_ref().to_owned();
    let encoded = rows
      .iter()
      .map(encode_cells)
      .collect::<Result<Vec<_>>>()?;
    let count = encoded.len();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare(INSERT_ROW)?;
          for cells in &encoded {
            stmt.execute(rusqlite::params![sheet, cells])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    tracing::debug!(%table, count, "appended rows");
    Ok(())
  }
}
