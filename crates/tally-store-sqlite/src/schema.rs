//! SQL schema for the Tally SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Every spreadsheet table lives here, one row per spreadsheet row.
-- Strictly append-only: no UPDATE or DELETE is ever issued.
CREATE TABLE IF NOT EXISTS sheet_rows (
    position INTEGER PRIMARY KEY AUTOINCREMENT,  -- global insertion order
    sheet    TEXT NOT NULL,                      -- 'employees' | 'debts' | 'admins'
    cells    TEXT NOT NULL                       -- JSON array of strings
);

CREATE INDEX IF NOT EXISTS sheet_rows_sheet_idx ON sheet_rows(sheet, position);

PRAGMA user_version = 1;
";

/// Rows of `sheet` in insertion order.
pub const SELECT_ROWS: &str =
  "SELECT cells FROM sheet_rows WHERE sheet = ?1 ORDER BY position";

pub const INSERT_ROW: &str = "INSERT INTO sheet_rows (sheet, cells) VALUES (?1, ?2)";

pub const COUNT_ROWS: &str =
  "SELECT sheet, COUNT(*) FROM sheet_rows GROUP BY sheet ORDER BY sheet";
