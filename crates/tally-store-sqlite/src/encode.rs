//! Encoding between store rows and the JSON text kept in the `cells` column.
//!
//! A row is stored as a compact JSON array of strings so that ragged rows
//! (fewer cells than the header) survive unchanged.

use tally_core::store::Row;

use crate::Result;

pub fn encode_cells(row: &Row) -> Result<String> { Ok(serde_json::to_string(row)?) }

pub fn decode_cells(s: &str) -> Result<Row> { Ok(serde_json::from_str(s)?) }
