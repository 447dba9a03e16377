//! Error types for `tally-core`.

use thiserror::Error;

use crate::store::Table;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid billing period: {0:?}")]
  InvalidPeriod(String),

  #[error("invalid date: {0:?}")]
  InvalidDate(String),

  /// The store adapter could not serve a read. Never folded into an empty
  /// result.
  #[error("store unavailable while reading {table}: {source}")]
  Store {
    table:  Table,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
}

impl Error {
  pub fn is_store(&self) -> bool { matches!(self, Self::Store { .. }) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
