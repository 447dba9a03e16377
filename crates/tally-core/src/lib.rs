//! Core types and the debt aggregation engine for Tally.
//!
//! This crate has no HTTP or database dependencies. Storage backends
//! implement [`store::LedgerStore`]; transports call into
//! [`service::Ledger`].

// Native `async fn` in traits (stable since Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod identity;
pub mod ledger;
pub mod memory;
pub mod notify;
pub mod period;
pub mod record;
pub mod service;
pub mod store;
pub mod summary;

pub use error::{Error, Result};
pub use period::{Period, resolve_period};
pub use service::Ledger;
