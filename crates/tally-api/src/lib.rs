//! JSON REST API for Tally.
//!
//! Exposes an axum [`Router`] backed by a [`tally_core::Ledger`] over any
//! [`tally_core::store::LedgerStore`]. Auth and TLS are the caller's
//! responsibility.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `GET`  | `/periods/current` | [`periods::current`] |
//! | `GET`  | `/periods/resolve?date=` | [`periods::resolve`] |
//! | `GET`  | `/debts/total?employee=&period=` | [`debts::total`] |
//! | `GET`  | `/debts/daily?date=&employee=` | [`debts::daily`] |
//! | `GET`  | `/summary?period=` | [`summary::handler`] |
//! | `GET`  | `/employees` | [`identity::employees`] |
//! | `GET`  | `/identity/{user_id}` | [`identity::get_one`] |
//! | `POST` | `/notifications/plan?period=` | [`notifications::plan`] |
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", tally_api::api_router(ledger.clone()))
//! ```

pub mod debts;
pub mod error;
pub mod identity;
pub mod notifications;
pub mod periods;
pub mod summary;

use axum::{
  Router,
  routing::{get, post},
};
use tally_core::{Ledger, store::LedgerStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `ledger`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(ledger: Ledger<S>) -> Router<()>
where
  S: LedgerStore + 'static,
{
  Router::new()
    // Periods
    .route("/periods/current", get(periods::current::<S>))
    .route("/periods/resolve", get(periods::resolve))
    // Debts
    .route("/debts/total", get(debts::total::<S>))
    .route("/debts/daily", get(debts::daily::<S>))
    .route("/summary", get(summary::handler::<S>))
    // Identity
    .route("/employees", get(identity::employees::<S>))
    .route("/identity/{user_id}", get(identity::get_one::<S>))
    // Notifications
    .route("/notifications/plan", post(notifications::plan::<S>))
    .with_state(ledger)
}
