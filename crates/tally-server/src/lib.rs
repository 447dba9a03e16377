//! The Tally server: configuration, the HTTP app, CSV import, and the daily
//! reminder job.

pub mod config;
pub mod import;
pub mod notifier;
pub mod scheduler;

use axum::Router;
use tally_core::{Ledger, store::LedgerStore};
use tower_http::trace::TraceLayer;

pub use config::{NotificationConfig, ServerConfig};

/// The full application: the JSON API under `/api`, with request tracing.
pub fn app<S>(ledger: Ledger<S>) -> Router
where
  S: LedgerStore + 'static,
{
  Router::new()
    .nest("/api", tally_api::api_router(ledger))
    .layer(TraceLayer::new_for_http())
}
