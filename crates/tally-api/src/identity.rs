//! Handlers for identity lookups.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/identity/{user_id}` | Role and display name; unknown ids are not an error |
//! | `GET`  | `/employees` | Named employees in table order |

use axum::{
  Json,
  extract::{Path, State},
};
use serde::Serialize;
use tally_core::{Ledger, identity::Role, store::LedgerStore};

use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct IdentityBody {
  pub user_id:       String,
  pub role:          Role,
  pub employee_name: Option<String>,
}

/// `GET /identity/{user_id}`
pub async fn get_one<S>(
  State(ledger): State<Ledger<S>>,
  Path(user_id): Path<String>,
) -> Result<Json<IdentityBody>, ApiError>
where
  S: LedgerStore + 'static,
{
  let role = ledger.role_of(&user_id).await?;
  let employee_name = match role {
    Role::Unknown => None,
    _ => ledger.employee_name(&user_id).await?,
  };
  Ok(Json(IdentityBody {
    user_id,
    role,
    employee_name,
  }))
}

/// `GET /employees`
pub async fn employees<S>(
  State(ledger): State<Ledger<S>>,
) -> Result<Json<Vec<String>>, ApiError>
where
  S: LedgerStore + 'static,
{
  Ok(Json(ledger.employee_names().await?))
}
