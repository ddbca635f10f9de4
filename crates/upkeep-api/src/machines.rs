//! Handlers for `/machines` endpoints — thin proxies to the store.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/machines` | All machines |
//! | `POST`   | `/machines` | Body: [`NewMachine`] |
//! | `GET`    | `/machines/:id` | 404 if not found |
//! | `DELETE` | `/machines/:id` | 204 / 404 |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use upkeep_core::{
  site::{Machine, NewMachine},
  store::MaintenanceStore,
};
use uuid::Uuid;

use crate::error::ApiError;

/// `GET /machines`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Machine>>, ApiError>
where
  S: MaintenanceStore,
{
  let machines = store.list_machines().await.map_err(ApiError::from_store)?;
  Ok(Json(machines))
}

/// `POST /machines`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewMachine>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MaintenanceStore,
{
  let machine = store
    .create_machine(body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(machine)))
}

/// `GET /machines/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Machine>, ApiError>
where
  S: MaintenanceStore,
{
  let machine = store
    .get_machine(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("machine {id} not found")))?;
  Ok(Json(machine))
}

/// `DELETE /machines/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: MaintenanceStore,
{
  if store.delete_machine(id).await.map_err(ApiError::from_store)? {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("machine {id} not found")))
  }
}
