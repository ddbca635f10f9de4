//! Handlers for `/rooms` endpoints — thin proxies to the store.
//!
//! Same surface as `/machines`: list, create, get, delete.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use upkeep_core::{
  site::{NewRoom, Room},
  store::MaintenanceStore,
};
use uuid::Uuid;

use crate::error::ApiError;

/// `GET /rooms`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Room>>, ApiError>
where
  S: MaintenanceStore,
{
  let rooms = store.list_rooms().await.map_err(ApiError::from_store)?;
  Ok(Json(rooms))
}

/// `POST /rooms`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewRoom>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MaintenanceStore,
{
  let room = store.create_room(body).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(room)))
}

/// `GET /rooms/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Room>, ApiError>
where
  S: MaintenanceStore,
{
  let room = store
    .get_room(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("room {id} not found")))?;
  Ok(Json(room))
}

/// `DELETE /rooms/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: MaintenanceStore,
{
  if store.delete_room(id).await.map_err(ApiError::from_store)? {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("room {id} not found")))
  }
}
