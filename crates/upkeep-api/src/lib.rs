//! JSON REST API for the upkeep dashboard.
//!
//! Exposes an axum [`Router`] backed by any
//! [`upkeep_core::store::MaintenanceStore`]. Auth, TLS, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", upkeep_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod etag;
pub mod machines;
pub mod records;
pub mod rooms;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use upkeep_core::store::MaintenanceStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: MaintenanceStore + Clone + Send + Sync + 'static,
{
  Router::new()
    // Maintenance records
    .route("/records", get(records::list::<S>).post(records::create::<S>))
    .route(
      "/records/{id}",
      get(records::get_one::<S>)
        .put(records::update::<S>)
        .delete(records::delete_one::<S>),
    )
    .route("/records/{id}/complete", post(records::complete_one::<S>))
    .route("/records/{id}/next-due", get(records::next_due::<S>))
    // Machines
    .route("/machines", get(machines::list::<S>).post(machines::create::<S>))
    .route(
      "/machines/{id}",
      get(machines::get_one::<S>).delete(machines::delete_one::<S>),
    )
    // Rooms
    .route("/rooms", get(rooms::list::<S>).post(rooms::create::<S>))
    .route(
      "/rooms/{id}",
      get(rooms::get_one::<S>).delete(rooms::delete_one::<S>),
    )
    .with_state(store)
}
