//! The `MaintenanceStore` trait — where the authoritative data lives.
//!
//! The dashboard owns no persistent state; every operation here is a proxy
//! to whatever holds the records (the upstream facilities API in
//! production, an in-memory snapshot in tests and local caches). Higher
//! layers depend on this abstraction, never on a concrete backend.

use std::{convert::Infallible, future::Future};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
  record::{MaintenanceRecord, NewMaintenanceRecord, UpdateMaintenanceRecord},
  site::{Machine, NewMachine, NewRoom, Room},
};

// ─── Failure classification ──────────────────────────────────────────────────

/// How a store error should surface over HTTP.
///
/// The dashboard's only failure-handling strategy is forwarding upstream
/// status codes; a store whose failures originate upstream reports the
/// status here and the API layer forwards it without interpretation.
pub trait StoreFailure: std::error::Error {
  /// The upstream HTTP status to forward, if this failure carries one.
  fn upstream_status(&self) -> Option<u16> {
    None
  }
}

/// Stores that cannot fail need no bespoke error type.
impl StoreFailure for Infallible {}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a maintenance data backend.
///
/// Reads of a single entity return `Option` (`None` for "no such id");
/// deletes return whether anything was deleted. Everything else that goes
/// wrong is a `Self::Error`.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (tokio with `axum`).
pub trait MaintenanceStore: Send + Sync {
  type Error: StoreFailure + Send + Sync + 'static;

  // ── Maintenance records ───────────────────────────────────────────────

  /// Fetch the full record snapshot the list pipeline runs over.
  fn list_records(
    &self,
  ) -> impl Future<Output = Result<Vec<MaintenanceRecord>, Self::Error>> + Send + '_;

  fn get_record(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<MaintenanceRecord>, Self::Error>> + Send + '_;

  /// Persist a new record. Identity and timestamps are assigned by the
  /// store; the input is assumed already validated.
  fn create_record(
    &self,
    input: NewMaintenanceRecord,
  ) -> impl Future<Output = Result<MaintenanceRecord, Self::Error>> + Send + '_;

  /// Apply the set fields of `input`. Returns `None` if the id is unknown.
  fn update_record(
    &self,
    id: Uuid,
    input: UpdateMaintenanceRecord,
  ) -> impl Future<Output = Result<Option<MaintenanceRecord>, Self::Error>> + Send + '_;

  fn delete_record(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Mark a record completed on the given date. Returns `None` if the id is
  /// unknown.
  fn complete_record(
    &self,
    id: Uuid,
    on: NaiveDate,
  ) -> impl Future<Output = Result<Option<MaintenanceRecord>, Self::Error>> + Send + '_;

  // ── Machines ──────────────────────────────────────────────────────────

  fn list_machines(
    &self,
  ) -> impl Future<Output = Result<Vec<Machine>, Self::Error>> + Send + '_;

  fn get_machine(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Machine>, Self::Error>> + Send + '_;

  fn create_machine(
    &self,
    input: NewMachine,
  ) -> impl Future<Output = Result<Machine, Self::Error>> + Send + '_;

  fn delete_machine(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Rooms ─────────────────────────────────────────────────────────────

  fn list_rooms(
    &self,
  ) -> impl Future<Output = Result<Vec<Room>, Self::Error>> + Send + '_;

  fn get_room(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Room>, Self::Error>> + Send + '_;

  fn create_room(
    &self,
    input: NewRoom,
  ) -> impl Future<Output = Result<Room, Self::Error>> + Send + '_;

  fn delete_room(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
