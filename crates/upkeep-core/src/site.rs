//! Rooms and machines — the places and equipment records point at.
//!
//! Both are thin envelopes owned by the upstream facilities API; the
//! dashboard lists them so filters and record forms can resolve names. A
//! record references them weakly by id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A physical room (or area) maintenance work happens in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
  pub id:         Uuid,
  pub name:       String,
  /// Door/plan number as printed on site, if any.
  pub number:     Option<String>,
  pub created_at: DateTime<Utc>,
}

/// A machine that maintenance records can reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Machine {
  pub id:         Uuid,
  pub name:       String,
  pub room_id:    Option<Uuid>,
  pub created_at: DateTime<Utc>,
}

/// Input to [`crate::store::MaintenanceStore::create_room`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRoom {
  pub name:   String,
  pub number: Option<String>,
}

/// Input to [`crate::store::MaintenanceStore::create_machine`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMachine {
  pub name:    String,
  pub room_id: Option<Uuid>,
}
