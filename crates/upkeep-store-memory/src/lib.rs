//! In-memory implementation of [`MaintenanceStore`].
//!
//! Holds a point-in-time snapshot of records, machines, and rooms behind a
//! `tokio::sync::RwLock`. This is the store the server's integration tests
//! run against, and the snapshot cache clients use when they hold records
//! locally. Nothing is persisted; dropping the store drops the data.

use std::{collections::HashMap, convert::Infallible, sync::Arc};

use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use upkeep_core::{
  record::{MaintenanceRecord, NewMaintenanceRecord, UpdateMaintenanceRecord},
  site::{Machine, NewMachine, NewRoom, Room},
  store::MaintenanceStore,
};

#[cfg(test)]
mod tests;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A snapshot store backed by in-process hash maps.
///
/// Cheap to clone — clones share the same underlying maps.
#[derive(Clone, Default)]
pub struct MemoryStore {
  inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
  records:  HashMap<Uuid, MaintenanceRecord>,
  machines: HashMap<Uuid, Machine>,
  rooms:    HashMap<Uuid, Room>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Seed the store with already-shaped records — snapshot ingestion for
  /// clients that fetched elsewhere, and a convenience for tests.
  pub async fn load_records(&self, records: impl IntoIterator<Item = MaintenanceRecord>) {
    let mut inner = self.inner.write().await;
    for record in records {
      inner.records.insert(record.id, record);
    }
  }
}

impl MaintenanceStore for MemoryStore {
  type Error = Infallible;

  // ── Maintenance records ───────────────────────────────────────────────

  async fn list_records(&self) -> Result<Vec<MaintenanceRecord>, Self::Error> {
    let inner = self.inner.read().await;
    let mut records: Vec<_> = inner.records.values().cloned().collect();
    // Deterministic snapshot order; the pipeline's stable sort builds on it.
    records.sort_by_key(|r| (r.created_at, r.id));
    Ok(records)
  }

  async fn get_record(&self, id: Uuid) -> Result<Option<MaintenanceRecord>, Self::Error> {
    Ok(self.inner.read().await.records.get(&id).cloned())
  }

  async fn create_record(
    &self,
    input: NewMaintenanceRecord,
  ) -> Result<MaintenanceRecord, Self::Error> {
    let now = Utc::now();
    let record = MaintenanceRecord {
      id:                   Uuid::new_v4(),
      title:                input.title,
      description:          input.description,
      room_id:              input.room_id,
      machine_ids:          input.machine_ids,
      frequency:            input.frequency,
      custom_interval_days: input.custom_interval_days,
      scheduled_date:       input.scheduled_date,
      completed_date:       None,
      created_at:           now,
      updated_at:           now,
    };
    self.inner.write().await.records.insert(record.id, record.clone());
    Ok(record)
  }

  async fn update_record(
    &self,
    id: Uuid,
    input: UpdateMaintenanceRecord,
  ) -> Result<Option<MaintenanceRecord>, Self::Error> {
    let mut inner = self.inner.write().await;
    let Some(record) = inner.records.get_mut(&id) else {
      return Ok(None);
    };
    if let Some(title) = input.title {
      record.title = title;
    }
    if let Some(description) = input.description {
      record.description = Some(description);
    }
    if let Some(room_id) = input.room_id {
      record.room_id = Some(room_id);
    }
    if let Some(machine_ids) = input.machine_ids {
      record.machine_ids = machine_ids;
    }
    if let Some(frequency) = input.frequency {
      record.frequency = frequency;
    }
    if let Some(days) = input.custom_interval_days {
      record.custom_interval_days = Some(days);
    }
    if let Some(scheduled) = input.scheduled_date {
      record.scheduled_date = scheduled;
    }
    record.updated_at = Utc::now();
    Ok(Some(record.clone()))
  }

  async fn delete_record(&self, id: Uuid) -> Result<bool, Self::Error> {
    Ok(self.inner.write().await.records.remove(&id).is_some())
  }

  async fn complete_record(
    &self,
    id: Uuid,
    on: NaiveDate,
  ) -> Result<Option<MaintenanceRecord>, Self::Error> {
    let mut inner = self.inner.write().await;
    let Some(record) = inner.records.get_mut(&id) else {
      return Ok(None);
    };
    record.completed_date = Some(on);
    record.updated_at = Utc::now();
    Ok(Some(record.clone()))
  }

  // ── Machines ──────────────────────────────────────────────────────────

  async fn list_machines(&self) -> Result<Vec<Machine>, Self::Error> {
    let inner = self.inner.read().await;
    let mut machines: Vec<_> = inner.machines.values().cloned().collect();
    machines.sort_by_key(|m| (m.created_at, m.id));
    Ok(machines)
  }

  async fn get_machine(&self, id: Uuid) -> Result<Option<Machine>, Self::Error> {
    Ok(self.inner.read().await.machines.get(&id).cloned())
  }

  async fn create_machine(&self, input: NewMachine) -> Result<Machine, Self::Error> {
    let machine = Machine {
      id:         Uuid::new_v4(),
      name:       input.name,
      room_id:    input.room_id,
      created_at: Utc::now(),
    };
    self.inner.write().await.machines.insert(machine.id, machine.clone());
    Ok(machine)
  }

  async fn delete_machine(&self, id: Uuid) -> Result<bool, Self::Error> {
    Ok(self.inner.write().await.machines.remove(&id).is_some())
  }

  // ── Rooms ─────────────────────────────────────────────────────────────

  async fn list_rooms(&self) -> Result<Vec<Room>, Self::Error> {
    let inner = self.inner.read().await;
    let mut rooms: Vec<_> = inner.rooms.values().cloned().collect();
    rooms.sort_by_key(|r| (r.created_at, r.id));
    Ok(rooms)
  }

  async fn get_room(&self, id: Uuid) -> Result<Option<Room>, Self::Error> {
    Ok(self.inner.read().await.rooms.get(&id).cloned())
  }

  async fn create_room(&self, input: NewRoom) -> Result<Room, Self::Error> {
    let room = Room {
      id:         Uuid::new_v4(),
      name:       input.name,
      number:     input.number,
      created_at: Utc::now(),
    };
    self.inner.write().await.rooms.insert(room.id, room.clone());
    Ok(room)
  }

  async fn delete_room(&self, id: Uuid) -> Result<bool, Self::Error> {
    Ok(self.inner.write().await.rooms.remove(&id).is_some())
  }
}
