//! Tests for `MemoryStore` CRUD and completion behaviour.

use chrono::NaiveDate;
use uuid::Uuid;

use upkeep_core::{
  record::{Frequency, NewMaintenanceRecord, Status, UpdateMaintenanceRecord},
  site::{NewMachine, NewRoom},
  store::MaintenanceStore,
};

use crate::MemoryStore;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_record(title: &str) -> NewMaintenanceRecord {
  NewMaintenanceRecord {
    title:                title.to_string(),
    description:          None,
    room_id:              None,
    machine_ids:          vec![],
    frequency:            Frequency::Weekly,
    custom_interval_days: None,
    scheduled_date:       date(2024, 3, 1),
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_record() {
  let store = MemoryStore::new();

  let created = store.create_record(new_record("grease bearings")).await.unwrap();
  assert_eq!(created.title, "grease bearings");
  assert!(created.completed_date.is_none());

  let fetched = store.get_record(created.id).await.unwrap().unwrap();
  assert_eq!(fetched.id, created.id);
  assert_eq!(fetched.frequency, Frequency::Weekly);
}

#[tokio::test]
async fn get_record_missing_returns_none() {
  let store = MemoryStore::new();
  assert!(store.get_record(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_records_returns_everything_in_creation_order() {
  let store = MemoryStore::new();
  store.create_record(new_record("first")).await.unwrap();
  store.create_record(new_record("second")).await.unwrap();
  store.create_record(new_record("third")).await.unwrap();

  let all = store.list_records().await.unwrap();
  assert_eq!(all.len(), 3);
  assert_eq!(all[0].title, "first");
  assert_eq!(all[2].title, "third");
}

#[tokio::test]
async fn update_applies_only_the_set_fields() {
  let store = MemoryStore::new();
  let created = store.create_record(new_record("tighten belts")).await.unwrap();

  let updated = store
    .update_record(created.id, UpdateMaintenanceRecord {
      scheduled_date: Some(date(2024, 4, 1)),
      ..Default::default()
    })
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.title, "tighten belts");
  assert_eq!(updated.scheduled_date, date(2024, 4, 1));
  assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn update_missing_returns_none() {
  let store = MemoryStore::new();
  let result = store
    .update_record(Uuid::new_v4(), UpdateMaintenanceRecord::default())
    .await
    .unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn delete_record_reports_whether_it_existed() {
  let store = MemoryStore::new();
  let created = store.create_record(new_record("drain compressor")).await.unwrap();

  assert!(store.delete_record(created.id).await.unwrap());
  assert!(!store.delete_record(created.id).await.unwrap());
  assert!(store.get_record(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn complete_sets_the_completion_date() {
  let store = MemoryStore::new();
  let created = store.create_record(new_record("inspect seals")).await.unwrap();

  let done = store
    .complete_record(created.id, date(2024, 3, 5))
    .await
    .unwrap()
    .unwrap();

  assert_eq!(done.completed_date, Some(date(2024, 3, 5)));
  assert_eq!(done.status(date(2024, 6, 1)), Status::Completed);
}

#[tokio::test]
async fn complete_missing_returns_none() {
  let store = MemoryStore::new();
  let result = store.complete_record(Uuid::new_v4(), date(2024, 3, 5)).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn load_records_seeds_a_snapshot() {
  let store = MemoryStore::new();
  let created = store.create_record(new_record("source")).await.unwrap();

  let other = MemoryStore::new();
  other.load_records([created.clone()]).await;
  let fetched = other.get_record(created.id).await.unwrap().unwrap();
  assert_eq!(fetched.title, "source");
}

// ─── Machines and rooms ──────────────────────────────────────────────────────

#[tokio::test]
async fn machine_crud_round_trip() {
  let store = MemoryStore::new();
  let machine = store
    .create_machine(NewMachine { name: "press 4".to_string(), room_id: None })
    .await
    .unwrap();

  assert_eq!(store.list_machines().await.unwrap().len(), 1);
  assert_eq!(
    store.get_machine(machine.id).await.unwrap().unwrap().name,
    "press 4",
  );
  assert!(store.delete_machine(machine.id).await.unwrap());
  assert!(store.list_machines().await.unwrap().is_empty());
}

#[tokio::test]
async fn room_crud_round_trip() {
  let store = MemoryStore::new();
  let room = store
    .create_room(NewRoom {
      name:   "boiler room".to_string(),
      number: Some("B-12".to_string()),
    })
    .await
    .unwrap();

  assert_eq!(store.list_rooms().await.unwrap().len(), 1);
  let fetched = store.get_room(room.id).await.unwrap().unwrap();
  assert_eq!(fetched.number.as_deref(), Some("B-12"));
  assert!(store.delete_room(room.id).await.unwrap());
  assert!(!store.delete_room(room.id).await.unwrap());
}
