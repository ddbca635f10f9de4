//! Plain-text table rendering for CLI output.

use upkeep_core::{
  pipeline::RecordStats,
  site::{Machine, Room},
};

use crate::client::RecordItem;

/// One line per record: id, due date, status, frequency, title.
pub fn records_table(items: &[RecordItem]) -> String {
  let mut out = String::new();
  out.push_str(&format!(
    "{:<36}  {:<10}  {:<9}  {:<10}  TITLE\n",
    "ID", "DUE", "STATUS", "FREQUENCY",
  ));
  for item in items {
    out.push_str(&format!(
      "{:<36}  {:<10}  {:<9}  {:<10}  {}\n",
      item.record.id,
      item.record.scheduled_date,
      item.status,
      item.record.frequency,
      item.record.title,
    ));
  }
  out
}

/// Stats footer for a record listing.
pub fn stats_line(stats: &RecordStats) -> String {
  format!(
    "{} total · {} overdue · {} pending · {} completed",
    stats.total, stats.overdue, stats.pending, stats.completed,
  )
}

/// Multi-line detail view for a single record.
pub fn record_detail(item: &RecordItem) -> String {
  let mut out = String::new();
  out.push_str(&format!("id:         {}\n", item.record.id));
  out.push_str(&format!("title:      {}\n", item.record.title));
  if let Some(description) = &item.record.description {
    out.push_str(&format!("about:      {description}\n"));
  }
  out.push_str(&format!("status:     {}\n", item.status));
  out.push_str(&format!("frequency:  {}", item.record.frequency));
  if let Some(days) = item.record.custom_interval_days {
    out.push_str(&format!(" ({days} days)"));
  }
  out.push('\n');
  out.push_str(&format!("due:        {}\n", item.record.scheduled_date));
  if let Some(done) = item.record.completed_date {
    out.push_str(&format!("completed:  {done}\n"));
  }
  if let Some(room) = item.record.room_id {
    out.push_str(&format!("room:       {room}\n"));
  }
  for machine in &item.record.machine_ids {
    out.push_str(&format!("machine:    {machine}\n"));
  }
  out
}

pub fn machines_table(machines: &[Machine]) -> String {
  let mut out = String::new();
  out.push_str(&format!("{:<36}  {:<36}  NAME\n", "ID", "ROOM"));
  for machine in machines {
    let room = machine
      .room_id
      .map(|id| id.to_string())
      .unwrap_or_else(|| "-".to_string());
    out.push_str(&format!("{:<36}  {room:<36}  {}\n", machine.id, machine.name));
  }
  out
}

pub fn rooms_table(rooms: &[Room]) -> String {
  let mut out = String::new();
  out.push_str(&format!("{:<36}  {:<8}  NAME\n", "ID", "NUMBER"));
  for room in rooms {
    let number = room.number.as_deref().unwrap_or("-");
    out.push_str(&format!("{:<36}  {number:<8}  {}\n", room.id, room.name));
  }
  out
}
