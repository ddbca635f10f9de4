//! The record list pipeline: filter → stats → stable sort → paginate.
//!
//! [`process`] is a pure transform over a snapshot slice. It never mutates
//! its input and allocates only the returned view. Stats are tallied over
//! the filtered, pre-pagination set, so `completed + overdue + pending`
//! always equals `total`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::record::{Frequency, MaintenanceRecord, Status};

// ─── Filter ──────────────────────────────────────────────────────────────────

/// Filter conditions for [`process`]. All set conditions are AND-ed; an
/// absent field means "no constraint".
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
  /// Case-insensitive substring match against the record title.
  pub search:     Option<String>,
  /// Match against the *derived* status, not a stored field.
  pub status:     Option<Status>,
  pub frequency:  Option<Frequency>,
  /// The record must reference this machine.
  pub machine:    Option<Uuid>,
  /// Inclusive lower bound on `scheduled_date`.
  pub start_date: Option<NaiveDate>,
  /// Inclusive upper bound on `scheduled_date`.
  pub end_date:   Option<NaiveDate>,
}

impl RecordFilter {
  pub fn matches(&self, record: &MaintenanceRecord, today: NaiveDate) -> bool {
    if let Some(needle) = &self.search
      && !record.title.to_lowercase().contains(&needle.to_lowercase())
    {
      return false;
    }
    if let Some(status) = self.status
      && record.status(today) != status
    {
      return false;
    }
    if let Some(frequency) = self.frequency
      && record.frequency != frequency
    {
      return false;
    }
    if let Some(machine) = self.machine
      && !record.machine_ids.contains(&machine)
    {
      return false;
    }
    if let Some(start) = self.start_date
      && record.scheduled_date < start
    {
      return false;
    }
    if let Some(end) = self.end_date
      && record.scheduled_date > end
    {
      return false;
    }
    true
  }
}

// ─── Sort ────────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  EnumString,
  Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortField {
  #[default]
  Date,
  Status,
  Frequency,
  Machine,
}

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  EnumString,
  Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
  #[default]
  Asc,
  Desc,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SortSpec {
  pub field: SortField,
  pub order: SortOrder,
}

// ─── Pagination ──────────────────────────────────────────────────────────────

pub const DEFAULT_PER_PAGE: u32 = 20;

/// 1-indexed page selection. An out-of-range page (including page 0) yields
/// an empty item list, never an error.
#[derive(Debug, Clone, Copy)]
pub struct Page {
  pub number:   u32,
  pub per_page: u32,
}

impl Default for Page {
  fn default() -> Self {
    Self { number: 1, per_page: DEFAULT_PER_PAGE }
  }
}

// ─── Query / output ──────────────────────────────────────────────────────────

/// Everything [`process`] needs besides the snapshot itself.
#[derive(Debug, Clone, Default)]
pub struct RecordQuery {
  pub filter: RecordFilter,
  pub sort:   SortSpec,
  pub page:   Page,
}

/// Counts over the filtered, pre-pagination set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordStats {
  pub total:     usize,
  pub completed: usize,
  pub overdue:   usize,
  pub pending:   usize,
}

/// The processed view: one page of records plus whole-result stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordView {
  pub items: Vec<MaintenanceRecord>,
  pub stats: RecordStats,
}

// ─── Pipeline ────────────────────────────────────────────────────────────────

/// Filter, tally, stable-sort, and paginate a snapshot of records.
///
/// `today` anchors every derived-status computation; callers establish it
/// once at their boundary rather than this function reading a clock.
/// Ties under the sort key keep their input order in both sort directions —
/// descending reverses the comparator, never the output.
pub fn process(
  records: &[MaintenanceRecord],
  query: &RecordQuery,
  today: NaiveDate,
) -> RecordView {
  let mut filtered: Vec<&MaintenanceRecord> = records
    .iter()
    .filter(|r| query.filter.matches(r, today))
    .collect();

  let mut stats = RecordStats { total: filtered.len(), ..Default::default() };
  for record in &filtered {
    match record.status(today) {
      Status::Completed => stats.completed += 1,
      Status::Overdue   => stats.overdue += 1,
      Status::Pending   => stats.pending += 1,
    }
  }

  let SortSpec { field, order } = query.sort;
  filtered.sort_by(|a, b| {
    let ordering = match field {
      SortField::Date   => a.scheduled_date.cmp(&b.scheduled_date),
      SortField::Status => a.status(today).cmp(&b.status(today)),
      SortField::Frequency => a
        .frequency
        .nominal_interval_days(a.custom_interval_days)
        .cmp(&b.frequency.nominal_interval_days(b.custom_interval_days)),
      // Records without machines sort ahead of any machine id.
      SortField::Machine => {
        a.machine_ids.iter().min().cmp(&b.machine_ids.iter().min())
      }
    };
    match order {
      SortOrder::Asc  => ordering,
      SortOrder::Desc => ordering.reverse(),
    }
  });

  let items = match query.page.number.checked_sub(1) {
    // Page 0 is out of range for a 1-indexed page number.
    None => Vec::new(),
    Some(zero_based) => filtered
      .into_iter()
      .skip(zero_based as usize * query.page.per_page as usize)
      .take(query.page.per_page as usize)
      .cloned()
      .collect(),
  };

  RecordView { items, stats }
}
