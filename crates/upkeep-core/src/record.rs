//! Maintenance record types — the unit of work the dashboard tracks.
//!
//! A record describes one piece of recurring (or one-off custom-interval)
//! maintenance work: what it is, where it applies, when it is due, and when
//! it was last done. Records are created and destroyed by the upstream
//! facilities API; this crate only ever reads snapshots and computes derived
//! views over them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::{Result, recurrence};

// ─── Frequency ───────────────────────────────────────────────────────────────

/// How often a piece of maintenance work recurs.
///
/// `Custom` carries its interval out-of-band in
/// [`MaintenanceRecord::custom_interval_days`] (1–365 days).
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Frequency {
  Daily,
  Weekly,
  Biweekly,
  Monthly,
  Quarterly,
  Biannually,
  Annually,
  Custom,
}

impl Frequency {
  /// The nominal length of one recurrence interval in days.
  ///
  /// Calendar-based frequencies use their average-ish day count; this is a
  /// sort key, not a date-arithmetic input — [`recurrence::next_due_date`]
  /// does the real calendar math. A custom record missing its interval
  /// (malformed upstream data) sorts as 0 days.
  pub fn nominal_interval_days(&self, custom_interval_days: Option<u32>) -> u32 {
    match self {
      Self::Daily      => 1,
      Self::Weekly     => 7,
      Self::Biweekly   => 14,
      Self::Monthly    => 30,
      Self::Quarterly  => 91,
      Self::Biannually => 182,
      Self::Annually   => 365,
      Self::Custom     => custom_interval_days.unwrap_or(0),
    }
  }
}

// ─── Derived status ──────────────────────────────────────────────────────────

/// A record's pending/overdue/completed classification.
///
/// Never persisted — always recomputed from the record's two date fields and
/// an explicit `today` (see [`MaintenanceRecord::status`]). The variant order
/// is the sort order: urgent work first.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  EnumString,
  Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
  Overdue,
  Pending,
  Completed,
}

// ─── MaintenanceRecord ───────────────────────────────────────────────────────

/// A snapshot of one maintenance job as held by the upstream API.
///
/// `room_id` and `machine_ids` are weak references; the referenced entities
/// are owned upstream and may be listed through the same store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceRecord {
  pub id:                   Uuid,
  pub title:                String,
  pub description:          Option<String>,
  pub room_id:              Option<Uuid>,
  #[serde(default)]
  pub machine_ids:          Vec<Uuid>,
  pub frequency:            Frequency,
  /// Required (1–365) iff `frequency` is [`Frequency::Custom`].
  pub custom_interval_days: Option<u32>,
  /// Calendar date the work is due.
  pub scheduled_date:       NaiveDate,
  /// Presence implies the work is done.
  pub completed_date:       Option<NaiveDate>,
  pub created_at:           DateTime<Utc>,
  pub updated_at:           DateTime<Utc>,
}

impl MaintenanceRecord {
  /// Derive the record's status as of `today` (date-only comparison).
  ///
  /// A completed record is never overdue, whatever its schedule says.
  pub fn status(&self, today: NaiveDate) -> Status {
    if self.completed_date.is_some() {
      Status::Completed
    } else if self.scheduled_date < today {
      Status::Overdue
    } else {
      Status::Pending
    }
  }
}

// ─── Input shapes ────────────────────────────────────────────────────────────

/// Input to [`crate::store::MaintenanceStore::create_record`].
/// Identity and timestamps are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMaintenanceRecord {
  pub title:                String,
  pub description:          Option<String>,
  pub room_id:              Option<Uuid>,
  #[serde(default)]
  pub machine_ids:          Vec<Uuid>,
  pub frequency:            Frequency,
  pub custom_interval_days: Option<u32>,
  pub scheduled_date:       NaiveDate,
}

impl NewMaintenanceRecord {
  /// Reject a malformed frequency/custom-interval combination before it is
  /// ever persisted.
  pub fn validate(&self) -> Result<()> {
    recurrence::validate_recurrence(self.frequency, self.custom_interval_days)
  }
}

/// Input to [`crate::store::MaintenanceStore::update_record`].
/// Absent fields are left unchanged. Completion goes through
/// [`crate::store::MaintenanceStore::complete_record`], not here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMaintenanceRecord {
  pub title:                Option<String>,
  pub description:          Option<String>,
  pub room_id:              Option<Uuid>,
  pub machine_ids:          Option<Vec<Uuid>>,
  pub frequency:            Option<Frequency>,
  pub custom_interval_days: Option<u32>,
  pub scheduled_date:       Option<NaiveDate>,
}

impl UpdateMaintenanceRecord {
  /// Validate what is checkable without the stored record: switching a
  /// record *to* custom requires a valid interval in the same request.
  pub fn validate(&self) -> Result<()> {
    if let Some(frequency) = self.frequency {
      recurrence::validate_recurrence(frequency, self.custom_interval_days)?;
    }
    Ok(())
  }
}
