//! ETag computation for record resources.
//!
//! ETags are SHA-256 hashes over a record's id and `updated_at`, so any
//! upstream mutation invalidates cached copies. Dashboard clients sit behind
//! a query cache and revalidate with `If-None-Match`.

use sha2::{Digest, Sha256};
use upkeep_core::record::MaintenanceRecord;

/// Compute the (quoted) ETag for a record.
pub fn record_etag(record: &MaintenanceRecord) -> String {
  let mut hasher = Sha256::new();
  hasher.update(record.id.as_bytes());
  hasher.update(record.updated_at.timestamp_micros().to_le_bytes());
  format!("\"{}\"", hex::encode(hasher.finalize()))
}

/// Whether a client-sent `If-None-Match` value names `etag`.
///
/// Some clients send the value without the surrounding double-quotes; both
/// forms are accepted.
pub fn matches(candidate: &str, etag: &str) -> bool {
  candidate.trim().trim_matches('"') == etag.trim_matches('"')
}
