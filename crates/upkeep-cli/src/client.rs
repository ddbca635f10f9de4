//! Async HTTP client wrapping the upkeep JSON API.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use upkeep_core::{
  pipeline::RecordStats,
  record::{MaintenanceRecord, Status},
  site::{Machine, Room},
};
use uuid::Uuid;

/// Connection settings for the upkeep API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub username: String,
  pub password: String,
}

// ─── Response shapes ──────────────────────────────────────────────────────────

/// A record as the API serves it: stored fields plus the derived status.
#[derive(Debug, Deserialize)]
pub struct RecordItem {
  #[serde(flatten)]
  pub record: MaintenanceRecord,
  pub status: Status,
}

#[derive(Debug, Deserialize)]
pub struct RecordList {
  pub items: Vec<RecordItem>,
  pub stats: RecordStats,
}

#[derive(Debug, Deserialize)]
pub struct Completion {
  pub record:   RecordItem,
  pub next_due: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct NextDue {
  pub basis:    NaiveDate,
  pub next_due: NaiveDate,
}

// ─── Client ───────────────────────────────────────────────────────────────────

/// Async HTTP client for the upkeep JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    if self.config.username.is_empty() {
      req
    } else {
      req.basic_auth(&self.config.username, Some(&self.config.password))
    }
  }

  // ── Records ───────────────────────────────────────────────────────────────

  /// `GET /api/records` with the given query parameters.
  pub async fn list_records(&self, query: &[(&str, String)]) -> Result<RecordList> {
    let resp = self
      .auth(self.client.get(self.url("/records")))
      .query(query)
      .send()
      .await
      .context("GET /records failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /records → {}", resp.status()));
    }
    resp.json().await.context("deserialising records")
  }

  /// `GET /api/records/{id}`
  pub async fn get_record(&self, id: Uuid) -> Result<RecordItem> {
    let resp = self
      .auth(self.client.get(self.url(&format!("/records/{id}"))))
      .send()
      .await
      .context("GET /records/{id} failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /records/{id} → {}", resp.status()));
    }
    resp.json().await.context("deserialising record")
  }

  /// `GET /api/records/{id}/next-due`
  pub async fn next_due(&self, id: Uuid) -> Result<NextDue> {
    let resp = self
      .auth(self.client.get(self.url(&format!("/records/{id}/next-due"))))
      .send()
      .await
      .context("GET next-due failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET next-due → {}", resp.status()));
    }
    resp.json().await.context("deserialising next-due")
  }

  /// `POST /api/records/{id}/complete`
  pub async fn complete_record(
    &self,
    id: Uuid,
    date: Option<NaiveDate>,
  ) -> Result<Completion> {
    let body = match date {
      Some(d) => serde_json::json!({ "date": d }),
      None => serde_json::json!({}),
    };
    let resp = self
      .auth(self.client.post(self.url(&format!("/records/{id}/complete"))))
      .json(&body)
      .send()
      .await
      .context("POST complete failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("POST complete → {}", resp.status()));
    }
    resp.json().await.context("deserialising completion")
  }

  // ── Machines and rooms ────────────────────────────────────────────────────

  /// `GET /api/machines`
  pub async fn list_machines(&self) -> Result<Vec<Machine>> {
    let resp = self
      .auth(self.client.get(self.url("/machines")))
      .send()
      .await
      .context("GET /machines failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /machines → {}", resp.status()));
    }
    resp.json().await.context("deserialising machines")
  }

  /// `GET /api/rooms`
  pub async fn list_rooms(&self) -> Result<Vec<Room>> {
    let resp = self
      .auth(self.client.get(self.url("/rooms")))
      .send()
      .await
      .context("GET /rooms failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /rooms → {}", resp.status()));
    }
    resp.json().await.context("deserialising rooms")
  }
}
