//! [`HttpStore`] — the proxy implementation of
//! [`MaintenanceStore`](upkeep_core::store::MaintenanceStore).
//!
//! Every operation forwards to the upstream facilities REST API, which owns
//! the authoritative data. No retries, no caching, no interpretation of
//! upstream failures beyond carrying the status code back out through
//! [`Error::Upstream`]; a 404 on a single-entity read maps to `Ok(None)` so
//! the dashboard can answer its own 404.

use std::time::Duration;

use chrono::NaiveDate;
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use upkeep_core::{
  record::{MaintenanceRecord, NewMaintenanceRecord, UpdateMaintenanceRecord},
  site::{Machine, NewMachine, NewRoom, Room},
  store::MaintenanceStore,
};

pub mod error;

pub use error::{Error, Result};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Connection settings for the upstream facilities API.
#[derive(Debug, Clone)]
pub struct HttpStoreConfig {
  pub base_url: String,
  /// Basic-auth credentials the upstream expects, if any.
  pub username: Option<String>,
  pub password: Option<String>,
  pub timeout:  Duration,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A maintenance store that lives on the other side of an HTTP API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct HttpStore {
  client: reqwest::Client,
  config: HttpStoreConfig,
}

impl HttpStore {
  pub fn new(config: HttpStoreConfig) -> Result<Self> {
    let client = reqwest::Client::builder().timeout(config.timeout).build()?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{path}", self.config.base_url.trim_end_matches('/'))
  }

  fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    match &self.config.username {
      Some(user) => req.basic_auth(user, self.config.password.as_deref()),
      None => req,
    }
  }

  async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
    let resp = self.auth(self.client.get(self.url(path))).send().await?;
    expect_json(resp).await
  }

  async fn get_optional_json<T: DeserializeOwned>(
    &self,
    path: &str,
  ) -> Result<Option<T>> {
    let resp = self.auth(self.client.get(self.url(path))).send().await?;
    expect_optional_json(resp).await
  }

  async fn post_json<B: Serialize, T: DeserializeOwned>(
    &self,
    path: &str,
    body: &B,
  ) -> Result<T> {
    let resp = self
      .auth(self.client.post(self.url(path)))
      .json(body)
      .send()
      .await?;
    expect_json(resp).await
  }

  /// DELETE that reports whether the entity existed upstream.
  async fn delete(&self, path: &str) -> Result<bool> {
    let resp = self.auth(self.client.delete(self.url(path))).send().await?;
    match resp.status() {
      s if s.is_success() => Ok(true),
      reqwest::StatusCode::NOT_FOUND => Ok(false),
      _ => Err(upstream_error(resp).await),
    }
  }
}

async fn expect_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
  if resp.status().is_success() {
    Ok(resp.json().await?)
  } else {
    Err(upstream_error(resp).await)
  }
}

async fn expect_optional_json<T: DeserializeOwned>(
  resp: reqwest::Response,
) -> Result<Option<T>> {
  match resp.status() {
    s if s.is_success() => Ok(Some(resp.json().await?)),
    reqwest::StatusCode::NOT_FOUND => Ok(None),
    _ => Err(upstream_error(resp).await),
  }
}

async fn upstream_error(resp: reqwest::Response) -> Error {
  let status = resp.status().as_u16();
  let message = resp.text().await.unwrap_or_default();
  Error::Upstream { status, message }
}

// ─── Wire shapes ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct CompleteBody {
  date: NaiveDate,
}

// ─── MaintenanceStore ────────────────────────────────────────────────────────

impl MaintenanceStore for HttpStore {
  type Error = Error;

  async fn list_records(&self) -> Result<Vec<MaintenanceRecord>> {
    self.get_json("/records").await
  }

  async fn get_record(&self, id: Uuid) -> Result<Option<MaintenanceRecord>> {
    self.get_optional_json(&format!("/records/{id}")).await
  }

  async fn create_record(
    &self,
    input: NewMaintenanceRecord,
  ) -> Result<MaintenanceRecord> {
    self.post_json("/records", &input).await
  }

  async fn update_record(
    &self,
    id: Uuid,
    input: UpdateMaintenanceRecord,
  ) -> Result<Option<MaintenanceRecord>> {
    let resp = self
      .auth(self.client.put(self.url(&format!("/records/{id}"))))
      .json(&input)
      .send()
      .await?;
    expect_optional_json(resp).await
  }

  async fn delete_record(&self, id: Uuid) -> Result<bool> {
    self.delete(&format!("/records/{id}")).await
  }

  async fn complete_record(
    &self,
    id: Uuid,
    on: NaiveDate,
  ) -> Result<Option<MaintenanceRecord>> {
    let resp = self
      .auth(self.client.post(self.url(&format!("/records/{id}/complete"))))
      .json(&CompleteBody { date: on })
      .send()
      .await?;
    expect_optional_json(resp).await
  }

  async fn list_machines(&self) -> Result<Vec<Machine>> {
    self.get_json("/machines").await
  }

  async fn get_machine(&self, id: Uuid) -> Result<Option<Machine>> {
    self.get_optional_json(&format!("/machines/{id}")).await
  }

  async fn create_machine(&self, input: NewMachine) -> Result<Machine> {
    self.post_json("/machines", &input).await
  }

  async fn delete_machine(&self, id: Uuid) -> Result<bool> {
    self.delete(&format!("/machines/{id}")).await
  }

  async fn list_rooms(&self) -> Result<Vec<Room>> {
    self.get_json("/rooms").await
  }

  async fn get_room(&self, id: Uuid) -> Result<Option<Room>> {
    self.get_optional_json(&format!("/rooms/{id}")).await
  }

  async fn create_room(&self, input: NewRoom) -> Result<Room> {
    self.post_json("/rooms", &input).await
  }

  async fn delete_room(&self, id: Uuid) -> Result<bool> {
    self.delete(&format!("/rooms/{id}")).await
  }
}
