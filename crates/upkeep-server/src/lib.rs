//! HTTP server layer for the upkeep dashboard.
//!
//! Assembles the JSON API ([`upkeep_api`]) behind Basic auth, adds the
//! unauthenticated `/healthz` probe, and carries the runtime configuration.
//! The binary (`main.rs`) wires this to the upstream facilities API through
//! [`upkeep_store_http::HttpStore`]; tests run the same router against the
//! in-memory store.

pub mod auth;

pub use auth::AuthConfig;

use std::sync::Arc;

use axum::{Router, middleware, routing::get};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use upkeep_core::store::MaintenanceStore;

// ─── Configuration ────────────────────────────────────────────────────────────

fn default_backend_timeout_secs() -> u64 {
  30
}

/// Runtime server configuration, deserialised from `config.toml` plus
/// `UPKEEP_`-prefixed environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:                 String,
  pub port:                 u16,
  /// Base URL of the upstream facilities API all data is proxied to.
  pub backend_url:          String,
  #[serde(default = "default_backend_timeout_secs")]
  pub backend_timeout_secs: u64,
  /// Credentials the upstream expects, if it is itself authenticated.
  pub backend_username:     Option<String>,
  pub backend_password:     Option<String>,
  pub auth_username:        String,
  pub auth_password_hash:   String,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through the router.
#[derive(Clone)]
pub struct AppState<S: MaintenanceStore> {
  pub store: Arc<S>,
  pub auth:  Arc<AuthConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full axum [`Router`]: `/healthz` open, `/api/*` behind Basic
/// auth, request tracing over everything.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: MaintenanceStore + Clone + Send + Sync + 'static,
{
  let api = upkeep_api::api_router(state.store.clone()).layer(
    middleware::from_fn_with_state(state.auth.clone(), auth::require_auth),
  );

  Router::new()
    .route("/healthz", get(healthz))
    .nest("/api", api)
    .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
  "ok"
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use base64::Engine as _;
  use base64::engine::general_purpose::STANDARD as B64;
  use chrono::{Days, NaiveDate, Utc};
  use rand_core::OsRng;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use upkeep_store_memory::MemoryStore;
  use uuid::Uuid;

  fn make_state(password: &str) -> AppState<MemoryStore> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .unwrap()
      .to_string();

    AppState {
      store: Arc::new(MemoryStore::new()),
      auth:  Arc::new(AuthConfig {
        username:      "user".to_string(),
        password_hash: hash,
      }),
    }
  }

  fn auth_header(user: &str, pass: &str) -> String {
    format!("Basic {}", B64.encode(format!("{user}:{pass}")))
  }

  async fn send(
    state: AppState<MemoryStore>,
    method: &str,
    uri: &str,
    headers: Vec<(header::HeaderName, String)>,
    body: Option<Value>,
  ) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    for (k, v) in headers {
      builder = builder.header(k, v);
    }
    let req = match body {
      Some(json) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    router(state).oneshot(req).await.unwrap()
  }

  /// Authenticated request with the default test credentials.
  async fn call(
    state: AppState<MemoryStore>,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> axum::response::Response {
    send(
      state,
      method,
      uri,
      vec![(header::AUTHORIZATION, auth_header("user", "secret"))],
      body,
    )
    .await
  }

  async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  fn record_body(title: &str, scheduled: NaiveDate) -> Value {
    json!({
      "title": title,
      "frequency": "weekly",
      "scheduled_date": scheduled.to_string(),
    })
  }

  async fn create_record(state: &AppState<MemoryStore>, body: Value) -> Value {
    let resp = call(state.clone(), "POST", "/api/records", Some(body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
  }

  fn today() -> NaiveDate {
    Utc::now().date_naive()
  }

  fn days_ago(n: u64) -> NaiveDate {
    today().checked_sub_days(Days::new(n)).unwrap()
  }

  fn days_ahead(n: u64) -> NaiveDate {
    today().checked_add_days(Days::new(n)).unwrap()
  }

  // ── Health and auth ─────────────────────────────────────────────────────

  #[tokio::test]
  async fn healthz_needs_no_credentials() {
    let state = make_state("secret");
    let resp = send(state, "GET", "/healthz", vec![], None).await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn api_without_credentials_is_401() {
    let state = make_state("secret");
    let resp = send(state, "GET", "/api/records", vec![], None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
  }

  #[tokio::test]
  async fn api_with_wrong_password_is_401() {
    let state = make_state("secret");
    let resp = send(
      state,
      "GET",
      "/api/records",
      vec![(header::AUTHORIZATION, auth_header("user", "wrong"))],
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  // ── Records CRUD ────────────────────────────────────────────────────────

  #[tokio::test]
  async fn empty_store_lists_no_items_and_zero_stats() {
    let state = make_state("secret");
    let resp = call(state, "GET", "/api/records", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["items"].as_array().unwrap().len(), 0);
    assert_eq!(json["stats"]["total"], 0);
  }

  #[tokio::test]
  async fn create_then_list_round_trip() {
    let state = make_state("secret");
    let created =
      create_record(&state, record_body("grease bearings", days_ahead(5))).await;
    assert_eq!(created["status"], "pending");

    let resp = call(state, "GET", "/api/records", None).await;
    let json = body_json(resp).await;
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "grease bearings");
    assert_eq!(items[0]["id"], created["id"]);
    assert_eq!(json["stats"]["pending"], 1);
  }

  #[tokio::test]
  async fn create_rejects_custom_frequency_without_interval() {
    let state = make_state("secret");
    let body = json!({
      "title": "descale lines",
      "frequency": "custom",
      "scheduled_date": days_ahead(5).to_string(),
    });
    let resp = call(state, "POST", "/api/records", Some(body)).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
  }

  #[tokio::test]
  async fn unknown_filter_value_is_rejected_at_the_boundary() {
    let state = make_state("secret");
    let resp = call(state, "GET", "/api/records?status=bogus", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn get_unknown_record_is_404() {
    let state = make_state("secret");
    let resp =
      call(state, "GET", &format!("/api/records/{}", Uuid::new_v4()), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn update_changes_only_sent_fields() {
    let state = make_state("secret");
    let created =
      create_record(&state, record_body("tighten belts", days_ahead(5))).await;
    let id = created["id"].as_str().unwrap();

    let resp = call(
      state.clone(),
      "PUT",
      &format!("/api/records/{id}"),
      Some(json!({ "scheduled_date": days_ahead(12).to_string() })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    assert_eq!(updated["title"], "tighten belts");
    assert_eq!(updated["scheduled_date"], days_ahead(12).to_string());
  }

  #[tokio::test]
  async fn delete_then_get_is_404() {
    let state = make_state("secret");
    let created =
      create_record(&state, record_body("drain compressor", days_ahead(5))).await;
    let id = created["id"].as_str().unwrap().to_string();

    let resp =
      call(state.clone(), "DELETE", &format!("/api/records/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = call(state, "GET", &format!("/api/records/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Derived status, filters, stats ──────────────────────────────────────

  #[tokio::test]
  async fn derived_statuses_and_stats_partition_the_set() {
    let state = make_state("secret");
    create_record(&state, record_body("overdue a", days_ago(10))).await;
    create_record(&state, record_body("overdue b", days_ago(3))).await;
    create_record(&state, record_body("pending a", days_ahead(3))).await;
    let done =
      create_record(&state, record_body("done a", days_ago(20))).await;
    let done_id = done["id"].as_str().unwrap();
    let resp = call(
      state.clone(),
      "POST",
      &format!("/api/records/{done_id}/complete"),
      Some(json!({})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(call(state.clone(), "GET", "/api/records", None).await).await;
    assert_eq!(json["stats"]["total"], 4);
    assert_eq!(json["stats"]["overdue"], 2);
    assert_eq!(json["stats"]["pending"], 1);
    assert_eq!(json["stats"]["completed"], 1);

    let overdue =
      body_json(call(state, "GET", "/api/records?status=overdue", None).await)
        .await;
    assert_eq!(overdue["items"].as_array().unwrap().len(), 2);
    assert_eq!(overdue["stats"]["total"], 2);
  }

  #[tokio::test]
  async fn search_and_machine_filters_combine() {
    let state = make_state("secret");
    let machine = Uuid::new_v4();
    create_record(
      &state,
      json!({
        "title": "pump seal check",
        "frequency": "monthly",
        "scheduled_date": days_ahead(5).to_string(),
        "machine_ids": [machine],
      }),
    )
    .await;
    create_record(&state, record_body("pump seal swap", days_ahead(5))).await;

    let uri = format!("/api/records?search=PUMP&machine={machine}");
    let json = body_json(call(state, "GET", &uri, None).await).await;
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "pump seal check");
  }

  // ── Sorting and pagination ──────────────────────────────────────────────

  #[tokio::test]
  async fn date_sort_descending_puts_latest_first() {
    let state = make_state("secret");
    create_record(&state, record_body("middle", days_ahead(5))).await;
    create_record(&state, record_body("latest", days_ahead(9))).await;
    create_record(&state, record_body("earliest", days_ahead(1))).await;

    let json = body_json(
      call(state, "GET", "/api/records?sort=date&order=desc", None).await,
    )
    .await;
    let items = json["items"].as_array().unwrap();
    assert_eq!(items[0]["title"], "latest");
    assert_eq!(items[2]["title"], "earliest");
  }

  #[tokio::test]
  async fn pagination_slices_and_stats_stay_whole() {
    let state = make_state("secret");
    for n in 1..=25 {
      create_record(&state, record_body(&format!("job {n:02}"), days_ahead(n))).await;
    }

    let page = |n: u32| format!("/api/records?per_page=10&page={n}");
    let p1 = body_json(call(state.clone(), "GET", &page(1), None).await).await;
    assert_eq!(p1["items"].as_array().unwrap().len(), 10);
    assert_eq!(p1["stats"]["total"], 25);

    let p3 = body_json(call(state.clone(), "GET", &page(3), None).await).await;
    assert_eq!(p3["items"].as_array().unwrap().len(), 5);

    let p4 = body_json(call(state, "GET", &page(4), None).await).await;
    assert_eq!(p4["items"].as_array().unwrap().len(), 0);
    assert_eq!(p4["stats"]["total"], 25);
  }

  // ── Conditional GET ─────────────────────────────────────────────────────

  #[tokio::test]
  async fn if_none_match_returns_304_until_the_record_changes() {
    let state = make_state("secret");
    let created =
      create_record(&state, record_body("swap filter", days_ahead(5))).await;
    let id = created["id"].as_str().unwrap().to_string();

    let first = call(state.clone(), "GET", &format!("/api/records/{id}"), None).await;
    assert_eq!(first.status(), StatusCode::OK);
    let etag = first
      .headers()
      .get(header::ETAG)
      .unwrap()
      .to_str()
      .unwrap()
      .to_string();

    let second = send(
      state.clone(),
      "GET",
      &format!("/api/records/{id}"),
      vec![
        (header::AUTHORIZATION, auth_header("user", "secret")),
        (header::IF_NONE_MATCH, etag.clone()),
      ],
      None,
    )
    .await;
    assert_eq!(second.status(), StatusCode::NOT_MODIFIED);

    // A write invalidates the cached copy.
    call(
      state.clone(),
      "PUT",
      &format!("/api/records/{id}"),
      Some(json!({ "title": "swap filter (rush)" })),
    )
    .await;
    let third = send(
      state,
      "GET",
      &format!("/api/records/{id}"),
      vec![
        (header::AUTHORIZATION, auth_header("user", "secret")),
        (header::IF_NONE_MATCH, etag),
      ],
      None,
    )
    .await;
    assert_eq!(third.status(), StatusCode::OK);
  }

  // ── Completion and recurrence ───────────────────────────────────────────

  #[tokio::test]
  async fn completing_returns_the_next_due_date() {
    let state = make_state("secret");
    let created =
      create_record(&state, record_body("weekly walkround", days_ago(2))).await;
    let id = created["id"].as_str().unwrap();

    let resp = call(
      state.clone(),
      "POST",
      &format!("/api/records/{id}/complete"),
      Some(json!({ "date": "2024-03-05" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["record"]["status"], "completed");
    assert_eq!(json["record"]["completed_date"], "2024-03-05");
    assert_eq!(json["next_due"], "2024-03-12");
  }

  #[tokio::test]
  async fn completing_an_unknown_record_is_404() {
    let state = make_state("secret");
    let resp = call(
      state,
      "POST",
      &format!("/api/records/{}/complete", Uuid::new_v4()),
      Some(json!({})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn next_due_preview_pins_month_end_clamping() {
    let state = make_state("secret");
    let created = create_record(
      &state,
      json!({
        "title": "monthly deep clean",
        "frequency": "monthly",
        "scheduled_date": "2024-01-31",
      }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let json = body_json(
      call(state, "GET", &format!("/api/records/{id}/next-due"), None).await,
    )
    .await;
    assert_eq!(json["basis"], "2024-01-31");
    assert_eq!(json["next_due"], "2024-02-29");
  }

  // ── Machines and rooms ──────────────────────────────────────────────────

  #[tokio::test]
  async fn machine_create_list_delete_round_trip() {
    let state = make_state("secret");
    let resp = call(
      state.clone(),
      "POST",
      "/api/machines",
      Some(json!({ "name": "press 4" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let machine = body_json(resp).await;

    let list =
      body_json(call(state.clone(), "GET", "/api/machines", None).await).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let id = machine["id"].as_str().unwrap();
    let resp =
      call(state.clone(), "DELETE", &format!("/api/machines/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let resp = call(state, "DELETE", &format!("/api/machines/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn room_create_and_get_round_trip() {
    let state = make_state("secret");
    let resp = call(
      state.clone(),
      "POST",
      "/api/rooms",
      Some(json!({ "name": "boiler room", "number": "B-12" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let room = body_json(resp).await;
    let id = room["id"].as_str().unwrap();

    let fetched =
      body_json(call(state, "GET", &format!("/api/rooms/{id}"), None).await).await;
    assert_eq!(fetched["number"], "B-12");
  }
}
