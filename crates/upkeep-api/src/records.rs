//! Handlers for `/records` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/records` | Filter/sort/paginate the upstream snapshot; returns `{items, stats}` |
//! | `POST`   | `/records` | Body: [`NewMaintenanceRecord`]; returns 201 + stored record |
//! | `GET`    | `/records/:id` | Single record with derived status; ETag / If-None-Match |
//! | `PUT`    | `/records/:id` | Body: [`UpdateMaintenanceRecord`] |
//! | `DELETE` | `/records/:id` | 204 / 404 |
//! | `POST`   | `/records/:id/complete` | Body: `{"date":"YYYY-MM-DD"}` (optional); returns record + `next_due` |
//! | `GET`    | `/records/:id/next-due` | Pure recurrence preview, no writes |
//!
//! Every enum-valued query parameter deserializes into the closed core
//! enums; an unrecognized value is rejected with 400 at extraction, never
//! passed through to the pipeline.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::{HeaderMap, StatusCode, header},
  response::{IntoResponse, Response},
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use upkeep_core::{
  pipeline::{
    Page, RecordFilter, RecordQuery, RecordStats, SortField, SortOrder,
    SortSpec, process,
  },
  record::{
    Frequency, MaintenanceRecord, NewMaintenanceRecord, Status,
    UpdateMaintenanceRecord,
  },
  recurrence::{next_due_date, validate_recurrence},
  store::MaintenanceStore,
};
use uuid::Uuid;

use crate::{error::ApiError, etag};

// ─── Payload shapes ──────────────────────────────────────────────────────────

/// A record as served to dashboard clients: the stored fields plus the
/// derived status, recomputed on every read.
#[derive(Debug, Serialize)]
pub struct RecordPayload {
  #[serde(flatten)]
  pub record: MaintenanceRecord,
  pub status: Status,
}

impl RecordPayload {
  fn new(record: MaintenanceRecord, today: NaiveDate) -> Self {
    let status = record.status(today);
    Self { record, status }
  }
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
  pub items: Vec<RecordPayload>,
  pub stats: RecordStats,
}

#[derive(Debug, Serialize)]
pub struct CompleteResponse {
  pub record:   RecordPayload,
  /// The next occurrence, computed from the completion date.
  pub next_due: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct NextDueResponse {
  /// The date the calculation started from (`completed_date`, falling back
  /// to `scheduled_date`).
  pub basis:    NaiveDate,
  pub next_due: NaiveDate,
}

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// Case-insensitive substring filter on the title.
  pub search:     Option<String>,
  /// Derived-status filter: `pending`, `overdue`, or `completed`.
  pub status:     Option<Status>,
  pub frequency:  Option<Frequency>,
  /// Only records referencing this machine.
  pub machine:    Option<Uuid>,
  pub start_date: Option<NaiveDate>,
  pub end_date:   Option<NaiveDate>,
  pub sort:       Option<SortField>,
  pub order:      Option<SortOrder>,
  /// 1-indexed page number.
  pub page:       Option<u32>,
  pub per_page:   Option<u32>,
}

impl From<ListParams> for RecordQuery {
  fn from(p: ListParams) -> Self {
    let defaults = Page::default();
    RecordQuery {
      filter: RecordFilter {
        search:     p.search,
        status:     p.status,
        frequency:  p.frequency,
        machine:    p.machine,
        start_date: p.start_date,
        end_date:   p.end_date,
      },
      sort:   SortSpec {
        field: p.sort.unwrap_or_default(),
        order: p.order.unwrap_or_default(),
      },
      page:   Page {
        number:   p.page.unwrap_or(defaults.number),
        per_page: p.per_page.unwrap_or(defaults.per_page),
      },
    }
  }
}

/// `GET /records[?search=...][&status=...][&frequency=...][&machine=...]`
/// `[&start_date=...][&end_date=...][&sort=...][&order=...][&page=...][&per_page=...]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, ApiError>
where
  S: MaintenanceStore,
{
  let records = store.list_records().await.map_err(ApiError::from_store)?;

  // `today` is established once per request and threaded explicitly.
  let today = Utc::now().date_naive();
  let view = process(&records, &RecordQuery::from(params), today);

  Ok(Json(ListResponse {
    items: view
      .items
      .into_iter()
      .map(|r| RecordPayload::new(r, today))
      .collect(),
    stats: view.stats,
  }))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /records` — returns 201 + the stored record.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewMaintenanceRecord>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MaintenanceStore,
{
  body.validate()?;
  let record = store
    .create_record(body)
    .await
    .map_err(ApiError::from_store)?;
  let today = Utc::now().date_naive();
  Ok((StatusCode::CREATED, Json(RecordPayload::new(record, today))))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /records/:id` — 304 when `If-None-Match` still holds.
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  headers: HeaderMap,
) -> Result<Response, ApiError>
where
  S: MaintenanceStore,
{
  let record = store
    .get_record(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("record {id} not found")))?;

  let etag = etag::record_etag(&record);
  if let Some(candidate) = headers
    .get(header::IF_NONE_MATCH)
    .and_then(|v| v.to_str().ok())
    && etag::matches(candidate, &etag)
  {
    return Ok(
      (StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response(),
    );
  }

  let today = Utc::now().date_naive();
  Ok(
    ([(header::ETAG, etag)], Json(RecordPayload::new(record, today)))
      .into_response(),
  )
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// `PUT /records/:id` — body is an [`UpdateMaintenanceRecord`]; absent
/// fields are left unchanged.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<UpdateMaintenanceRecord>,
) -> Result<Json<RecordPayload>, ApiError>
where
  S: MaintenanceStore,
{
  body.validate()?;
  let record = store
    .update_record(id, body)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("record {id} not found")))?;
  let today = Utc::now().date_naive();
  Ok(Json(RecordPayload::new(record, today)))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /records/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: MaintenanceStore,
{
  let deleted = store
    .delete_record(id)
    .await
    .map_err(ApiError::from_store)?;
  if deleted {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("record {id} not found")))
  }
}

// ─── Complete ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct CompleteBody {
  /// Completion date; defaults to today.
  pub date: Option<NaiveDate>,
}

/// `POST /records/:id/complete` — body: `{"date":"YYYY-MM-DD"}` (optional).
///
/// The recurrence inputs are validated *before* the completion is persisted:
/// a malformed custom interval fails with 422 and nothing is written, so the
/// follow-up due date can always be announced.
pub async fn complete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  body: Option<Json<CompleteBody>>,
) -> Result<Json<CompleteResponse>, ApiError>
where
  S: MaintenanceStore,
{
  let record = store
    .get_record(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("record {id} not found")))?;

  validate_recurrence(record.frequency, record.custom_interval_days)?;

  let today = Utc::now().date_naive();
  let on = body.and_then(|Json(b)| b.date).unwrap_or(today);

  let completed = store
    .complete_record(id, on)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("record {id} not found")))?;

  let next_due =
    next_due_date(on, completed.frequency, completed.custom_interval_days)?;

  Ok(Json(CompleteResponse {
    record: RecordPayload::new(completed, today),
    next_due,
  }))
}

// ─── Next-due preview ────────────────────────────────────────────────────────

/// `GET /records/:id/next-due` — recurrence preview, no writes.
pub async fn next_due<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<NextDueResponse>, ApiError>
where
  S: MaintenanceStore,
{
  let record = store
    .get_record(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("record {id} not found")))?;

  let basis = record.completed_date.unwrap_or(record.scheduled_date);
  let next_due =
    next_due_date(basis, record.frequency, record.custom_interval_days)?;

  Ok(Json(NextDueResponse { basis, next_due }))
}
