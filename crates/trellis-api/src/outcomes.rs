//! Handlers for `/api/outcomes` endpoints.
//!
//! | Method   | Path                | Auth | Notes |
//! |----------|---------------------|------|-------|
//! | `GET`    | `/api/outcomes`     | no   | Public case-study list |
//! | `POST`   | `/api/outcomes`     | yes  | 201 + created record |
//! | `PUT`    | `/api/outcomes/:id` | yes  | 404 unknown id, 400 bad id |
//! | `DELETE` | `/api/outcomes/:id` | yes  | 200 + `{"success": true}` |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use trellis_core::{
  ContentStore,
  outcome::{Outcome, OutcomeDraft, OutcomePatch},
};

use crate::{
  AppState, auth::Authenticated, error::ApiError, parse_id, required,
};

/// `GET /api/outcomes`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Outcome>>, ApiError>
where
  S: ContentStore + 'static,
{
  let outcomes =
    state.store.list_outcomes().await.map_err(ApiError::store)?;
  Ok(Json(outcomes))
}

/// Create payload; every field is required and must be non-blank.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
  pub field:         Option<String>,
  pub narrative:     Option<String>,
  pub duration:      Option<String>,
  pub key_milestone: Option<String>,
}

/// `POST /api/outcomes`
pub async fn create<S>(
  _: Authenticated,
  State(state): State<AppState<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContentStore + 'static,
{
  let draft = OutcomeDraft {
    field:         required(body.field, "field")?,
    narrative:     required(body.narrative, "narrative")?,
    duration:      required(body.duration, "duration")?,
    key_milestone: required(body.key_milestone, "keyMilestone")?,
  };
  let outcome =
    state.store.create_outcome(draft).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(outcome)))
}

/// `PUT /api/outcomes/:id`
pub async fn update<S>(
  _: Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
  Json(patch): Json<OutcomePatch>,
) -> Result<Json<Outcome>, ApiError>
where
  S: ContentStore + 'static,
{
  let id = parse_id(&id)?;
  let outcome = state
    .store
    .update_outcome(id, patch)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("outcome {id} not found")))?;
  Ok(Json(outcome))
}

/// `DELETE /api/outcomes/:id`
pub async fn remove<S>(
  _: Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContentStore + 'static,
{
  let id = parse_id(&id)?;
  if !state.store.delete_outcome(id).await.map_err(ApiError::store)? {
    return Err(ApiError::NotFound(format!("outcome {id} not found")));
  }
  Ok(Json(json!({ "success": true })))
}
