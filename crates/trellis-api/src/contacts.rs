//! Handlers for `/api/contacts` endpoints.
//!
//! The auth matrix is inverted relative to the published content kinds:
//! anyone may submit an inquiry, but only an authenticated admin may list,
//! triage, or delete them.
//!
//! | Method   | Path                | Auth | Notes |
//! |----------|---------------------|------|-------|
//! | `GET`    | `/api/contacts`     | yes  | Newest first |
//! | `POST`   | `/api/contacts`     | no   | Public submission; status forced to `new` |
//! | `PUT`    | `/api/contacts/:id` | yes  | Accepts only `status` and `notes` |
//! | `DELETE` | `/api/contacts/:id` | yes  | 200 + `{"success": true}` |

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
  contact::{Contact, ContactDraft, ContactPatch},
};

use crate::{
  AppState, auth::Authenticated, error::ApiError, parse_id, required,
};

/// `GET /api/contacts`
pub async fn list<S>(
  _: Authenticated,
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContentStore + 'static,
{
  let contacts =
    state.store.list_contacts().await.map_err(ApiError::store)?;
  Ok(Json(contacts))
}

/// Public submission payload. Any `status` supplied here is ignored — the
/// draft type has no way to carry one.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub background: Option<String>,
  pub timeline:   Option<String>,
  pub interest:   Option<String>,
  pub contact:    Option<String>,
}

/// `POST /api/contacts` — unauthenticated by design; this is the public
/// inquiry form's endpoint.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContentStore + 'static,
{
  let draft = ContactDraft {
    background: required(body.background, "background")?,
    timeline:   required(body.timeline, "timeline")?,
    interest:   required(body.interest, "interest")?,
    contact:    required(body.contact, "contact")?,
  };
  let contact =
    state.store.create_contact(draft).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(contact)))
}

/// `PUT /api/contacts/:id`
pub async fn update<S>(
  _: Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
  Json(patch): Json<ContactPatch>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContentStore + 'static,
{
  let id = parse_id(&id)?;
  let contact = state
    .store
    .update_contact(id, patch)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("contact {id} not found")))?;
  Ok(Json(contact))
}

/// `DELETE /api/contacts/:id`
pub async fn remove<S>(
  _: Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContentStore + 'static,
{
  let id = parse_id(&id)?;
  if !state.store.delete_contact(id).await.map_err(ApiError::store)? {
    return Err(ApiError::NotFound(format!("contact {id} not found")));
  }
  Ok(Json(json!({ "success": true })))
}
