//! Handlers for `/api/articles` endpoints.
//!
//! | Method   | Path                | Auth | Notes |
//! |----------|---------------------|------|-------|
//! | `GET`    | `/api/articles`     | no   | Public journal list |
//! | `POST`   | `/api/articles`     | yes  | 201; `content` optional, defaults empty |
//! | `PUT`    | `/api/articles/:id` | yes  | 404 unknown id, 400 bad id |
//! | `DELETE` | `/api/articles/:id` | yes  | 200 + `{"success": true}` |

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
  article::{Article, ArticleDraft, ArticlePatch},
};

use crate::{
  AppState, auth::Authenticated, error::ApiError, parse_id, required,
};

/// `GET /api/articles`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Article>>, ApiError>
where
  S: ContentStore + 'static,
{
  let articles =
    state.store.list_articles().await.map_err(ApiError::store)?;
  Ok(Json(articles))
}

/// Create payload. `content` may be omitted; the others are required and
/// must be non-blank.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
  pub title:     Option<String>,
  pub date:      Option<String>,
  pub excerpt:   Option<String>,
  pub read_time: Option<String>,
  pub content:   Option<String>,
}

/// `POST /api/articles`
pub async fn create<S>(
  _: Authenticated,
  State(state): State<AppState<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContentStore + 'static,
{
  let draft = ArticleDraft {
    title:     required(body.title, "title")?,
    date:      required(body.date, "date")?,
    excerpt:   required(body.excerpt, "excerpt")?,
    read_time: required(body.read_time, "readTime")?,
    content:   body.content.unwrap_or_default(),
  };
  let article =
    state.store.create_article(draft).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(article)))
}

/// `PUT /api/articles/:id`
pub async fn update<S>(
  _: Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
  Json(patch): Json<ArticlePatch>,
) -> Result<Json<Article>, ApiError>
where
  S: ContentStore + 'static,
{
  let id = parse_id(&id)?;
  let article = state
    .store
    .update_article(id, patch)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("article {id} not found")))?;
  Ok(Json(article))
}

/// `DELETE /api/articles/:id`
pub async fn remove<S>(
  _: Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContentStore + 'static,
{
  let id = parse_id(&id)?;
  if !state.store.delete_article(id).await.map_err(ApiError::store)? {
    return Err(ApiError::NotFound(format!("article {id} not found")));
  }
  Ok(Json(json!({ "success": true })))
}
