//! HTTP JSON API for the Trellis content service.
//!
//! Exposes an axum [`Router`] backed by any [`trellis_core::ContentStore`].
//! Three record kinds share the same CRUD surface under `/api/{kind}`, with
//! a per-kind authorization matrix: published content (outcomes, articles)
//! lists publicly and mutates behind auth; inquiries (contacts) submit
//! publicly and are private to read.

pub mod articles;
pub mod auth;
pub mod contacts;
pub mod error;
pub mod outcomes;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post, put},
};
use serde::Deserialize;
use trellis_core::ContentStore;

use auth::{AuthConfig, SessionStore};

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
///
/// There is no default admin secret: a server without a configured
/// `admin_password_hash` refuses to start.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:                String,
  pub port:                u16,
  /// Directory holding one JSON document per record kind.
  pub data_dir:            PathBuf,
  /// Argon2 PHC string for the admin password.
  pub admin_password_hash: String,
  #[serde(default = "default_session_ttl")]
  pub session_ttl_secs:    u64,
}

fn default_session_ttl() -> u64 {
  86_400
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S: ContentStore> {
  pub store:    Arc<S>,
  pub auth:     Arc<AuthConfig>,
  pub sessions: Arc<SessionStore>,
}

impl<S: ContentStore> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:    self.store.clone(),
      auth:     self.auth.clone(),
      sessions: self.sessions.clone(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the content API.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: ContentStore + 'static,
{
  Router::new()
    // Published content: public reads, authenticated writes.
    .route(
      "/api/outcomes",
      get(outcomes::list::<S>)
        .post(outcomes::create::<S>)
        .fallback(method_not_allowed),
    )
    .route(
      "/api/outcomes/{id}",
      put(outcomes::update::<S>)
        .delete(outcomes::remove::<S>)
        .fallback(method_not_allowed),
    )
    .route(
      "/api/articles",
      get(articles::list::<S>)
        .post(articles::create::<S>)
        .fallback(method_not_allowed),
    )
    .route(
      "/api/articles/{id}",
      put(articles::update::<S>)
        .delete(articles::remove::<S>)
        .fallback(method_not_allowed),
    )
    // Inquiries: public submission, authenticated everything else.
    .route(
      "/api/contacts",
      get(contacts::list::<S>)
        .post(contacts::create::<S>)
        .fallback(method_not_allowed),
    )
    .route(
      "/api/contacts/{id}",
      put(contacts::update::<S>)
        .delete(contacts::remove::<S>)
        .fallback(method_not_allowed),
    )
    // Session lifecycle.
    .route(
      "/api/auth/login",
      post(auth::login::<S>).fallback(method_not_allowed),
    )
    .route(
      "/api/auth/logout",
      post(auth::logout::<S>).fallback(method_not_allowed),
    )
    .with_state(state)
}

/// Shared fallback for verbs a resource does not support.
async fn method_not_allowed() -> ApiError {
  ApiError::MethodNotAllowed
}

// ─── Request helpers ─────────────────────────────────────────────────────────

/// Parse a path id strictly: the whole segment must be an integer.
pub(crate) fn parse_id(raw: &str) -> Result<u64, ApiError> {
  raw
    .parse::<u64>()
    .map_err(|_| ApiError::BadRequest(format!("invalid id: {raw}")))
}

/// Reject a missing or blank required field with a 400.
pub(crate) fn required(
  value: Option<String>,
  name: &str,
) -> Result<String, ApiError> {
  match value {
    Some(v) if !v.trim().is_empty() => Ok(v),
    _ => Err(ApiError::BadRequest(format!("missing required field: {name}"))),
  }
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use rand_core::OsRng;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use trellis_store_json::JsonStore;

  use super::*;

  async fn make_state(
    password: &str,
  ) -> (AppState<JsonStore>, tempfile::TempDir) {
    let dir = tempfile::TempDir::new().expect("temp data dir");
    let store = JsonStore::open(dir.path()).await.expect("open store");
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .unwrap()
      .to_string();

    let state = AppState {
      store:    Arc::new(store),
      auth:     Arc::new(AuthConfig {
        password_hash: hash,
      }),
      sessions: Arc::new(SessionStore::new(86_400)),
    };
    (state, dir)
  }

  async fn send(
    state:  AppState<JsonStore>,
    method: &str,
    uri:    &str,
    cookie: Option<&str>,
    body:   Option<Value>,
  ) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
      builder = builder.header(header::COOKIE, cookie);
    }
    let req = match body {
      Some(v) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(v.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    router(state).oneshot(req).await.unwrap()
  }

  /// Log in and return the `name=token` cookie pair for later requests.
  async fn login(state: &AppState<JsonStore>, password: &str) -> String {
    let resp = send(
      state.clone(),
      "POST",
      "/api/auth/login",
      None,
      Some(json!({ "password": password })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let set_cookie = resp
      .headers()
      .get(header::SET_COOKIE)
      .expect("login should set the session cookie")
      .to_str()
      .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
  }

  async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  fn outcome_body() -> Value {
    json!({
      "field": "Computer Science",
      "narrative": "From waitlist to funded offer.",
      "duration": "14 months",
      "keyMilestone": "First-author publication"
    })
  }

  fn contact_body(contact: &str) -> Value {
    json!({
      "background": "Final-year undergraduate",
      "timeline": "Fall 2027",
      "interest": "Graduate admissions",
      "contact": contact
    })
  }

  // ── Sessions ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn login_with_wrong_password_returns_401() {
    let (state, _dir) = make_state("secret").await;
    let resp = send(
      state,
      "POST",
      "/api/auth/login",
      None,
      Some(json!({ "password": "wrong" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn login_sets_http_only_session_cookie() {
    let (state, _dir) = make_state("secret").await;
    let resp = send(
      state,
      "POST",
      "/api/auth/login",
      None,
      Some(json!({ "password": "secret" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let set_cookie = resp
      .headers()
      .get(header::SET_COOKIE)
      .unwrap()
      .to_str()
      .unwrap();
    assert!(set_cookie.starts_with("trellis_session="));
    assert!(set_cookie.contains("HttpOnly"), "cookie: {set_cookie}");
  }

  #[tokio::test]
  async fn logout_revokes_the_session() {
    let (state, _dir) = make_state("secret").await;
    let cookie = login(&state, "secret").await;

    let before = send(
      state.clone(),
      "GET",
      "/api/contacts",
      Some(&cookie),
      None,
    )
    .await;
    assert_eq!(before.status(), StatusCode::OK);

    let logout = send(
      state.clone(),
      "POST",
      "/api/auth/logout",
      Some(&cookie),
      None,
    )
    .await;
    assert_eq!(logout.status(), StatusCode::OK);

    // The old token no longer authenticates.
    let after =
      send(state, "GET", "/api/contacts", Some(&cookie), None).await;
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
  }

  // ── Authorization matrix ────────────────────────────────────────────────────

  #[tokio::test]
  async fn outcome_create_without_auth_adds_nothing() {
    let (state, _dir) = make_state("secret").await;
    let resp = send(
      state.clone(),
      "POST",
      "/api/outcomes",
      None,
      Some(outcome_body()),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let list = send(state, "GET", "/api/outcomes", None, None).await;
    assert_eq!(body_json(list).await, json!([]));
  }

  #[tokio::test]
  async fn published_content_lists_without_auth() {
    let (state, _dir) = make_state("secret").await;
    let outcomes =
      send(state.clone(), "GET", "/api/outcomes", None, None).await;
    assert_eq!(outcomes.status(), StatusCode::OK);
    let articles = send(state, "GET", "/api/articles", None, None).await;
    assert_eq!(articles.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn contacts_list_requires_auth() {
    let (state, _dir) = make_state("secret").await;
    let resp = send(state, "GET", "/api/contacts", None, None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  // ── Outcome CRUD ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn outcome_crud_round_trip() {
    let (state, _dir) = make_state("secret").await;
    let cookie = login(&state, "secret").await;

    let created = send(
      state.clone(),
      "POST",
      "/api/outcomes",
      Some(&cookie),
      Some(outcome_body()),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = body_json(created).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["createdAt"], created["updatedAt"]);

    let updated = send(
      state.clone(),
      "PUT",
      "/api/outcomes/1",
      Some(&cookie),
      Some(json!({ "narrative": "Revised." })),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    let updated = body_json(updated).await;
    assert_eq!(updated["narrative"], "Revised.");
    // Untouched fields and the creation timestamp carry over.
    assert_eq!(updated["field"], "Computer Science");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let deleted = send(
      state.clone(),
      "DELETE",
      "/api/outcomes/1",
      Some(&cookie),
      None,
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::OK);
    assert_eq!(body_json(deleted).await, json!({ "success": true }));

    let again = send(
      state,
      "DELETE",
      "/api/outcomes/1",
      Some(&cookie),
      None,
    )
    .await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn outcome_create_with_missing_field_returns_400() {
    let (state, _dir) = make_state("secret").await;
    let cookie = login(&state, "secret").await;

    let mut body = outcome_body();
    body.as_object_mut().unwrap().remove("keyMilestone");
    let resp = send(
      state.clone(),
      "POST",
      "/api/outcomes",
      Some(&cookie),
      Some(body),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Blank counts as missing.
    let mut blank = outcome_body();
    blank["narrative"] = json!("   ");
    let resp =
      send(state, "POST", "/api/outcomes", Some(&cookie), Some(blank)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn non_integer_id_returns_400() {
    let (state, _dir) = make_state("secret").await;
    let cookie = login(&state, "secret").await;

    for bad in ["abc", "12abc", "-1"] {
      let resp = send(
        state.clone(),
        "PUT",
        &format!("/api/outcomes/{bad}"),
        Some(&cookie),
        Some(json!({ "narrative": "x" })),
      )
      .await;
      assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "id: {bad}");
    }
  }

  #[tokio::test]
  async fn update_of_unknown_id_returns_404() {
    let (state, _dir) = make_state("secret").await;
    let cookie = login(&state, "secret").await;
    let resp = send(
      state,
      "PUT",
      "/api/articles/999",
      Some(&cookie),
      Some(json!({ "title": "Ghost" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Articles ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn article_content_defaults_to_empty() {
    let (state, _dir) = make_state("secret").await;
    let cookie = login(&state, "secret").await;
    let resp = send(
      state,
      "POST",
      "/api/articles",
      Some(&cookie),
      Some(json!({
        "title": "On waiting well",
        "date": "March 2026",
        "excerpt": "What the gap year is actually for.",
        "readTime": "6 min"
      })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(body_json(resp).await["content"], "");
  }

  // ── Contacts ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn contact_submission_is_public_and_status_is_forced_new() {
    let (state, _dir) = make_state("secret").await;

    // A smuggled status is ignored; the submitter cannot set one.
    let mut body = contact_body("a@example.com");
    body["status"] = json!("replied");
    let resp =
      send(state.clone(), "POST", "/api/contacts", None, Some(body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(body_json(resp).await["status"], "new");
  }

  #[tokio::test]
  async fn newest_contact_lists_first() {
    let (state, _dir) = make_state("secret").await;
    send(
      state.clone(),
      "POST",
      "/api/contacts",
      None,
      Some(contact_body("first@example.com")),
    )
    .await;
    send(
      state.clone(),
      "POST",
      "/api/contacts",
      None,
      Some(contact_body("second@example.com")),
    )
    .await;

    let cookie = login(&state, "secret").await;
    let list =
      send(state, "GET", "/api/contacts", Some(&cookie), None).await;
    let list = body_json(list).await;
    assert_eq!(list[0]["contact"], "second@example.com");
    assert_eq!(list[1]["contact"], "first@example.com");
  }

  #[tokio::test]
  async fn contact_status_may_jump_straight_to_replied() {
    let (state, _dir) = make_state("secret").await;
    send(
      state.clone(),
      "POST",
      "/api/contacts",
      None,
      Some(contact_body("a@example.com")),
    )
    .await;

    let cookie = login(&state, "secret").await;
    let resp = send(
      state,
      "PUT",
      "/api/contacts/1",
      Some(&cookie),
      Some(json!({ "status": "replied", "notes": "sent brochure" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    assert_eq!(updated["status"], "replied");
    assert_eq!(updated["notes"], "sent brochure");
  }

  // ── Method routing ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn unsupported_methods_return_405() {
    let (state, _dir) = make_state("secret").await;

    let patch =
      send(state.clone(), "PATCH", "/api/outcomes", None, None).await;
    assert_eq!(patch.status(), StatusCode::METHOD_NOT_ALLOWED);

    let get_login =
      send(state, "GET", "/api/auth/login", None, None).await;
    assert_eq!(get_login.status(), StatusCode::METHOD_NOT_ALLOWED);
  }
}
