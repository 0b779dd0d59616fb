//! Session-cookie authentication: password login, server-side session
//! tokens, and the [`Authenticated`] extractor.
//!
//! One shared admin password, stored as an argon2 PHC hash in the server
//! config. A successful login mints a random bearer token, registered
//! server-side with an expiry and handed to the client as an `HttpOnly`
//! cookie. Logout revokes the token.

use std::collections::HashMap;

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
  Json,
  extract::{FromRequestParts, State},
  http::{HeaderMap, header, request::Parts},
  response::{IntoResponse, Response},
};
use chrono::{DateTime, TimeDelta, Utc};
use rand_core::{OsRng, RngCore as _};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;
use trellis_core::ContentStore;

use crate::{AppState, error::ApiError};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "trellis_session";

/// Credentials accepted as valid for this server instance.
#[derive(Clone)]
pub struct AuthConfig {
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

// ─── Session registry ────────────────────────────────────────────────────────

/// Server-side session registry: random bearer tokens with an expiry.
///
/// Tokens live only in memory; a restart logs every admin out. Acceptable
/// for the single-admin deployment this serves.
pub struct SessionStore {
  ttl:    TimeDelta,
  tokens: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl SessionStore {
  pub fn new(ttl_secs: u64) -> Self {
    Self {
      ttl:    TimeDelta::seconds(ttl_secs as i64),
      tokens: Mutex::new(HashMap::new()),
    }
  }

  pub fn ttl_secs(&self) -> i64 {
    self.ttl.num_seconds()
  }

  /// Mint and register a fresh random token. Expired entries are pruned
  /// here rather than on a timer.
  pub async fn issue(&self) -> String {
    let mut raw = [0u8; 32];
    OsRng.fill_bytes(&mut raw);
    let token = hex::encode(raw);

    let now = Utc::now();
    let mut tokens = self.tokens.lock().await;
    tokens.retain(|_, expires| *expires > now);
    tokens.insert(token.clone(), now + self.ttl);
    token
  }

  /// True if the token is registered and unexpired.
  pub async fn validate(&self, token: &str) -> bool {
    let mut tokens = self.tokens.lock().await;
    match tokens.get(token) {
      Some(expires) if *expires > Utc::now() => true,
      Some(_) => {
        tokens.remove(token);
        false
      }
      None => false,
    }
  }

  pub async fn revoke(&self, token: &str) {
    self.tokens.lock().await.remove(token);
  }
}

/// Pull the session token out of the `Cookie` header, if present.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
  let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
  cookies.split(';').find_map(|pair| {
    let (name, value) = pair.trim().split_once('=')?;
    (name == SESSION_COOKIE).then(|| value.to_string())
  })
}

// ─── Extractor ───────────────────────────────────────────────────────────────

/// Zero-size marker: present in the handler means the request carried a
/// valid, unexpired session.
pub struct Authenticated;

impl<S> FromRequestParts<AppState<S>> for Authenticated
where
  S: ContentStore + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let token = session_token(&parts.headers).ok_or(ApiError::Unauthorized)?;
    if state.sessions.validate(&token).await {
      Ok(Authenticated)
    } else {
      Err(ApiError::Unauthorized)
    }
  }
}

// ─── Handlers ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub password: String,
}

/// `POST /api/auth/login` — verify the password against the configured
/// hash, mint a session, set the cookie.
pub async fn login<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginBody>,
) -> Result<Response, ApiError>
where
  S: ContentStore + 'static,
{
  let parsed = PasswordHash::new(&state.auth.password_hash)
    .map_err(|_| ApiError::Unauthorized)?;
  Argon2::default()
    .verify_password(body.password.as_bytes(), &parsed)
    .map_err(|_| ApiError::Unauthorized)?;

  let token = state.sessions.issue().await;
  let cookie = format!(
    "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Strict; Max-Age={}",
    state.sessions.ttl_secs()
  );
  Ok(
    ([(header::SET_COOKIE, cookie)], Json(json!({ "success": true })))
      .into_response(),
  )
}

/// `POST /api/auth/logout` — revoke the session (if any) and clear the
/// cookie. Always succeeds.
pub async fn logout<S>(
  State(state): State<AppState<S>>,
  headers: HeaderMap,
) -> Response
where
  S: ContentStore + 'static,
{
  if let Some(token) = session_token(&headers) {
    state.sessions.revoke(&token).await;
  }
  let cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0");
  ([(header::SET_COOKIE, cookie)], Json(json!({ "success": true })))
    .into_response()
}
