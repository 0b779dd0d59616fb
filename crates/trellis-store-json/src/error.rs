//! Error type for `trellis-store-json`.

use thiserror::Error;

/// A storage failure: the backing document was unreadable, unwritable, or
/// not valid JSON. Surfaced to the caller as-is — no retry, no recovery.
#[derive(Debug, Error)]
pub enum Error {
  #[error("storage i/o error: {0}")]
  Io(#[from] std::io::Error),

  #[error("corrupt document: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
