//! The [`Record`] trait — the shape shared by every stored record kind.
//!
//! A record kind is a homogeneous collection of records identified by a
//! store-assigned integer id, stamped with creation and modification times.
//! The backing store is generic over this trait; each kind supplies a draft
//! type (the validated create payload) and a patch type (the allow-listed
//! mutable fields).

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};

/// A record kind persistable by a collection store.
///
/// `Draft` carries every caller-settable field for creation; `Patch` carries
/// only the fields an update is allowed to touch. Neither includes the id or
/// the creation timestamp, so those are immutable by construction.
pub trait Record:
  Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
  /// Validated payload accepted by create.
  type Draft: Send + 'static;
  /// Allow-listed mutable fields accepted by update.
  type Patch: Send + 'static;

  /// Collection name, used for file stems and log messages.
  const KIND: &'static str;

  /// New records are inserted at the front of the collection instead of the
  /// back. Contacts use this so the most recent inquiry lists first.
  const PREPEND: bool = false;

  fn id(&self) -> u64;

  /// Build a full record from a draft. `created_at` and `updated_at` are both
  /// set to `now`.
  fn from_draft(id: u64, draft: Self::Draft, now: DateTime<Utc>) -> Self;

  /// Merge a patch over this record. Fields absent from the patch retain
  /// their prior values; `updated_at` is set to `now`.
  fn apply_patch(&mut self, patch: Self::Patch, now: DateTime<Utc>);
}
