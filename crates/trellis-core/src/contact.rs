//! Contact — an inbound inquiry submitted through the public form.
//!
//! Contacts differ from the other record kinds in two ways: new records are
//! prepended so the latest inquiry lists first, and `status` is never
//! caller-settable on creation — every inquiry starts as `new` and only an
//! administrative update moves it along.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Where an inquiry sits in the admin triage flow.
///
/// The store accepts any transition; the admin UI only offers the forward
/// sequence new → read → replied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
  New,
  Read,
  Replied,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
  pub id:         u64,
  pub background: String,
  pub timeline:   String,
  pub interest:   String,
  /// Free-form contact info supplied by the visitor.
  pub contact:    String,
  pub status:     ContactStatus,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notes:      Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Validated create payload for a contact. Carries no status field — the
/// submitter cannot choose one.
#[derive(Debug, Clone)]
pub struct ContactDraft {
  pub background: String,
  pub timeline:   String,
  pub interest:   String,
  pub contact:    String,
}

/// Mutable fields accepted by contact updates: only what the admin
/// dashboard sends. The visitor-supplied fields are immutable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactPatch {
  pub status: Option<ContactStatus>,
  pub notes:  Option<String>,
}

impl Record for Contact {
  type Draft = ContactDraft;
  type Patch = ContactPatch;

  const KIND: &'static str = "contacts";
  const PREPEND: bool = true;

  fn id(&self) -> u64 {
    self.id
  }

  fn from_draft(id: u64, draft: ContactDraft, now: DateTime<Utc>) -> Self {
    Self {
      id,
      background: draft.background,
      timeline: draft.timeline,
      interest: draft.interest,
      contact: draft.contact,
      status: ContactStatus::New,
      notes: None,
      created_at: now,
      updated_at: now,
    }
  }

  fn apply_patch(&mut self, patch: ContactPatch, now: DateTime<Utc>) {
    if let Some(status) = patch.status {
      self.status = status;
    }
    if let Some(notes) = patch.notes {
      self.notes = Some(notes);
    }
    self.updated_at = now;
  }
}
