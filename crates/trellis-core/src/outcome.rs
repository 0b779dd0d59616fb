//! Outcome — an anonymized case study published on the site.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::Record;

/// A published case study. Serialised field names stay camelCase to match
/// the persisted document shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
  pub id:            u64,
  /// Domain of study, e.g. "Computer Science".
  pub field:         String,
  pub narrative:     String,
  /// Free-form display string, e.g. "18 months".
  pub duration:      String,
  pub key_milestone: String,
  pub created_at:    DateTime<Utc>,
  pub updated_at:    DateTime<Utc>,
}

/// Validated create payload for an outcome.
#[derive(Debug, Clone)]
pub struct OutcomeDraft {
  pub field:         String,
  pub narrative:     String,
  pub duration:      String,
  pub key_milestone: String,
}

/// Mutable fields accepted by outcome updates.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomePatch {
  pub field:         Option<String>,
  pub narrative:     Option<String>,
  pub duration:      Option<String>,
  pub key_milestone: Option<String>,
}

impl Record for Outcome {
  type Draft = OutcomeDraft;
  type Patch = OutcomePatch;

  const KIND: &'static str = "outcomes";

  fn id(&self) -> u64 {
    self.id
  }

  fn from_draft(id: u64, draft: OutcomeDraft, now: DateTime<Utc>) -> Self {
    Self {
      id,
      field: draft.field,
      narrative: draft.narrative,
      duration: draft.duration,
      key_milestone: draft.key_milestone,
      created_at: now,
      updated_at: now,
    }
  }

  fn apply_patch(&mut self, patch: OutcomePatch, now: DateTime<Utc>) {
    if let Some(field) = patch.field {
      self.field = field;
    }
    if let Some(narrative) = patch.narrative {
      self.narrative = narrative;
    }
    if let Some(duration) = patch.duration {
      self.duration = duration;
    }
    if let Some(key_milestone) = patch.key_milestone {
      self.key_milestone = key_milestone;
    }
    self.updated_at = now;
  }
}
