//! Article — a journal post.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::Record;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
  pub id:         u64,
  pub title:      String,
  /// Free-form display string ("March 2024"), not necessarily sortable.
  pub date:       String,
  pub excerpt:    String,
  /// Free-form display string, e.g. "6 min".
  pub read_time:  String,
  /// Body text; may be empty.
  pub content:    String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Validated create payload for an article. `content` is optional at the
/// HTTP layer and defaults to empty before reaching the draft.
#[derive(Debug, Clone)]
pub struct ArticleDraft {
  pub title:     String,
  pub date:      String,
  pub excerpt:   String,
  pub read_time: String,
  pub content:   String,
}

/// Mutable fields accepted by article updates.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePatch {
  pub title:     Option<String>,
  pub date:      Option<String>,
  pub excerpt:   Option<String>,
  pub read_time: Option<String>,
  pub content:   Option<String>,
}

impl Record for Article {
  type Draft = ArticleDraft;
  type Patch = ArticlePatch;

  const KIND: &'static str = "articles";

  fn id(&self) -> u64 {
    self.id
  }

  fn from_draft(id: u64, draft: ArticleDraft, now: DateTime<Utc>) -> Self {
    Self {
      id,
      title: draft.title,
      date: draft.date,
      excerpt: draft.excerpt,
      read_time: draft.read_time,
      content: draft.content,
      created_at: now,
      updated_at: now,
    }
  }

  fn apply_patch(&mut self, patch: ArticlePatch, now: DateTime<Utc>) {
    if let Some(title) = patch.title {
      self.title = title;
    }
    if let Some(date) = patch.date {
      self.date = date;
    }
    if let Some(excerpt) = patch.excerpt {
      self.excerpt = excerpt;
    }
    if let Some(read_time) = patch.read_time {
      self.read_time = read_time;
    }
    if let Some(content) = patch.content {
      self.content = content;
    }
    self.updated_at = now;
  }
}
