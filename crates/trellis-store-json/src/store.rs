//! [`JsonStore`] — three documents under one data directory.

use std::path::Path;

use trellis_core::{
  ContentStore,
  article::{Article, ArticleDraft, ArticlePatch},
  contact::{Contact, ContactDraft, ContactPatch},
  outcome::{Outcome, OutcomeDraft, OutcomePatch},
};

use crate::{
  document::Document,
  error::{Error, Result},
};

/// The flat-file content store. One JSON document per record kind, all under
/// a single data directory.
pub struct JsonStore {
  outcomes: Document<Outcome>,
  articles: Document<Article>,
  contacts: Document<Contact>,
}

impl JsonStore {
  /// Open (or create) a store rooted at `data_dir`, seeding any missing
  /// documents with empty collections.
  pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
    let dir = data_dir.as_ref();
    tokio::fs::create_dir_all(dir).await?;
    Ok(Self {
      outcomes: Document::open(dir.join("outcomes.json")).await?,
      articles: Document::open(dir.join("articles.json")).await?,
      contacts: Document::open(dir.join("contacts.json")).await?,
    })
  }
}

impl ContentStore for JsonStore {
  type Error = Error;

  // ── Outcomes ──────────────────────────────────────────────────────────

  async fn list_outcomes(&self) -> Result<Vec<Outcome>> {
    self.outcomes.list().await
  }

  async fn create_outcome(&self, draft: OutcomeDraft) -> Result<Outcome> {
    self.outcomes.create(draft).await
  }

  async fn update_outcome(
    &self,
    id: u64,
    patch: OutcomePatch,
  ) -> Result<Option<Outcome>> {
    self.outcomes.update(id, patch).await
  }

  async fn delete_outcome(&self, id: u64) -> Result<bool> {
    self.outcomes.delete(id).await
  }

  // ── Articles ──────────────────────────────────────────────────────────

  async fn list_articles(&self) -> Result<Vec<Article>> {
    self.articles.list().await
  }

  async fn create_article(&self, draft: ArticleDraft) -> Result<Article> {
    self.articles.create(draft).await
  }

  async fn update_article(
    &self,
    id: u64,
    patch: ArticlePatch,
  ) -> Result<Option<Article>> {
    self.articles.update(id, patch).await
  }

  async fn delete_article(&self, id: u64) -> Result<bool> {
    self.articles.delete(id).await
  }

  // ── Contacts ──────────────────────────────────────────────────────────

  async fn list_contacts(&self) -> Result<Vec<Contact>> {
    self.contacts.list().await
  }

  async fn create_contact(&self, draft: ContactDraft) -> Result<Contact> {
    self.contacts.create(draft).await
  }

  async fn update_contact(
    &self,
    id: u64,
    patch: ContactPatch,
  ) -> Result<Option<Contact>> {
    self.contacts.update(id, patch).await
  }

  async fn delete_contact(&self, id: u64) -> Result<bool> {
    self.contacts.delete(id).await
  }
}
