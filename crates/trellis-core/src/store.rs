//! The `ContentStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `trellis-store-json`).
//! Higher layers (`trellis-api`) depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::{
  article::{Article, ArticleDraft, ArticlePatch},
  contact::{Contact, ContactDraft, ContactPatch},
  outcome::{Outcome, OutcomeDraft, OutcomePatch},
};

/// Abstraction over the site's content storage.
///
/// Each record kind lives in its own collection; the three kinds share no
/// relationships beyond their CRUD shape. Update and delete signal a missing
/// id through their return value (`None` / `false`) rather than through
/// `Self::Error`, which is reserved for storage failures.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ContentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Outcomes ──────────────────────────────────────────────────────────

  /// Return all outcomes in insertion order.
  fn list_outcomes(
    &self,
  ) -> impl Future<Output = Result<Vec<Outcome>, Self::Error>> + Send + '_;

  /// Persist a new outcome. The id and both timestamps are set by the store.
  fn create_outcome(
    &self,
    draft: OutcomeDraft,
  ) -> impl Future<Output = Result<Outcome, Self::Error>> + Send + '_;

  /// Merge `patch` over the outcome with this id. Returns `None` (and
  /// performs no write) if the id is unknown.
  fn update_outcome(
    &self,
    id: u64,
    patch: OutcomePatch,
  ) -> impl Future<Output = Result<Option<Outcome>, Self::Error>> + Send + '_;

  /// Remove the outcome with this id. Returns `false` (and performs no
  /// write) if the id is unknown.
  fn delete_outcome(
    &self,
    id: u64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Articles ──────────────────────────────────────────────────────────

  fn list_articles(
    &self,
  ) -> impl Future<Output = Result<Vec<Article>, Self::Error>> + Send + '_;

  fn create_article(
    &self,
    draft: ArticleDraft,
  ) -> impl Future<Output = Result<Article, Self::Error>> + Send + '_;

  fn update_article(
    &self,
    id: u64,
    patch: ArticlePatch,
  ) -> impl Future<Output = Result<Option<Article>, Self::Error>> + Send + '_;

  fn delete_article(
    &self,
    id: u64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Contacts ──────────────────────────────────────────────────────────

  /// Return all contacts, newest first.
  fn list_contacts(
    &self,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Persist a new inquiry at the front of the collection. Status is always
  /// `new`; the draft carries no way to set it.
  fn create_contact(
    &self,
    draft: ContactDraft,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  fn update_contact(
    &self,
    id: u64,
    patch: ContactPatch,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  fn delete_contact(
    &self,
    id: u64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
