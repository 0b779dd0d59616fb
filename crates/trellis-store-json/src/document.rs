//! [`Document`] — one JSON array file owning a whole record collection.

use std::{marker::PhantomData, path::PathBuf};

use chrono::Utc;
use tokio::sync::Mutex;
use trellis_core::Record;

use crate::error::Result;

/// A single record kind's backing document.
///
/// Every operation reads the full collection, transforms it in memory, and
/// overwrites the whole document. A per-document mutex is held across each
/// read-modify-write cycle so concurrent mutations of the same kind cannot
/// interleave; `list` reads without the lock, which is safe because writes
/// land via rename and are observed whole or not at all.
pub struct Document<R> {
  path:  PathBuf,
  write: Mutex<()>,
  _kind: PhantomData<fn() -> R>,
}

impl<R: Record> Document<R> {
  /// Open the document at `path`, seeding it with an empty collection if it
  /// does not exist yet.
  pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
    let path = path.into();
    let doc = Self {
      path,
      write: Mutex::new(()),
      _kind: PhantomData,
    };
    if !tokio::fs::try_exists(&doc.path).await? {
      tracing::debug!(kind = R::KIND, path = %doc.path.display(), "seeding empty document");
      doc.persist(&[]).await?;
    }
    Ok(doc)
  }

  // ── Disk access ───────────────────────────────────────────────────────

  async fn load(&self) -> Result<Vec<R>> {
    let bytes = tokio::fs::read(&self.path).await?;
    Ok(serde_json::from_slice(&bytes)?)
  }

  /// Replace the whole document. Written to a sibling temp file and renamed
  /// into place so readers never observe a partially-written collection.
  async fn persist(&self, records: &[R]) -> Result<()> {
    let json = serde_json::to_vec_pretty(records)?;
    let tmp = self.path.with_extension("json.tmp");
    tokio::fs::write(&tmp, &json).await?;
    tokio::fs::rename(&tmp, &self.path).await?;
    Ok(())
  }

  // ── Operations ────────────────────────────────────────────────────────

  /// The full collection in on-disk order.
  pub async fn list(&self) -> Result<Vec<R>> {
    self.load().await
  }

  /// Assign the next id, stamp both timestamps, and persist.
  ///
  /// The id is recomputed from the current contents — `max(existing) + 1`,
  /// or 1 for an empty collection — not taken from a counter, so it stays
  /// stable when lower ids have been deleted.
  pub async fn create(&self, draft: R::Draft) -> Result<R> {
    let _guard = self.write.lock().await;
    let mut records = self.load().await?;
    let id = records.iter().map(R::id).max().map_or(1, |max| max + 1);
    let record = R::from_draft(id, draft, Utc::now());
    if R::PREPEND {
      records.insert(0, record.clone());
    } else {
      records.push(record.clone());
    }
    self.persist(&records).await?;
    Ok(record)
  }

  /// Merge `patch` over the record with this id and persist. Returns `None`
  /// without writing if the id is unknown. The record's id and creation
  /// timestamp are untouchable — the patch type carries neither.
  pub async fn update(&self, id: u64, patch: R::Patch) -> Result<Option<R>> {
    let _guard = self.write.lock().await;
    let mut records = self.load().await?;
    let Some(record) = records.iter_mut().find(|r| r.id() == id) else {
      return Ok(None);
    };
    record.apply_patch(patch, Utc::now());
    let updated = record.clone();
    self.persist(&records).await?;
    Ok(Some(updated))
  }

  /// Remove the record with this id and persist the filtered collection.
  /// Returns `false` without writing if the id is unknown.
  pub async fn delete(&self, id: u64) -> Result<bool> {
    let _guard = self.write.lock().await;
    let mut records = self.load().await?;
    let before = records.len();
    records.retain(|r| r.id() != id);
    if records.len() == before {
      return Ok(false);
    }
    self.persist(&records).await?;
    Ok(true)
  }
}
