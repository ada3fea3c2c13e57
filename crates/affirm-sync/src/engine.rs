//! Push/pull engine for the two synced blobs.
//!
//! Remote reads and writes are split from local application so callers
//! can hold the store's single-writer lock only around the local half:
//! gather, release, await the remote call, re-acquire, apply.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::timeout;
use uuid::Uuid;

use affirm_shared::constants::{KV_KEY_CUSTOM_AFFIRMATIONS, KV_KEY_FAVORITES, REMOTE_TIMEOUT_SECS};
use affirm_store::{Database, StoreError};

use crate::error::{Result, SyncError};
use crate::kv::KvStore;
use crate::records::SyncedAffirmation;

/// Remote state of both synced keys, as read by one pull.
#[derive(Debug, Clone, Default)]
pub struct RemoteState {
    pub favorite_ids: Vec<Uuid>,
    pub custom: Vec<SyncedAffirmation>,
}

/// What applying a [`RemoteState`] changed locally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub favorites_applied: usize,
    pub custom_updated: usize,
    pub custom_created: usize,
}

/// Engine wrapping a [`KvStore`] with whole-value push/pull semantics and
/// a soft per-call deadline.
pub struct SyncEngine {
    kv: Arc<dyn KvStore>,
    deadline: Duration,
    last_sync_at: Mutex<Option<DateTime<Utc>>>,
}

impl SyncEngine {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self::with_deadline(kv, Duration::from_secs(REMOTE_TIMEOUT_SECS))
    }

    pub fn with_deadline(kv: Arc<dyn KvStore>, deadline: Duration) -> Self {
        Self {
            kv,
            deadline,
            last_sync_at: Mutex::new(None),
        }
    }

    /// Subscribe to external-change notifications from the blob store.
    pub fn watch_remote(&self) -> tokio::sync::broadcast::Receiver<String> {
        self.kv.watch()
    }

    /// When the last successful push or pull completed, if ever.
    pub fn last_sync_at(&self) -> Option<DateTime<Utc>> {
        self.last_sync_at.lock().ok().and_then(|guard| *guard)
    }

    /// Overwrite the remote favorites blob with the full id set.
    pub async fn push_favorites(&self, favorite_ids: &[Uuid]) -> Result<()> {
        let strings: Vec<String> = favorite_ids.iter().map(Uuid::to_string).collect();
        self.kv_set(KV_KEY_FAVORITES, serde_json::to_value(strings)?)
            .await?;

        tracing::debug!(count = favorite_ids.len(), "pushed favorites");
        self.mark_synced();
        Ok(())
    }

    /// Overwrite the remote custom-affirmations blob with the full list.
    pub async fn push_custom_affirmations(&self, records: &[SyncedAffirmation]) -> Result<()> {
        self.kv_set(KV_KEY_CUSTOM_AFFIRMATIONS, serde_json::to_value(records)?)
            .await?;

        tracing::debug!(count = records.len(), "pushed custom affirmations");
        self.mark_synced();
        Ok(())
    }

    /// Read both remote keys. Unparseable entries are skipped rather than
    /// failing the whole pull, matching the tolerant reader on the other
    /// platforms sharing this blob.
    pub async fn fetch_remote(&self) -> Result<RemoteState> {
        let favorite_ids = match self.kv_get(KV_KEY_FAVORITES).await? {
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str())
                .filter_map(|s| Uuid::parse_str(s).ok())
                .collect(),
            _ => Vec::new(),
        };

        let custom = match self.kv_get(KV_KEY_CUSTOM_AFFIRMATIONS).await? {
            Some(serde_json::Value::Array(items)) => items
                .into_iter()
                .filter_map(|v| serde_json::from_value::<SyncedAffirmation>(v).ok())
                .collect(),
            _ => Vec::new(),
        };

        self.mark_synced();
        Ok(RemoteState {
            favorite_ids,
            custom,
        })
    }

    fn mark_synced(&self) {
        if let Ok(mut guard) = self.last_sync_at.lock() {
            *guard = Some(Utc::now());
        }
    }

    async fn kv_get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        timeout(self.deadline, self.kv.get(key))
            .await
            .map_err(|_| SyncError::Timeout)?
    }

    async fn kv_set(&self, key: &str, value: serde_json::Value) -> Result<()> {
        timeout(self.deadline, self.kv.set(key, value))
            .await
            .map_err(|_| SyncError::Timeout)?
    }
}

/// Apply a pulled [`RemoteState`] to the local store.
///
/// Favorites are a full overwrite of every local flag: a favorite toggled
/// locally but not yet pushed is reverted by the pull (last writer wins
/// at whole-blob granularity). Custom affirmations merge per id: `text`
/// and `category` overwrite on match, the whole record is created on
/// miss; other local fields are untouched.
pub fn apply_remote(db: &Database, remote: &RemoteState) -> Result<ApplySummary> {
    db.overwrite_favorites(&remote.favorite_ids)?;

    let mut summary = ApplySummary {
        favorites_applied: remote.favorite_ids.len(),
        ..ApplySummary::default()
    };

    for record in &remote.custom {
        match db.get_affirmation(record.id) {
            Ok(_) => {
                db.update_affirmation_content(record.id, &record.text, record.category)?;
                summary.custom_updated += 1;
            }
            Err(StoreError::NotFound) => {
                db.create_affirmation(&record.to_affirmation())?;
                summary.custom_created += 1;
            }
            Err(other) => return Err(other.into()),
        }
    }

    tracing::debug!(
        favorites = summary.favorites_applied,
        updated = summary.custom_updated,
        created = summary.custom_created,
        "applied remote state"
    );
    Ok(summary)
}
