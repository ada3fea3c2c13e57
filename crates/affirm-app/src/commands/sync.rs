//! Sync triggers: push on change, pull on start and on external-change
//! notifications. Every entry point is premium-gated and treats remote
//! failure as "no effect until the next attempt".

use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use affirm_sync::{apply_remote, ApplySummary, SyncedAffirmation};

use crate::error::{AppError, Result};
use crate::events::AppEvent;
use crate::state::Services;

/// Push the full favorite-id set to the remote blob. No-op for free
/// users; remote failure is logged and swallowed.
pub async fn push_favorites(svc: &Services) -> Result<()> {
    let ids = {
        let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
        if !state.is_premium {
            return Ok(());
        }
        state
            .database
            .list_favorite_affirmations()?
            .iter()
            .map(|a| a.id)
            .collect::<Vec<_>>()
    };

    if let Err(e) = svc.sync.push_favorites(&ids).await {
        warn!(error = %e, "favorites push failed");
    }
    Ok(())
}

/// Push the full custom-affirmation list to the remote blob. No-op for
/// free users; remote failure is logged and swallowed.
pub async fn push_custom_affirmations(svc: &Services) -> Result<()> {
    let records = {
        let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
        if !state.is_premium {
            return Ok(());
        }
        state
            .database
            .list_custom_affirmations()?
            .iter()
            .map(SyncedAffirmation::from)
            .collect::<Vec<_>>()
    };

    if let Err(e) = svc.sync.push_custom_affirmations(&records).await {
        warn!(error = %e, "custom affirmations push failed");
    }
    Ok(())
}

/// Pull both remote keys and apply them to the local store.
///
/// Favorites are overwritten wholesale from the remote set; custom
/// affirmations merge per id (text/category on match, full record on
/// miss). Returns `None` when skipped (free user or remote unreachable).
pub async fn pull_and_apply(svc: &Services) -> Result<Option<ApplySummary>> {
    {
        let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
        if !state.is_premium {
            return Ok(None);
        }
    }

    let remote = match svc.sync.fetch_remote().await {
        Ok(remote) => remote,
        Err(e) => {
            warn!(error = %e, "remote fetch failed; keeping local state");
            return Ok(None);
        }
    };

    let summary = {
        let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
        apply_remote(&state.database, &remote)?
    };

    svc.emit(AppEvent::SyncCompleted {
        favorites_applied: summary.favorites_applied,
        custom_updated: summary.custom_updated,
        custom_created: summary.custom_created,
    });
    Ok(Some(summary))
}

/// Long-running listener: every external-change notification from the
/// blob store triggers a pull. Spawn once at startup; returns when the
/// blob store's watch channel closes.
pub async fn run_external_change_listener(svc: Services) {
    let mut watch = svc.sync.watch_remote();
    loop {
        match watch.recv().await {
            Ok(key) => {
                debug!(key, "remote blob changed externally");
                if let Err(e) = pull_and_apply(&svc).await {
                    warn!(error = %e, "pull after external change failed");
                }
            }
            Err(RecvError::Lagged(missed)) => {
                debug!(missed, "external-change notifications lagged");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{harness, make_premium};
    use affirm_shared::constants::{KV_KEY_CUSTOM_AFFIRMATIONS, KV_KEY_FAVORITES};
    use affirm_shared::Category;
    use affirm_store::Affirmation;
    use affirm_sync::KvStore;
    use serde_json::json;
    use uuid::Uuid;

    #[tokio::test]
    async fn free_users_never_touch_remote() {
        let h = harness();
        {
            let state = h.svc.state.lock().unwrap();
            let mut a = Affirmation::new("x", Category::Morning, false);
            a.is_favorite = true;
            state.database.create_affirmation(&a).unwrap();
        }

        push_favorites(&h.svc).await.unwrap();
        push_custom_affirmations(&h.svc).await.unwrap();
        assert!(pull_and_apply(&h.svc).await.unwrap().is_none());

        assert!(h.kv.get(KV_KEY_FAVORITES).await.unwrap().is_none());
        assert!(h
            .kv
            .get(KV_KEY_CUSTOM_AFFIRMATIONS)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn push_then_pull_round_trips() {
        let h = harness();
        make_premium(&h.svc);

        let (a, b) = {
            let state = h.svc.state.lock().unwrap();
            let db = &state.database;
            let a = Affirmation::new("a", Category::SelfLove, false);
            let b = Affirmation::new("b", Category::Morning, false);
            db.create_affirmation(&a).unwrap();
            db.create_affirmation(&b).unwrap();
            db.set_favorite(a.id, true).unwrap();
            db.set_favorite(b.id, true).unwrap();
            (a.id, b.id)
        };

        push_favorites(&h.svc).await.unwrap();
        let summary = pull_and_apply(&h.svc).await.unwrap().unwrap();
        assert_eq!(summary.favorites_applied, 2);

        let state = h.svc.state.lock().unwrap();
        assert!(state.database.get_affirmation(a).unwrap().is_favorite);
        assert!(state.database.get_affirmation(b).unwrap().is_favorite);
    }

    #[tokio::test]
    async fn pull_creates_custom_records_from_other_devices() {
        let h = harness();
        make_premium(&h.svc);

        let remote_id = Uuid::new_v4();
        h.kv.set_external(
            KV_KEY_CUSTOM_AFFIRMATIONS,
            json!([{
                "id": remote_id.to_string(),
                "text": "From my phone",
                "category": "Morning",
                "isCustom": true,
                "isFavorite": false,
                "createdAt": 1_750_000_000i64,
            }]),
        );

        let summary = pull_and_apply(&h.svc).await.unwrap().unwrap();
        assert_eq!(summary.custom_created, 1);

        let state = h.svc.state.lock().unwrap();
        let created = state.database.get_affirmation(remote_id).unwrap();
        assert_eq!(created.text, "From my phone");
        assert_eq!(created.category, Category::Morning);
        assert!(created.is_custom);
    }

    #[tokio::test]
    async fn external_change_triggers_pull() {
        let h = harness();
        make_premium(&h.svc);

        let id = {
            let state = h.svc.state.lock().unwrap();
            let a = Affirmation::new("x", Category::Health, false);
            state.database.create_affirmation(&a).unwrap();
            a.id
        };

        let mut events = h.svc.subscribe();
        let listener = tokio::spawn(run_external_change_listener(h.svc.clone()));
        // Let the listener reach its watch subscription.
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        // Another device marks the affirmation favorite.
        h.kv.set_external(KV_KEY_FAVORITES, json!([id.to_string()]));

        // Wait until the listener applied the pull.
        tokio::time::timeout(std::time::Duration::from_secs(5), async {
            loop {
                if let Ok(AppEvent::SyncCompleted { .. }) = events.recv().await {
                    break;
                }
            }
        })
        .await
        .expect("listener should pull after external change");

        {
            let state = h.svc.state.lock().unwrap();
            assert!(state.database.get_affirmation(id).unwrap().is_favorite);
        }
        listener.abort();
    }
}
