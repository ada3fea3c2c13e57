//! Browsing, favoriting and custom-affirmation authoring.

use chrono::{DateTime, Local, NaiveDate};
use tracing::warn;
use uuid::Uuid;

use affirm_shared::constants::FREE_FAVORITES_LIMIT;
use affirm_shared::Category;
use affirm_store::{seed, Affirmation, Database};
use affirm_sync::SyncedAffirmation;

use crate::error::{AppError, Result};
use crate::events::AppEvent;
use crate::state::Services;

use super::streak::refresh_favorite_category;

/// Seed the built-in catalog on first launch. Returns how many rows were
/// inserted (0 when already seeded).
pub fn seed_if_needed(svc: &Services) -> Result<usize> {
    let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
    seed::seed_if_empty(&state.database).map_err(Into::into)
}

pub fn get_affirmation(svc: &Services, id: Uuid) -> Result<Affirmation> {
    let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
    state.database.get_affirmation(id).map_err(Into::into)
}

pub fn list_affirmations(svc: &Services) -> Result<Vec<Affirmation>> {
    let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
    state.database.list_affirmations().map_err(Into::into)
}

pub fn list_favorites(svc: &Services) -> Result<Vec<Affirmation>> {
    let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
    state
        .database
        .list_favorite_affirmations()
        .map_err(Into::into)
}

pub fn list_custom(svc: &Services) -> Result<Vec<Affirmation>> {
    let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
    state
        .database
        .list_custom_affirmations()
        .map_err(Into::into)
}

/// The deterministic daily pick shown by widgets and shortcuts.
pub fn daily_affirmation(date: NaiveDate) -> (&'static str, Category) {
    seed::daily_affirmation(date)
}

/// Toggle the favorite flag on one affirmation. Returns the new flag.
///
/// Adding (not removing) a favorite is limited for free users; the
/// paywall should be shown on [`AppError::FavoriteLimitReached`]. For
/// premium users the full favorite set is pushed afterwards,
/// best-effort.
pub async fn toggle_favorite(
    svc: &Services,
    id: Uuid,
    now: DateTime<Local>,
) -> Result<bool> {
    let (now_favorite, count, push_ids) = {
        let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
        let db = &state.database;

        let affirmation = db.get_affirmation(id)?;
        let now_favorite = !affirmation.is_favorite;

        if now_favorite
            && !state.is_premium
            && db.count_favorites()? >= FREE_FAVORITES_LIMIT as u64
        {
            return Err(AppError::FavoriteLimitReached);
        }

        db.set_favorite(id, now_favorite)?;
        if now_favorite {
            if let Err(e) = db.set_favorite_added(now.date_naive()) {
                warn!(error = %e, "failed to flag favorite on daily log");
            }
        }

        refresh_favorite_category(db)?;

        let count = db.count_favorites()? as usize;
        let push_ids = state
            .is_premium
            .then(|| favorite_ids(db))
            .transpose()?;
        (now_favorite, count, push_ids)
    };

    if let Some(ids) = push_ids {
        if let Err(e) = svc.sync.push_favorites(&ids).await {
            warn!(error = %e, "favorites push failed");
        }
    }

    svc.emit(AppEvent::FavoritesChanged { count });
    Ok(now_favorite)
}

/// Remove every favorite. Premium users push the now-empty set.
pub async fn reset_favorites(svc: &Services) -> Result<()> {
    let premium = {
        let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
        state.database.clear_all_favorites()?;
        state.is_premium
    };

    if premium {
        if let Err(e) = svc.sync.push_favorites(&[]).await {
            warn!(error = %e, "favorites push failed");
        }
    }

    svc.emit(AppEvent::FavoritesChanged { count: 0 });
    Ok(())
}

/// Create a user-authored affirmation.
pub async fn create_custom(
    svc: &Services,
    text: impl Into<String>,
    category: Category,
) -> Result<Affirmation> {
    let affirmation = Affirmation::new(text, category, true);

    let (count, push_records) = {
        let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
        let db = &state.database;
        db.create_affirmation(&affirmation)?;
        gather_custom_push(&state.database, state.is_premium)?
    };

    push_custom_if_some(svc, push_records).await;
    svc.emit(AppEvent::CustomAffirmationsChanged { count });
    Ok(affirmation)
}

/// Edit the text/category of a user-authored affirmation.
pub async fn update_custom(
    svc: &Services,
    id: Uuid,
    text: &str,
    category: Category,
) -> Result<()> {
    let (count, push_records) = {
        let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
        let db = &state.database;

        let existing = db.get_affirmation(id)?;
        if !existing.is_custom {
            return Err(AppError::NotCustom);
        }

        db.update_affirmation_content(id, text, category)?;
        gather_custom_push(db, state.is_premium)?
    };

    push_custom_if_some(svc, push_records).await;
    svc.emit(AppEvent::CustomAffirmationsChanged { count });
    Ok(())
}

/// Delete a user-authored affirmation.
pub async fn delete_custom(svc: &Services, id: Uuid) -> Result<()> {
    let (count, push_records) = {
        let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
        let db = &state.database;

        let existing = db.get_affirmation(id)?;
        if !existing.is_custom {
            return Err(AppError::NotCustom);
        }

        db.delete_affirmation(id)?;
        gather_custom_push(db, state.is_premium)?
    };

    push_custom_if_some(svc, push_records).await;
    svc.emit(AppEvent::CustomAffirmationsChanged { count });
    Ok(())
}

fn favorite_ids(db: &Database) -> Result<Vec<Uuid>> {
    Ok(db
        .list_favorite_affirmations()?
        .iter()
        .map(|a| a.id)
        .collect())
}

/// Custom count plus, for premium users, the records to push.
fn gather_custom_push(
    db: &Database,
    is_premium: bool,
) -> Result<(usize, Option<Vec<SyncedAffirmation>>)> {
    let custom = db.list_custom_affirmations()?;
    let count = custom.len();
    let records = is_premium.then(|| custom.iter().map(SyncedAffirmation::from).collect());
    Ok((count, records))
}

async fn push_custom_if_some(svc: &Services, records: Option<Vec<SyncedAffirmation>>) {
    if let Some(records) = records {
        if let Err(e) = svc.sync.push_custom_affirmations(&records).await {
            warn!(error = %e, "custom affirmations push failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{harness, make_premium};
    use affirm_shared::constants::KV_KEY_FAVORITES;
    use affirm_sync::KvStore;
    use chrono::TimeZone;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).single().unwrap()
    }

    fn insert(svc: &Services, text: &str, category: Category) -> Uuid {
        let state = svc.state.lock().unwrap();
        let a = Affirmation::new(text, category, false);
        state.database.create_affirmation(&a).unwrap();
        a.id
    }

    #[tokio::test]
    async fn toggle_flips_flag_and_counts() {
        let h = harness();
        let id = insert(&h.svc, "I am calm", Category::Evening);

        assert!(toggle_favorite(&h.svc, id, now()).await.unwrap());
        assert!(!toggle_favorite(&h.svc, id, now()).await.unwrap());
    }

    #[tokio::test]
    async fn free_users_hit_favorite_limit() {
        let h = harness();
        let ids: Vec<Uuid> = (0..6)
            .map(|i| insert(&h.svc, &format!("a{i}"), Category::Success))
            .collect();

        for id in &ids[..5] {
            toggle_favorite(&h.svc, *id, now()).await.unwrap();
        }

        let blocked = toggle_favorite(&h.svc, ids[5], now()).await;
        assert!(matches!(blocked, Err(AppError::FavoriteLimitReached)));

        // Removing is always allowed.
        assert!(!toggle_favorite(&h.svc, ids[0], now()).await.unwrap());
    }

    #[tokio::test]
    async fn premium_users_have_no_limit_and_push() {
        let h = harness();
        make_premium(&h.svc);
        let ids: Vec<Uuid> = (0..6)
            .map(|i| insert(&h.svc, &format!("a{i}"), Category::Success))
            .collect();

        for id in &ids {
            toggle_favorite(&h.svc, *id, now()).await.unwrap();
        }

        let blob = h.kv.get(KV_KEY_FAVORITES).await.unwrap().unwrap();
        assert_eq!(blob.as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn free_toggle_does_not_push() {
        let h = harness();
        let id = insert(&h.svc, "quiet", Category::Evening);
        toggle_favorite(&h.svc, id, now()).await.unwrap();

        assert!(h.kv.get(KV_KEY_FAVORITES).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn toggle_updates_favorite_category() {
        let h = harness();
        let id = insert(&h.svc, "grateful", Category::Gratitude);
        toggle_favorite(&h.svc, id, now()).await.unwrap();

        let stats = super::super::streak::get_stats(&h.svc).unwrap();
        assert_eq!(stats.favorite_category, Some(Category::Gratitude));
    }

    #[tokio::test]
    async fn custom_lifecycle() {
        let h = harness();

        let created = create_custom(&h.svc, "My own words", Category::SelfLove)
            .await
            .unwrap();
        assert!(created.is_custom);

        update_custom(&h.svc, created.id, "Better words", Category::Morning)
            .await
            .unwrap();
        let updated = get_affirmation(&h.svc, created.id).unwrap();
        assert_eq!(updated.text, "Better words");
        assert_eq!(updated.category, Category::Morning);

        delete_custom(&h.svc, created.id).await.unwrap();
        assert!(list_custom(&h.svc).unwrap().is_empty());
    }

    #[tokio::test]
    async fn seeded_entries_cannot_be_edited() {
        let h = harness();
        let id = insert(&h.svc, "seeded", Category::Health);

        let result = update_custom(&h.svc, id, "rewrite", Category::Health).await;
        assert!(matches!(result, Err(AppError::NotCustom)));
        assert!(matches!(
            delete_custom(&h.svc, id).await,
            Err(AppError::NotCustom)
        ));
    }

    #[test]
    fn seeding_fills_empty_store_once() {
        let h = harness();
        let first = seed_if_needed(&h.svc).unwrap();
        assert!(first > 0);
        assert_eq!(seed_if_needed(&h.svc).unwrap(), 0);
    }

    #[test]
    fn daily_pick_rotates_by_day_of_month() {
        let d1 = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        let d9 = NaiveDate::from_ymd_opt(2026, 5, 9).unwrap();
        // Eight featured entries: days 1 and 9 map to the same slot.
        assert_eq!(daily_affirmation(d1), daily_affirmation(d9));
    }
}
