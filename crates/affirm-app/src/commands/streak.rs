//! Streak and activity tracking.
//!
//! Day boundaries follow the device-local calendar: `record_activity`
//! fires at most once per local day, and the day gap to the previous
//! activity decides whether the streak extends, resets, or starts.

use chrono::{DateTime, Local, Utc};
use tracing::warn;
use uuid::Uuid;

use affirm_shared::constants::STREAK_MILESTONES;
use affirm_shared::Category;
use affirm_store::{Database, UserStats};

use crate::error::{AppError, Result};
use crate::events::AppEvent;
use crate::state::Services;

/// Record "the app was used today". Idempotent per calendar day.
///
/// Gap of exactly one day extends the streak; a longer gap restarts it at
/// 1 (today itself counts); a fresh profile starts at 1. The longest
/// streak is raised to match whenever the current streak passes it.
pub fn record_activity(svc: &Services, now: DateTime<Local>) -> Result<UserStats> {
    let (stats, milestone) = {
        let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
        let db = &state.database;

        let mut stats = db.get_or_create_stats()?;
        let today = now.date_naive();
        let last_active_day = stats.last_active_at.with_timezone(&Local).date_naive();

        // Already recorded today.
        if today == last_active_day {
            return Ok(stats);
        }

        let gap = (today - last_active_day).num_days();

        if gap == 1 {
            // Consecutive day.
            stats.current_streak += 1;
        } else if gap > 1 {
            // Missed days; today restarts the streak.
            stats.current_streak = 1;
        } else if stats.current_streak == 0 {
            // Clock moved backwards on a profile that was never active.
            stats.current_streak = 1;
        }

        stats.longest_streak = stats.longest_streak.max(stats.current_streak);
        stats.last_active_at = now.with_timezone(&Utc);
        db.save_stats(&stats)?;

        // Per-day log creation is best-effort.
        if let Err(e) = db.get_or_create_log(today) {
            warn!(error = %e, "failed to create daily log");
        }

        let milestone = check_milestone(db, stats.current_streak);
        (stats, milestone)
    };

    if let Some(streak) = milestone {
        svc.emit(AppEvent::MilestoneReached { streak });
    }
    Ok(stats)
}

/// Record that one affirmation was viewed. The aggregate counter counts
/// every view; the per-day log keeps set semantics.
pub fn record_affirmation_viewed(
    svc: &Services,
    affirmation_id: Uuid,
    now: DateTime<Local>,
) -> Result<()> {
    let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
    let db = &state.database;

    let mut stats = db.get_or_create_stats()?;
    stats.total_viewed += 1;
    db.save_stats(&stats)?;

    db.add_viewed_id(now.date_naive(), affirmation_id)?;
    db.set_last_shown(affirmation_id, now.with_timezone(&Utc))?;
    Ok(())
}

/// Recompute the favorite category from the current favorite set.
pub fn update_favorite_category(svc: &Services) -> Result<Option<Category>> {
    let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
    refresh_favorite_category(&state.database)
}

/// Current stats snapshot, creating the singleton on first access.
pub fn get_stats(svc: &Services) -> Result<UserStats> {
    let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
    state.database.get_or_create_stats().map_err(Into::into)
}

/// Zero the current streak, keeping the longest-streak record.
pub fn reset_streak(svc: &Services) -> Result<UserStats> {
    let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
    let db = &state.database;

    let mut stats = db.get_or_create_stats()?;
    stats.current_streak = 0;
    db.save_stats(&stats)?;
    Ok(stats)
}

/// Shared by `update_favorite_category` and the favorite toggle: the
/// most common category among favorites wins, ties broken by category
/// declaration order. No favorites leaves the stored value unchanged.
pub(crate) fn refresh_favorite_category(db: &Database) -> Result<Option<Category>> {
    let favorites = db.list_favorite_affirmations()?;
    if favorites.is_empty() {
        return Ok(db.get_or_create_stats()?.favorite_category);
    }

    let mut top = None;
    let mut top_count = 0usize;
    for category in Category::ALL {
        let count = favorites.iter().filter(|a| a.category == category).count();
        if count > top_count {
            top = Some(category);
            top_count = count;
        }
    }

    let mut stats = db.get_or_create_stats()?;
    stats.favorite_category = top;
    db.save_stats(&stats)?;
    Ok(top)
}

/// A milestone fires once: the streak must be a milestone value above the
/// last one celebrated. The celebrated mark persists in settings.
fn check_milestone(db: &Database, streak: u32) -> Option<u32> {
    if !STREAK_MILESTONES.contains(&streak) {
        return None;
    }

    let mut settings = match db.get_settings() {
        Ok(settings) => settings,
        Err(e) => {
            warn!(error = %e, "failed to load settings for milestone check");
            return None;
        }
    };

    if streak <= settings.last_celebrated_streak {
        return None;
    }

    settings.last_celebrated_streak = streak;
    if let Err(e) = db.save_settings(&settings) {
        warn!(error = %e, "failed to persist milestone");
    }
    Some(streak)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::harness;
    use affirm_store::Affirmation;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, 0, 0).single().unwrap()
    }

    #[test]
    fn first_activity_starts_streak_at_one() {
        let h = harness();
        let stats = record_activity(&h.svc, at(2026, 3, 1, 10)).unwrap();
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 1);
    }

    #[test]
    fn consecutive_days_extend_streak() {
        let h = harness();
        for (day, expected) in [(1, 1), (2, 2), (3, 3), (4, 4)] {
            let stats = record_activity(&h.svc, at(2026, 3, day, 9)).unwrap();
            assert_eq!(stats.current_streak, expected);
            assert_eq!(stats.longest_streak, expected);
        }
    }

    #[test]
    fn second_call_same_day_is_noop() {
        let h = harness();
        let first = record_activity(&h.svc, at(2026, 3, 1, 9)).unwrap();
        let second = record_activity(&h.svc, at(2026, 3, 1, 22)).unwrap();

        assert_eq!(second.current_streak, first.current_streak);
        assert_eq!(second.longest_streak, first.longest_streak);
        assert_eq!(second.last_active_at, first.last_active_at);
    }

    #[test]
    fn gap_resets_streak_but_keeps_longest() {
        let h = harness();
        record_activity(&h.svc, at(2026, 3, 1, 9)).unwrap();
        record_activity(&h.svc, at(2026, 3, 2, 9)).unwrap();

        // Day 5: gap of 3 days.
        let stats = record_activity(&h.svc, at(2026, 3, 5, 9)).unwrap();
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 2);
    }

    #[test]
    fn activity_creates_daily_log() {
        let h = harness();
        let now = at(2026, 3, 1, 9);
        record_activity(&h.svc, now).unwrap();

        let state = h.svc.state.lock().unwrap();
        assert!(state
            .database
            .get_log(now.date_naive())
            .unwrap()
            .is_some());
    }

    #[test]
    fn viewed_counter_counts_every_view_but_log_dedupes() {
        let h = harness();
        let now = at(2026, 3, 1, 9);
        record_activity(&h.svc, now).unwrap();

        let id = {
            let state = h.svc.state.lock().unwrap();
            let a = Affirmation::new("I am enough", Category::SelfLove, false);
            state.database.create_affirmation(&a).unwrap();
            a.id
        };

        for _ in 0..3 {
            record_affirmation_viewed(&h.svc, id, now).unwrap();
        }

        let stats = get_stats(&h.svc).unwrap();
        assert_eq!(stats.total_viewed, 3);

        let state = h.svc.state.lock().unwrap();
        let log = state.database.get_log(now.date_naive()).unwrap().unwrap();
        assert_eq!(log.viewed_ids, vec![id]);
    }

    #[test]
    fn view_without_prior_activity_still_logs() {
        let h = harness();
        let now = at(2026, 3, 1, 9);
        let id = Uuid::new_v4();

        record_affirmation_viewed(&h.svc, id, now).unwrap();

        let state = h.svc.state.lock().unwrap();
        let log = state.database.get_log(now.date_naive()).unwrap().unwrap();
        assert_eq!(log.viewed_ids, vec![id]);
    }

    #[test]
    fn favorite_category_ties_break_by_declaration_order() {
        let h = harness();
        {
            let state = h.svc.state.lock().unwrap();
            let db = &state.database;
            for category in [Category::Evening, Category::Gratitude] {
                let mut a = Affirmation::new("x", category, false);
                a.is_favorite = true;
                db.create_affirmation(&a).unwrap();
            }
        }

        // One favorite each: Gratitude is declared before Evening.
        let top = update_favorite_category(&h.svc).unwrap();
        assert_eq!(top, Some(Category::Gratitude));
    }

    #[test]
    fn favorite_category_empty_set_leaves_value() {
        let h = harness();
        assert_eq!(update_favorite_category(&h.svc).unwrap(), None);
    }

    #[test]
    fn milestone_fires_once() {
        let h = harness();
        let mut events = h.svc.subscribe();

        // Walk 7 consecutive days.
        for day in 1..=7 {
            record_activity(&h.svc, at(2026, 3, day, 9)).unwrap();
        }

        match events.try_recv() {
            Ok(AppEvent::MilestoneReached { streak }) => assert_eq!(streak, 7),
            other => panic!("expected milestone event, got {other:?}"),
        }

        // Re-walking day 7 (same day) or resetting must not re-fire.
        record_activity(&h.svc, at(2026, 3, 7, 23)).unwrap();
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn reset_streak_keeps_longest() {
        let h = harness();
        record_activity(&h.svc, at(2026, 3, 1, 9)).unwrap();
        record_activity(&h.svc, at(2026, 3, 2, 9)).unwrap();

        let stats = reset_streak(&h.svc).unwrap();
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.longest_streak, 2);
    }
}
