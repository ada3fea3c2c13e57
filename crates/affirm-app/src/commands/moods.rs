//! Mood logging. Entries are append-only.

use uuid::Uuid;

use affirm_shared::Mood;
use affirm_store::MoodEntry;

use crate::error::{AppError, Result};
use crate::state::Services;

/// Log a mood, optionally tied to the affirmation on screen.
pub fn log_mood(svc: &Services, mood: Mood, affirmation_id: Option<Uuid>) -> Result<MoodEntry> {
    let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;

    let entry = MoodEntry::new(mood, affirmation_id);
    state.database.insert_mood_entry(&entry)?;
    Ok(entry)
}

/// The most recent mood entries, newest first.
pub fn recent_moods(svc: &Services, limit: u32) -> Result<Vec<MoodEntry>> {
    let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
    state.database.list_recent_moods(limit).map_err(Into::into)
}

/// How often each mood was logged, most frequent first.
pub fn mood_counts(svc: &Services) -> Result<Vec<(Mood, u64)>> {
    let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
    state.database.mood_counts().map_err(Into::into)
}
