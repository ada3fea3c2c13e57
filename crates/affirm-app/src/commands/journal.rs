//! Journaling on affirmations.
//!
//! One entry per affirmation is the app convention: `save_entry` upserts,
//! updating the existing entry's text instead of stacking new rows.

use chrono::Utc;
use uuid::Uuid;

use affirm_store::JournalEntry;

use crate::error::{AppError, Result};
use crate::state::Services;

/// Create or update the journal entry for an affirmation.
pub fn save_entry(svc: &Services, affirmation_id: Uuid, text: &str) -> Result<JournalEntry> {
    let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
    let db = &state.database;

    if let Some(mut existing) = db.get_journal_entry_for(affirmation_id)? {
        let now = Utc::now();
        db.update_journal_entry(existing.id, text, now)?;
        existing.text = text.to_string();
        existing.updated_at = now;
        return Ok(existing);
    }

    let entry = JournalEntry::new(affirmation_id, text);
    db.insert_journal_entry(&entry)?;
    Ok(entry)
}

/// The entry attached to an affirmation, if any.
pub fn entry_for(svc: &Services, affirmation_id: Uuid) -> Result<Option<JournalEntry>> {
    let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
    state
        .database
        .get_journal_entry_for(affirmation_id)
        .map_err(Into::into)
}

/// All journal entries, newest first.
pub fn list_entries(svc: &Services) -> Result<Vec<JournalEntry>> {
    let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
    state.database.list_journal_entries().map_err(Into::into)
}

/// Delete an entry. Returns whether a row existed.
pub fn delete_entry(svc: &Services, id: Uuid) -> Result<bool> {
    let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
    state.database.delete_journal_entry(id).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::harness;

    #[test]
    fn save_upserts_per_affirmation() {
        let h = harness();
        let affirmation_id = Uuid::new_v4();

        let first = save_entry(&h.svc, affirmation_id, "day one").unwrap();
        let second = save_entry(&h.svc, affirmation_id, "day two").unwrap();

        // Same entry, updated in place.
        assert_eq!(first.id, second.id);
        assert_eq!(second.text, "day two");
        assert!(second.updated_at >= first.updated_at);
        assert_eq!(list_entries(&h.svc).unwrap().len(), 1);
    }

    #[test]
    fn entries_are_per_affirmation() {
        let h = harness();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        save_entry(&h.svc, a, "about a").unwrap();
        save_entry(&h.svc, b, "about b").unwrap();

        assert_eq!(entry_for(&h.svc, a).unwrap().unwrap().text, "about a");
        assert_eq!(entry_for(&h.svc, b).unwrap().unwrap().text, "about b");
    }

    #[test]
    fn delete_round_trip() {
        let h = harness();
        let affirmation_id = Uuid::new_v4();
        let entry = save_entry(&h.svc, affirmation_id, "temp").unwrap();

        assert!(delete_entry(&h.svc, entry.id).unwrap());
        assert!(entry_for(&h.svc, affirmation_id).unwrap().is_none());
        assert!(!delete_entry(&h.svc, entry.id).unwrap());
    }
}
