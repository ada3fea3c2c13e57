//! CRUD operations for [`JournalEntry`] records.
//!
//! Storage allows multiple entries per affirmation; the one-entry-per-
//! affirmation convention is enforced by the app layer's upsert.

use chrono::{DateTime, Utc};
use rusqlite::params;
use uuid::Uuid;

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::models::JournalEntry;

impl Database {
    pub fn insert_journal_entry(&self, entry: &JournalEntry) -> Result<()> {
        self.conn().execute(
            "INSERT INTO journal_entries (id, affirmation_id, text, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.id.to_string(),
                entry.affirmation_id.to_string(),
                entry.text,
                entry.created_at.to_rfc3339(),
                entry.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Replace an entry's text and bump `updated_at`. Returns `true` if a
    /// row was updated.
    pub fn update_journal_entry(
        &self,
        id: Uuid,
        text: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        let affected = self.conn().execute(
            "UPDATE journal_entries SET text = ?1, updated_at = ?2 WHERE id = ?3",
            params![text, updated_at.to_rfc3339(), id.to_string()],
        )?;
        Ok(affected > 0)
    }

    /// The most recent entry attached to an affirmation, if any.
    pub fn get_journal_entry_for(&self, affirmation_id: Uuid) -> Result<Option<JournalEntry>> {
        let result = self.conn().query_row(
            "SELECT id, affirmation_id, text, created_at, updated_at
             FROM journal_entries
             WHERE affirmation_id = ?1
             ORDER BY updated_at DESC
             LIMIT 1",
            params![affirmation_id.to_string()],
            row_to_entry,
        );

        match result {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(other) => Err(StoreError::Sqlite(other)),
        }
    }

    /// List all journal entries, newest first.
    pub fn list_journal_entries(&self) -> Result<Vec<JournalEntry>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, affirmation_id, text, created_at, updated_at
             FROM journal_entries
             ORDER BY created_at DESC",
        )?;

        let rows = stmt.query_map([], row_to_entry)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    /// Delete a journal entry by UUID. Returns `true` if a row was deleted.
    pub fn delete_journal_entry(&self, id: Uuid) -> Result<bool> {
        let affected = self.conn().execute(
            "DELETE FROM journal_entries WHERE id = ?1",
            params![id.to_string()],
        )?;
        Ok(affected > 0)
    }
}

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<JournalEntry> {
    let id_str: String = row.get(0)?;
    let affirmation_str: String = row.get(1)?;
    let text: String = row.get(2)?;
    let created_str: String = row.get(3)?;
    let updated_str: String = row.get(4)?;

    let id = Uuid::parse_str(&id_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let affirmation_id = Uuid::parse_str(&affirmation_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?;
    let updated_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&updated_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(JournalEntry {
        id,
        affirmation_id,
        text,
        created_at,
        updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> (Database, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("test.db")).unwrap();
        (db, dir)
    }

    #[test]
    fn insert_get_update_delete() {
        let (db, _dir) = test_db();
        let affirmation_id = Uuid::new_v4();
        let entry = JournalEntry::new(affirmation_id, "first thoughts");
        db.insert_journal_entry(&entry).unwrap();

        let loaded = db.get_journal_entry_for(affirmation_id).unwrap().unwrap();
        assert_eq!(loaded.text, "first thoughts");

        let later = Utc::now();
        assert!(db
            .update_journal_entry(entry.id, "second thoughts", later)
            .unwrap());
        let loaded = db.get_journal_entry_for(affirmation_id).unwrap().unwrap();
        assert_eq!(loaded.text, "second thoughts");

        assert!(db.delete_journal_entry(entry.id).unwrap());
        assert!(db.get_journal_entry_for(affirmation_id).unwrap().is_none());
    }

    #[test]
    fn list_newest_first() {
        let (db, _dir) = test_db();
        let mut older = JournalEntry::new(Uuid::new_v4(), "older");
        older.created_at = older.created_at - chrono::Duration::hours(1);
        let newer = JournalEntry::new(Uuid::new_v4(), "newer");
        db.insert_journal_entry(&older).unwrap();
        db.insert_journal_entry(&newer).unwrap();

        let entries = db.list_journal_entries().unwrap();
        assert_eq!(entries[0].text, "newer");
        assert_eq!(entries[1].text, "older");
    }
}
