//! Persistence for [`MoodEntry`] records. Append-only: no update or
//! delete surface.

use chrono::{DateTime, Utc};
use rusqlite::params;
use uuid::Uuid;

use affirm_shared::Mood;

use crate::database::Database;
use crate::error::Result;
use crate::models::MoodEntry;

impl Database {
    pub fn insert_mood_entry(&self, entry: &MoodEntry) -> Result<()> {
        self.conn().execute(
            "INSERT INTO mood_entries (id, mood, affirmation_id, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.id.to_string(),
                entry.mood.tag(),
                entry.affirmation_id.map(|id| id.to_string()),
                entry.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// List the most recent mood entries, newest first.
    pub fn list_recent_moods(&self, limit: u32) -> Result<Vec<MoodEntry>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, mood, affirmation_id, created_at
             FROM mood_entries
             ORDER BY created_at DESC
             LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit], row_to_mood)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    /// How often each mood was logged, most frequent first.
    pub fn mood_counts(&self) -> Result<Vec<(Mood, u64)>> {
        let mut stmt = self.conn().prepare(
            "SELECT mood, COUNT(*) AS n
             FROM mood_entries
             GROUP BY mood
             ORDER BY n DESC, mood ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let tag: String = row.get(0)?;
            let count: i64 = row.get(1)?;
            Ok((tag, count))
        })?;

        let mut counts = Vec::new();
        for row in rows {
            let (tag, count) = row?;
            counts.push((Mood::from_tag(&tag)?, count as u64));
        }
        Ok(counts)
    }
}

fn row_to_mood(row: &rusqlite::Row<'_>) -> rusqlite::Result<MoodEntry> {
    let id_str: String = row.get(0)?;
    let mood_tag: String = row.get(1)?;
    let affirmation_str: Option<String> = row.get(2)?;
    let created_str: String = row.get(3)?;

    let id = Uuid::parse_str(&id_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let mood = Mood::from_tag(&mood_tag).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let affirmation_id = affirmation_str
        .map(|s| Uuid::parse_str(&s))
        .transpose()
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
        })?;

    let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(MoodEntry {
        id,
        mood,
        affirmation_id,
        created_at,
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
    fn append_and_list() {
        let (db, _dir) = test_db();
        db.insert_mood_entry(&MoodEntry::new(Mood::Calm, None))
            .unwrap();
        db.insert_mood_entry(&MoodEntry::new(Mood::Happy, Some(Uuid::new_v4())))
            .unwrap();

        let moods = db.list_recent_moods(10).unwrap();
        assert_eq!(moods.len(), 2);
    }

    #[test]
    fn counts_group_by_mood() {
        let (db, _dir) = test_db();
        for _ in 0..3 {
            db.insert_mood_entry(&MoodEntry::new(Mood::Grateful, None))
                .unwrap();
        }
        db.insert_mood_entry(&MoodEntry::new(Mood::Sad, None))
            .unwrap();

        let counts = db.mood_counts().unwrap();
        assert_eq!(counts[0], (Mood::Grateful, 3));
        assert_eq!(counts[1], (Mood::Sad, 1));
    }
}
