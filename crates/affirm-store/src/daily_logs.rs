//! CRUD operations for [`DailyLog`] records.
//!
//! The `date` column carries a UNIQUE constraint, so there is at most one
//! row per local calendar day; `get_or_create_log` relies on
//! `INSERT OR IGNORE` for the lazy-create path.

use chrono::NaiveDate;
use rusqlite::params;
use uuid::Uuid;

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::models::DailyLog;

const DATE_FMT: &str = "%Y-%m-%d";

impl Database {
    /// Fetch the log for a given day, or `None` if no activity was
    /// recorded on that day.
    pub fn get_log(&self, date: NaiveDate) -> Result<Option<DailyLog>> {
        let result = self.conn().query_row(
            "SELECT id, date, viewed_ids, favorite_added
             FROM daily_logs
             WHERE date = ?1",
            params![date.format(DATE_FMT).to_string()],
            row_to_log,
        );

        match result {
            Ok(log) => Ok(Some(log)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(other) => Err(StoreError::Sqlite(other)),
        }
    }

    /// Fetch the log for a given day, creating an empty one if missing.
    pub fn get_or_create_log(&self, date: NaiveDate) -> Result<DailyLog> {
        let fresh = DailyLog::new(date);
        self.conn().execute(
            "INSERT OR IGNORE INTO daily_logs (id, date, viewed_ids, favorite_added)
             VALUES (?1, ?2, '[]', 0)",
            params![fresh.id.to_string(), date.format(DATE_FMT).to_string()],
        )?;

        self.get_log(date)?.ok_or(StoreError::NotFound)
    }

    /// Add an affirmation id to a day's viewed set. Set semantics: adding
    /// an id already present is a no-op. Returns `true` if the set grew.
    pub fn add_viewed_id(&self, date: NaiveDate, affirmation_id: Uuid) -> Result<bool> {
        let mut log = self.get_or_create_log(date)?;
        if log.viewed_ids.contains(&affirmation_id) {
            return Ok(false);
        }
        log.viewed_ids.push(affirmation_id);

        let json = serde_json::to_string(&log.viewed_ids)?;
        self.conn().execute(
            "UPDATE daily_logs SET viewed_ids = ?1 WHERE date = ?2",
            params![json, date.format(DATE_FMT).to_string()],
        )?;
        Ok(true)
    }

    /// Mark that a favorite was added on the given day.
    pub fn set_favorite_added(&self, date: NaiveDate) -> Result<()> {
        let log = self.get_or_create_log(date)?;
        if !log.favorite_added {
            self.conn().execute(
                "UPDATE daily_logs SET favorite_added = 1 WHERE date = ?1",
                params![date.format(DATE_FMT).to_string()],
            )?;
        }
        Ok(())
    }

    /// List the most recent logs, newest first.
    pub fn list_recent_logs(&self, limit: u32) -> Result<Vec<DailyLog>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, date, viewed_ids, favorite_added
             FROM daily_logs
             ORDER BY date DESC
             LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit], row_to_log)?;

        let mut logs = Vec::new();
        for row in rows {
            logs.push(row?);
        }
        Ok(logs)
    }
}

/// Map a `rusqlite::Row` to a [`DailyLog`].
fn row_to_log(row: &rusqlite::Row<'_>) -> rusqlite::Result<DailyLog> {
    let id_str: String = row.get(0)?;
    let date_str: String = row.get(1)?;
    let viewed_json: String = row.get(2)?;
    let favorite_added: bool = row.get(3)?;

    let id = Uuid::parse_str(&id_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let date = NaiveDate::parse_from_str(&date_str, DATE_FMT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let viewed_ids: Vec<Uuid> = serde_json::from_str(&viewed_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(DailyLog {
        id,
        date,
        viewed_ids,
        favorite_added,
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

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn get_or_create_is_lazy_and_unique() {
        let (db, _dir) = test_db();
        let today = day(2026, 3, 14);

        assert!(db.get_log(today).unwrap().is_none());

        let first = db.get_or_create_log(today).unwrap();
        let second = db.get_or_create_log(today).unwrap();
        assert_eq!(first.id, second.id);
    }

    #[test]
    fn viewed_set_suppresses_duplicates() {
        let (db, _dir) = test_db();
        let today = day(2026, 3, 14);
        let id = Uuid::new_v4();

        assert!(db.add_viewed_id(today, id).unwrap());
        assert!(!db.add_viewed_id(today, id).unwrap());
        assert!(!db.add_viewed_id(today, id).unwrap());

        let log = db.get_log(today).unwrap().unwrap();
        assert_eq!(log.viewed_ids, vec![id]);
    }

    #[test]
    fn favorite_added_flag() {
        let (db, _dir) = test_db();
        let today = day(2026, 3, 15);

        db.set_favorite_added(today).unwrap();
        assert!(db.get_log(today).unwrap().unwrap().favorite_added);
    }

    #[test]
    fn recent_logs_newest_first() {
        let (db, _dir) = test_db();
        db.get_or_create_log(day(2026, 3, 10)).unwrap();
        db.get_or_create_log(day(2026, 3, 12)).unwrap();
        db.get_or_create_log(day(2026, 3, 11)).unwrap();

        let logs = db.list_recent_logs(2).unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].date, day(2026, 3, 12));
        assert_eq!(logs[1].date, day(2026, 3, 11));
    }
}
