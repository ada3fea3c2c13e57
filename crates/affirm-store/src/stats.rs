//! Persistence for the [`UserStats`] singleton.

use chrono::{DateTime, Utc};
use rusqlite::params;

use affirm_shared::Category;

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::models::UserStats;

impl Database {
    /// Fetch the stats singleton, creating a default row on first access.
    pub fn get_or_create_stats(&self) -> Result<UserStats> {
        if let Some(stats) = self.get_stats()? {
            return Ok(stats);
        }

        let fresh = UserStats::default();
        self.conn().execute(
            "INSERT OR IGNORE INTO user_stats
                 (id, current_streak, longest_streak, total_viewed, last_active_at, favorite_category)
             VALUES (1, ?1, ?2, ?3, ?4, ?5)",
            params![
                fresh.current_streak,
                fresh.longest_streak,
                fresh.total_viewed as i64,
                fresh.last_active_at.to_rfc3339(),
                Option::<String>::None,
            ],
        )?;
        Ok(fresh)
    }

    /// Overwrite the stats singleton.
    pub fn save_stats(&self, stats: &UserStats) -> Result<()> {
        // Row is created lazily; make sure it exists before updating.
        self.get_or_create_stats()?;

        self.conn().execute(
            "UPDATE user_stats
             SET current_streak = ?1,
                 longest_streak = ?2,
                 total_viewed = ?3,
                 last_active_at = ?4,
                 favorite_category = ?5
             WHERE id = 1",
            params![
                stats.current_streak,
                stats.longest_streak,
                stats.total_viewed as i64,
                stats.last_active_at.to_rfc3339(),
                stats.favorite_category.map(|c| c.tag()),
            ],
        )?;
        Ok(())
    }

    fn get_stats(&self) -> Result<Option<UserStats>> {
        let result = self.conn().query_row(
            "SELECT current_streak, longest_streak, total_viewed, last_active_at, favorite_category
             FROM user_stats
             WHERE id = 1",
            [],
            row_to_stats,
        );

        match result {
            Ok(stats) => Ok(Some(stats)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(other) => Err(StoreError::Sqlite(other)),
        }
    }
}

fn row_to_stats(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserStats> {
    let current_streak: u32 = row.get(0)?;
    let longest_streak: u32 = row.get(1)?;
    let total_viewed: i64 = row.get(2)?;
    let last_active_str: String = row.get(3)?;
    let category_tag: Option<String> = row.get(4)?;

    let last_active_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&last_active_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?;

    let favorite_category = category_tag
        .map(|tag| {
            Category::from_tag(&tag).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    4,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })
        })
        .transpose()?;

    Ok(UserStats {
        current_streak,
        longest_streak,
        total_viewed: total_viewed as u64,
        last_active_at,
        favorite_category,
    })
}
