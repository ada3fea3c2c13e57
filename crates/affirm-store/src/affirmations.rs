//! CRUD operations for [`Affirmation`] records.

use chrono::{DateTime, Utc};
use rusqlite::params;
use uuid::Uuid;

use affirm_shared::Category;

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::models::Affirmation;

impl Database {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Insert a new affirmation.
    pub fn create_affirmation(&self, affirmation: &Affirmation) -> Result<()> {
        self.conn().execute(
            "INSERT INTO affirmations (id, text, category, is_favorite, is_custom, created_at, last_shown_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                affirmation.id.to_string(),
                affirmation.text,
                affirmation.category.tag(),
                affirmation.is_favorite,
                affirmation.is_custom,
                affirmation.created_at.to_rfc3339(),
                affirmation.last_shown_at.map(|t| t.to_rfc3339()),
            ],
        )?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Fetch a single affirmation by UUID.
    pub fn get_affirmation(&self, id: Uuid) -> Result<Affirmation> {
        self.conn()
            .query_row(
                "SELECT id, text, category, is_favorite, is_custom, created_at, last_shown_at
                 FROM affirmations
                 WHERE id = ?1",
                params![id.to_string()],
                row_to_affirmation,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
                other => StoreError::Sqlite(other),
            })
    }

    /// List all affirmations, oldest first (seed order, then creation order).
    pub fn list_affirmations(&self) -> Result<Vec<Affirmation>> {
        self.query_affirmations(
            "SELECT id, text, category, is_favorite, is_custom, created_at, last_shown_at
             FROM affirmations
             ORDER BY created_at ASC, id ASC",
        )
    }

    /// List currently favorited affirmations, newest first.
    pub fn list_favorite_affirmations(&self) -> Result<Vec<Affirmation>> {
        self.query_affirmations(
            "SELECT id, text, category, is_favorite, is_custom, created_at, last_shown_at
             FROM affirmations
             WHERE is_favorite = 1
             ORDER BY created_at DESC",
        )
    }

    /// List user-authored affirmations, newest first.
    pub fn list_custom_affirmations(&self) -> Result<Vec<Affirmation>> {
        self.query_affirmations(
            "SELECT id, text, category, is_favorite, is_custom, created_at, last_shown_at
             FROM affirmations
             WHERE is_custom = 1
             ORDER BY created_at DESC",
        )
    }

    pub fn count_affirmations(&self) -> Result<u64> {
        let count: i64 =
            self.conn()
                .query_row("SELECT COUNT(*) FROM affirmations", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    pub fn count_favorites(&self) -> Result<u64> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM affirmations WHERE is_favorite = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Set the favorite flag on one affirmation. Returns `true` if a row
    /// was updated.
    pub fn set_favorite(&self, id: Uuid, is_favorite: bool) -> Result<bool> {
        let affected = self.conn().execute(
            "UPDATE affirmations SET is_favorite = ?1 WHERE id = ?2",
            params![is_favorite, id.to_string()],
        )?;
        Ok(affected > 0)
    }

    /// Overwrite every favorite flag from the given id set: rows in the
    /// set become favorited, all others are cleared. Used when applying a
    /// remote favorites pull.
    pub fn overwrite_favorites(&self, favorite_ids: &[Uuid]) -> Result<()> {
        self.conn()
            .execute("UPDATE affirmations SET is_favorite = 0", [])?;
        for id in favorite_ids {
            self.conn().execute(
                "UPDATE affirmations SET is_favorite = 1 WHERE id = ?1",
                params![id.to_string()],
            )?;
        }
        Ok(())
    }

    /// Clear every favorite flag.
    pub fn clear_all_favorites(&self) -> Result<()> {
        self.conn()
            .execute("UPDATE affirmations SET is_favorite = 0", [])?;
        Ok(())
    }

    /// Overwrite the text and category of an existing affirmation,
    /// leaving all other fields untouched. Returns `true` if a row was
    /// updated.
    pub fn update_affirmation_content(
        &self,
        id: Uuid,
        text: &str,
        category: Category,
    ) -> Result<bool> {
        let affected = self.conn().execute(
            "UPDATE affirmations SET text = ?1, category = ?2 WHERE id = ?3",
            params![text, category.tag(), id.to_string()],
        )?;
        Ok(affected > 0)
    }

    /// Stamp the last time this affirmation was shown.
    pub fn set_last_shown(&self, id: Uuid, when: DateTime<Utc>) -> Result<()> {
        self.conn().execute(
            "UPDATE affirmations SET last_shown_at = ?1 WHERE id = ?2",
            params![when.to_rfc3339(), id.to_string()],
        )?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Delete an affirmation by UUID.  Returns `true` if a row was deleted.
    pub fn delete_affirmation(&self, id: Uuid) -> Result<bool> {
        let affected = self.conn().execute(
            "DELETE FROM affirmations WHERE id = ?1",
            params![id.to_string()],
        )?;
        Ok(affected > 0)
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn query_affirmations(&self, sql: &str) -> Result<Vec<Affirmation>> {
        let mut stmt = self.conn().prepare(sql)?;
        let rows = stmt.query_map([], row_to_affirmation)?;

        let mut affirmations = Vec::new();
        for row in rows {
            affirmations.push(row?);
        }
        Ok(affirmations)
    }
}

/// Map a `rusqlite::Row` to an [`Affirmation`].
fn row_to_affirmation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Affirmation> {
    let id_str: String = row.get(0)?;
    let text: String = row.get(1)?;
    let category_tag: String = row.get(2)?;
    let is_favorite: bool = row.get(3)?;
    let is_custom: bool = row.get(4)?;
    let created_str: String = row.get(5)?;
    let last_shown_str: Option<String> = row.get(6)?;

    let id = Uuid::parse_str(&id_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let category = Category::from_tag(&category_tag).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?;

    let last_shown_at = last_shown_str
        .map(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        6,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })
        })
        .transpose()?;

    Ok(Affirmation {
        id,
        text,
        category,
        is_favorite,
        is_custom,
        created_at,
        last_shown_at,
    })
}
