//! v001 -- Initial schema creation.
//!
//! Creates the six core tables: `affirmations`, `daily_logs`, `user_stats`,
//! `journal_entries`, `mood_entries` and `app_settings`.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Affirmations (seeded + user-created)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS affirmations (
    id            TEXT PRIMARY KEY NOT NULL,   -- UUID v4
    text          TEXT NOT NULL,
    category      TEXT NOT NULL,               -- Category string tag
    is_favorite   INTEGER NOT NULL DEFAULT 0,  -- boolean 0/1
    is_custom     INTEGER NOT NULL DEFAULT 0,  -- boolean 0/1
    created_at    TEXT NOT NULL,               -- ISO-8601 / RFC-3339
    last_shown_at TEXT                         -- nullable RFC-3339
);

CREATE INDEX IF NOT EXISTS idx_affirmations_favorite ON affirmations(is_favorite);
CREATE INDEX IF NOT EXISTS idx_affirmations_custom   ON affirmations(is_custom);

-- ----------------------------------------------------------------
-- Daily activity logs (one row per calendar day)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS daily_logs (
    id             TEXT PRIMARY KEY NOT NULL,  -- UUID v4
    date           TEXT NOT NULL UNIQUE,       -- local calendar day, YYYY-MM-DD
    viewed_ids     TEXT NOT NULL DEFAULT '[]', -- JSON array of affirmation UUIDs
    favorite_added INTEGER NOT NULL DEFAULT 0  -- boolean 0/1
);

-- ----------------------------------------------------------------
-- User stats singleton
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS user_stats (
    id                INTEGER PRIMARY KEY CHECK (id = 1),
    current_streak    INTEGER NOT NULL DEFAULT 0,
    longest_streak    INTEGER NOT NULL DEFAULT 0,
    total_viewed      INTEGER NOT NULL DEFAULT 0,
    last_active_at    TEXT NOT NULL,           -- RFC-3339
    favorite_category TEXT                     -- nullable Category tag
);

-- ----------------------------------------------------------------
-- Journal entries
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS journal_entries (
    id             TEXT PRIMARY KEY NOT NULL,  -- UUID v4
    affirmation_id TEXT NOT NULL,              -- reference, not ownership
    text           TEXT NOT NULL,
    created_at     TEXT NOT NULL,
    updated_at     TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_journal_affirmation ON journal_entries(affirmation_id);

-- ----------------------------------------------------------------
-- Mood entries (append-only)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS mood_entries (
    id             TEXT PRIMARY KEY NOT NULL,  -- UUID v4
    mood           TEXT NOT NULL,              -- Mood string tag
    affirmation_id TEXT,                       -- nullable reference
    created_at     TEXT NOT NULL
);

-- ----------------------------------------------------------------
-- App settings singleton (JSON row)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS app_settings (
    id   INTEGER PRIMARY KEY CHECK (id = 1),
    json TEXT NOT NULL
);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
