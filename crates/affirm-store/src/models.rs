//! Domain model structs persisted in the local SQLite database.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be handed
//! directly to a UI layer.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use affirm_shared::{Category, Mood};

// ---------------------------------------------------------------------------
// Affirmation
// ---------------------------------------------------------------------------

/// A single affirmation card. Seeded entries have `is_custom == false` and
/// are created once at first launch; user-authored ones are custom.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Affirmation {
    /// Unique identifier, stable across devices when synced.
    pub id: Uuid,
    /// The affirmation text shown on the card.
    pub text: String,
    /// One of the eight fixed categories.
    pub category: Category,
    /// Whether the user has favorited this affirmation.
    pub is_favorite: bool,
    /// Whether this affirmation was authored by the user.
    pub is_custom: bool,
    /// When the record was created locally.
    pub created_at: DateTime<Utc>,
    /// Last time the card was shown, if ever.
    pub last_shown_at: Option<DateTime<Utc>>,
}

impl Affirmation {
    /// Build a fresh affirmation with a new id, unfavorited.
    pub fn new(text: impl Into<String>, category: Category, is_custom: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            category,
            is_favorite: false,
            is_custom,
            created_at: Utc::now(),
            last_shown_at: None,
        }
    }
}

// ---------------------------------------------------------------------------
// DailyLog
// ---------------------------------------------------------------------------

/// Per-day activity record. One logical row per local calendar day,
/// created lazily the first time activity is recorded on a new day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyLog {
    /// Unique identifier.
    pub id: Uuid,
    /// The local calendar day this log covers.
    pub date: NaiveDate,
    /// Ids of affirmations viewed on this day. Set semantics: duplicates
    /// are suppressed, insertion order is irrelevant.
    pub viewed_ids: Vec<Uuid>,
    /// Whether a favorite was added on this day.
    pub favorite_added: bool,
}

impl DailyLog {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            viewed_ids: Vec::new(),
            favorite_added: false,
        }
    }
}

// ---------------------------------------------------------------------------
// UserStats
// ---------------------------------------------------------------------------

/// Aggregate user statistics. Exactly one row exists; created on first
/// access. Invariant: `longest_streak >= current_streak` after any update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserStats {
    /// Consecutive active days ending at `last_active_at`'s day.
    pub current_streak: u32,
    /// Best streak ever reached.
    pub longest_streak: u32,
    /// Total affirmation views. Not deduplicated per day.
    pub total_viewed: u64,
    /// Timestamp of the most recent recorded activity.
    pub last_active_at: DateTime<Utc>,
    /// Most common category among current favorites, if any were counted.
    pub favorite_category: Option<Category>,
}

impl Default for UserStats {
    /// Fresh stats. `last_active_at` starts at the Unix epoch so the very
    /// first `record_activity` sees a large day gap and starts the streak
    /// at 1 instead of treating creation day as already-recorded.
    fn default() -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            total_viewed: 0,
            last_active_at: DateTime::UNIX_EPOCH,
            favorite_category: None,
        }
    }
}

// ---------------------------------------------------------------------------
// JournalEntry
// ---------------------------------------------------------------------------

/// A journal note attached to an affirmation (reference, not ownership).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JournalEntry {
    pub id: Uuid,
    pub affirmation_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JournalEntry {
    pub fn new(affirmation_id: Uuid, text: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            affirmation_id,
            text: text.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

// ---------------------------------------------------------------------------
// MoodEntry
// ---------------------------------------------------------------------------

/// A logged mood, optionally tied to the affirmation on screen at the
/// time. Append-only: never updated or deleted by app logic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoodEntry {
    pub id: Uuid,
    pub mood: Mood,
    pub affirmation_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl MoodEntry {
    pub fn new(mood: Mood, affirmation_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            mood,
            affirmation_id,
            created_at: Utc::now(),
        }
    }
}
