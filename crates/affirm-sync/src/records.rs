//! Wire records stored in the remote blob.
//!
//! The field subset and camelCase key names are part of the blob format
//! shared across devices; `created_at` travels as unix seconds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use affirm_shared::Category;
use affirm_store::Affirmation;

/// Flat representation of a custom affirmation in the
/// `customAffirmations` blob.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SyncedAffirmation {
    pub id: Uuid,
    pub text: String,
    pub category: Category,
    pub is_custom: bool,
    pub is_favorite: bool,
    /// Unix seconds.
    pub created_at: i64,
}

impl SyncedAffirmation {
    /// Rebuild a local record from the wire form, e.g. when a pull finds
    /// a custom affirmation this device has never seen.
    pub fn to_affirmation(&self) -> Affirmation {
        Affirmation {
            id: self.id,
            text: self.text.clone(),
            category: self.category,
            is_favorite: self.is_favorite,
            is_custom: self.is_custom,
            created_at: DateTime::from_timestamp(self.created_at, 0).unwrap_or_else(Utc::now),
            last_shown_at: None,
        }
    }
}

impl From<&Affirmation> for SyncedAffirmation {
    fn from(a: &Affirmation) -> Self {
        Self {
            id: a.id,
            text: a.text.clone(),
            category: a.category,
            is_custom: a.is_custom,
            is_favorite: a.is_favorite,
            created_at: a.created_at.timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_keys_are_camel_case() {
        let record = SyncedAffirmation {
            id: Uuid::new_v4(),
            text: "I trust my journey".into(),
            category: Category::SelfLove,
            is_custom: true,
            is_favorite: false,
            created_at: 1_700_000_000,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("isCustom").is_some());
        assert!(value.get("isFavorite").is_some());
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["category"], "Self-Love");
    }

    #[test]
    fn round_trips_through_affirmation() {
        let affirmation = Affirmation::new("I am calm", Category::Evening, true);
        let record = SyncedAffirmation::from(&affirmation);
        let back = record.to_affirmation();

        assert_eq!(back.id, affirmation.id);
        assert_eq!(back.text, affirmation.text);
        assert_eq!(back.category, affirmation.category);
        assert_eq!(back.is_custom, affirmation.is_custom);
        // Sub-second precision is lost on the wire.
        assert_eq!(back.created_at.timestamp(), affirmation.created_at.timestamp());
    }
}
