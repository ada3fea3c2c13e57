use serde::{Deserialize, Serialize};

use crate::error::TagError;

/// Affirmation category. Persisted (and synced) as its string tag, so the
/// tags are part of the on-disk and on-wire format and must stay stable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "Self-Love")]
    SelfLove,
    #[serde(rename = "Confidence")]
    Confidence,
    #[serde(rename = "Gratitude")]
    Gratitude,
    #[serde(rename = "Success")]
    Success,
    #[serde(rename = "Health")]
    Health,
    #[serde(rename = "Relationships")]
    Relationships,
    #[serde(rename = "Morning")]
    Morning,
    #[serde(rename = "Evening")]
    Evening,
}

impl Category {
    /// Declaration order. Also the deterministic tie-break order for the
    /// favorite-category aggregation.
    pub const ALL: [Category; 8] = [
        Category::SelfLove,
        Category::Confidence,
        Category::Gratitude,
        Category::Success,
        Category::Health,
        Category::Relationships,
        Category::Morning,
        Category::Evening,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Category::SelfLove => "Self-Love",
            Category::Confidence => "Confidence",
            Category::Gratitude => "Gratitude",
            Category::Success => "Success",
            Category::Health => "Health",
            Category::Relationships => "Relationships",
            Category::Morning => "Morning",
            Category::Evening => "Evening",
        }
    }

    pub fn from_tag(tag: &str) -> Result<Self, TagError> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.tag() == tag)
            .ok_or_else(|| TagError::UnknownCategory(tag.to_string()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl std::str::FromStr for Category {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_tag(s)
    }
}

/// Mood logged alongside an affirmation. Append-only in the store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Mood {
    #[serde(rename = "Happy")]
    Happy,
    #[serde(rename = "Calm")]
    Calm,
    #[serde(rename = "Grateful")]
    Grateful,
    #[serde(rename = "Motivated")]
    Motivated,
    #[serde(rename = "Neutral")]
    Neutral,
    #[serde(rename = "Anxious")]
    Anxious,
    #[serde(rename = "Sad")]
    Sad,
}

impl Mood {
    pub const ALL: [Mood; 7] = [
        Mood::Happy,
        Mood::Calm,
        Mood::Grateful,
        Mood::Motivated,
        Mood::Neutral,
        Mood::Anxious,
        Mood::Sad,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Calm => "Calm",
            Mood::Grateful => "Grateful",
            Mood::Motivated => "Motivated",
            Mood::Neutral => "Neutral",
            Mood::Anxious => "Anxious",
            Mood::Sad => "Sad",
        }
    }

    pub fn from_tag(tag: &str) -> Result<Self, TagError> {
        Mood::ALL
            .iter()
            .copied()
            .find(|m| m.tag() == tag)
            .ok_or_else(|| TagError::UnknownMood(tag.to_string()))
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}
