use thiserror::Error;

/// Errors produced when parsing persisted or synced string tags back into
/// their enums.
#[derive(Error, Debug)]
pub enum TagError {
    #[error("Unknown category tag: {0}")]
    UnknownCategory(String),

    #[error("Unknown mood tag: {0}")]
    UnknownMood(String),
}
