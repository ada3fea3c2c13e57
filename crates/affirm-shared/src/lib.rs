//! # affirm-shared
//!
//! Domain vocabulary shared by every Affirm crate: the fixed affirmation
//! categories, the mood scale, app-wide constants (product identifiers,
//! sync keys, limits) and the errors produced when parsing persisted tags.

pub mod constants;
pub mod error;
pub mod types;

pub use error::TagError;
pub use types::{Category, Mood};
