//! # affirm-store
//!
//! Local durable storage for the Affirm application, backed by SQLite.
//!
//! The crate exposes a synchronous [`Database`] handle that wraps a
//! `rusqlite::Connection` and provides typed CRUD helpers for every domain
//! model: affirmations, per-day activity logs, the user-stats singleton,
//! journal entries, mood entries and the app-settings row. The seed
//! catalog of built-in affirmations also lives here.

pub mod affirmations;
pub mod daily_logs;
pub mod database;
pub mod journal;
pub mod migrations;
pub mod models;
pub mod moods;
pub mod seed;
pub mod settings;
pub mod stats;

mod error;

pub use database::Database;
pub use error::StoreError;
pub use models::*;
pub use settings::AppSettings;
