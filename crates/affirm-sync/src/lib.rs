//! # affirm-sync
//!
//! Cross-device propagation of favorites and custom affirmations through
//! a small, eventually-consistent remote key-value blob store.
//!
//! The remote surface is the [`KvStore`] trait with exactly two logical
//! keys: `favorites` (an array of affirmation-id strings) and
//! `customAffirmations` (an array of flat records). Writes are
//! whole-value replaces; the last writer for a key wins entirely. The
//! [`SyncEngine`] bounds every remote call with a soft timeout and treats
//! failures as "no effect until the next attempt" -- the local store
//! stays the source of truth.

pub mod engine;
pub mod kv;
pub mod records;

mod error;

pub use engine::{apply_remote, ApplySummary, RemoteState, SyncEngine};
pub use error::SyncError;
pub use kv::{FileKvStore, KvStore, MemoryKvStore};
pub use records::SyncedAffirmation;
