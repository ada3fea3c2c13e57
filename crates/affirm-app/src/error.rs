use thiserror::Error;

use crate::ledger::LedgerError;
use crate::scheduler::SchedulerError;

/// Errors surfaced by the command layer.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] affirm_store::StoreError),

    #[error("Sync error: {0}")]
    Sync(#[from] affirm_sync::SyncError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    /// Free users can hold a limited number of favorites; the caller
    /// should route this to the paywall.
    #[error("Favorite limit reached")]
    FavoriteLimitReached,

    /// The user declined notification permission; the caller should
    /// point at system settings, once.
    #[error("Notification permission denied")]
    NotificationsDenied,

    /// Only user-authored affirmations can be edited or deleted.
    #[error("Affirmation is not custom")]
    NotCustom,

    /// Purchase failed for a reason other than the user cancelling.
    #[error("Purchase failed: {0}")]
    PurchaseFailed(String),

    #[error("State lock poisoned")]
    LockPoisoned,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;
