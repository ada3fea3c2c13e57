//! # affirm-app
//!
//! Application layer of Affirm: every user-facing operation (browsing and
//! favoriting affirmations, streak tracking, journaling, mood logging,
//! premium purchase and sync, reminders) implemented as command functions
//! over a shared [`state::AppState`].
//!
//! Platform services stay behind trait seams: the remote blob store
//! ([`affirm_sync::KvStore`]), the purchase ledger
//! ([`ledger::PurchaseLedger`]) and the notification scheduler
//! ([`scheduler::NotificationScheduler`]). A host shell (desktop or
//! mobile) wires concrete implementations into [`state::Services`] once
//! at process start and hands that handle to its UI.

pub mod commands;
pub mod events;
pub mod ledger;
pub mod scheduler;
pub mod state;

mod error;

pub use error::AppError;
pub use events::AppEvent;
pub use state::{AppState, Services, SharedState};

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber. Call once at process start.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("affirm_app=debug,affirm_sync=debug,affirm_store=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
