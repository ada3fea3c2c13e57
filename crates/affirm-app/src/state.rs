//! Application state shared across all commands.
//!
//! [`AppState`] is wrapped in `Arc<Mutex<>>` so that every mutation of the
//! record store goes through a single writer. Command functions that call
//! out to remote services gather what they need under the lock, drop the
//! guard across the `.await`, and re-lock to apply results -- the mutex is
//! never held across an await point.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use uuid::Uuid;

use affirm_store::Database;
use affirm_sync::{KvStore, SyncEngine};

use crate::events::AppEvent;
use crate::ledger::PurchaseLedger;
use crate::scheduler::NotificationScheduler;

/// Capacity of the app event broadcast channel.
const EVENT_CAPACITY: usize = 32;

/// Central application state.
///
/// Holds the database handle and runtime flags such as the premium
/// subscription status.
pub struct AppState {
    /// Handle to the local SQLite database.
    pub database: Database,

    /// Whether the user currently holds an active subscription. Updated
    /// by entitlement refreshes; eventually consistent with the ledger.
    pub is_premium: bool,

    /// Product identifiers of all active entitlement grants.
    pub owned_products: HashSet<String>,

    /// Affirmation to open when the UI resumes after a notification tap.
    pub pending_affirmation: Option<Uuid>,
}

impl AppState {
    /// Create application state around an open database. Premium starts
    /// false until the first entitlement refresh completes.
    pub fn new(database: Database) -> Self {
        Self {
            database,
            is_premium: false,
            owned_products: HashSet::new(),
            pending_affirmation: None,
        }
    }
}

/// Alias for the shared, single-writer state handle.
pub type SharedState = Arc<Mutex<AppState>>;

/// The dependency-injected service bundle, constructed once at process
/// start and passed by handle to every consumer. No global singletons.
#[derive(Clone)]
pub struct Services {
    /// Shared application state (single-writer).
    pub state: SharedState,

    /// Push/pull engine over the remote blob store.
    pub sync: Arc<SyncEngine>,

    /// Platform purchase ledger.
    pub ledger: Arc<dyn PurchaseLedger>,

    /// Platform notification scheduler.
    pub scheduler: Arc<dyn NotificationScheduler>,

    events: broadcast::Sender<AppEvent>,
}

impl Services {
    pub fn new(
        database: Database,
        kv: Arc<dyn KvStore>,
        ledger: Arc<dyn PurchaseLedger>,
        scheduler: Arc<dyn NotificationScheduler>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: Arc::new(Mutex::new(AppState::new(database))),
            sync: Arc::new(SyncEngine::new(kv)),
            ledger,
            scheduler,
            events,
        }
    }

    /// Subscribe to app events.
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.events.subscribe()
    }

    /// Emit an event to all subscribers. Sending with no subscribers is
    /// normal and not an error.
    pub(crate) fn emit(&self, event: AppEvent) {
        tracing::debug!(?event, "app event");
        let _ = self.events.send(event);
    }
}
