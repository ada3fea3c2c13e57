//! Command functions implementing every user-facing operation.
//!
//! Each function takes the [`Services`] handle; mutations go through the
//! single-writer state lock, remote calls happen with the lock released.

pub mod affirmations;
pub mod journal;
pub mod moods;
pub mod premium;
pub mod reminders;
pub mod settings;
pub mod streak;
pub mod sync;

use crate::error::Result;
use crate::state::Services;

/// App-start sequence: seed the catalog on first launch, refresh
/// entitlements, and apply any remote state for premium users. Ledger
/// unavailability is not fatal; the app starts offline with the last
/// known premium status (false on a cold start).
pub async fn startup(svc: &Services) -> Result<()> {
    {
        let state = svc.state.lock().map_err(|_| crate::AppError::LockPoisoned)?;
        affirm_store::seed::seed_if_empty(&state.database)?;
    }

    if let Err(e) = premium::refresh_entitlements(svc).await {
        tracing::warn!(error = %e, "entitlement refresh failed at startup");
    }

    sync::pull_and_apply(svc).await?;
    Ok(())
}


#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use affirm_store::Database;
    use affirm_sync::MemoryKvStore;

    use crate::ledger::InMemoryLedger;
    use crate::scheduler::InMemoryScheduler;
    use crate::state::Services;

    /// Everything a command test needs: the service bundle plus direct
    /// handles to the fakes behind it.
    pub struct TestHarness {
        pub svc: Services,
        pub kv: MemoryKvStore,
        pub ledger: Arc<InMemoryLedger>,
        pub scheduler: Arc<InMemoryScheduler>,
        _dir: tempfile::TempDir,
    }

    pub fn harness() -> TestHarness {
        let dir = tempfile::tempdir().unwrap();
        let database = Database::open_at(&dir.path().join("test.db")).unwrap();

        let kv = MemoryKvStore::new();
        let ledger = Arc::new(InMemoryLedger::new());
        let scheduler = Arc::new(InMemoryScheduler::new());

        let svc = Services::new(
            database,
            Arc::new(kv.clone()),
            ledger.clone(),
            scheduler.clone(),
        );

        TestHarness {
            svc,
            kv,
            ledger,
            scheduler,
            _dir: dir,
        }
    }

    /// Flip premium on directly, as if an entitlement refresh had
    /// completed.
    pub fn make_premium(svc: &Services) {
        let mut state = svc.state.lock().unwrap();
        state.is_premium = true;
        state
            .owned_products
            .insert(affirm_shared::constants::PRODUCT_ID_MONTHLY.to_string());
    }
}
