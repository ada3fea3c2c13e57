//! The platform purchase ledger seam.
//!
//! Receipt verification, payment sheets and store round-trips live behind
//! [`PurchaseLedger`]; the app only ever sees product metadata and the
//! set of currently valid entitlement grants. Ledger updates arrive
//! asynchronously at unspecified times, so premium status is eventually
//! consistent with a just-completed purchase.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::broadcast;

use affirm_shared::constants::{PRODUCT_ID_MONTHLY, PRODUCT_ID_WEEKLY};

/// Capacity of the ledger-update broadcast channel.
const UPDATE_CAPACITY: usize = 16;

/// Purchasable product metadata.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProductInfo {
    pub id: String,
    pub display_name: String,
    pub display_price: String,
}

/// An entitlement grant from the ledger. Only non-revoked grants count
/// toward premium status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entitlement {
    pub product_id: String,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl Entitlement {
    pub fn is_active(&self) -> bool {
        self.revoked_at.is_none()
    }
}

/// Outcome of a purchase attempt that did not error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// Verified and finished; entitlements should be refreshed.
    Success,
    /// The user dismissed the payment sheet.
    Cancelled,
    /// Deferred (e.g. pending approval); not an entitlement yet.
    Pending,
}

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    #[error("Purchase ledger unavailable: {0}")]
    Unavailable(String),
}

/// Enumeration surface of the platform purchase ledger.
#[async_trait]
pub trait PurchaseLedger: Send + Sync {
    /// Look up the offered products.
    async fn products(&self) -> Result<Vec<ProductInfo>, LedgerError>;

    /// Start a purchase for one product and wait for its outcome.
    async fn purchase(&self, product_id: &str) -> Result<PurchaseOutcome, LedgerError>;

    /// Ask the platform to restore previous purchases into the ledger.
    async fn restore(&self) -> Result<(), LedgerError>;

    /// Enumerate all current entitlement grants, including revoked ones.
    async fn current_entitlements(&self) -> Result<Vec<Entitlement>, LedgerError>;

    /// Subscribe to ledger-update notifications (renewals, revocations,
    /// purchases finishing on other devices).
    fn updates(&self) -> broadcast::Receiver<()>;
}

// ---------------------------------------------------------------------------
// In-memory ledger
// ---------------------------------------------------------------------------

/// In-memory [`PurchaseLedger`] for tests and local development. Grants
/// are manipulated directly via [`grant`] / [`revoke`], which also fire
/// update notifications like a real ledger would.
///
/// [`grant`]: InMemoryLedger::grant
/// [`revoke`]: InMemoryLedger::revoke
pub struct InMemoryLedger {
    products: Vec<ProductInfo>,
    grants: Mutex<HashMap<String, Entitlement>>,
    next_outcome: Mutex<PurchaseOutcome>,
    updates_tx: broadcast::Sender<()>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        let (updates_tx, _) = broadcast::channel(UPDATE_CAPACITY);
        Self {
            products: vec![
                ProductInfo {
                    id: PRODUCT_ID_MONTHLY.to_string(),
                    display_name: "Affirm Pro (Monthly)".to_string(),
                    display_price: "$4.99".to_string(),
                },
                ProductInfo {
                    id: PRODUCT_ID_WEEKLY.to_string(),
                    display_name: "Affirm Pro (Weekly)".to_string(),
                    display_price: "$1.99".to_string(),
                },
            ],
            grants: Mutex::new(HashMap::new()),
            next_outcome: Mutex::new(PurchaseOutcome::Success),
            updates_tx,
        }
    }

    /// Add an active grant and notify update listeners.
    pub fn grant(&self, product_id: &str) {
        if let Ok(mut grants) = self.grants.lock() {
            grants.insert(
                product_id.to_string(),
                Entitlement {
                    product_id: product_id.to_string(),
                    revoked_at: None,
                },
            );
        }
        let _ = self.updates_tx.send(());
    }

    /// Revoke a grant (refund, chargeback) and notify update listeners.
    pub fn revoke(&self, product_id: &str) {
        if let Ok(mut grants) = self.grants.lock() {
            if let Some(grant) = grants.get_mut(product_id) {
                grant.revoked_at = Some(Utc::now());
            }
        }
        let _ = self.updates_tx.send(());
    }

    /// Force the outcome of the next `purchase` call (e.g. `Cancelled`).
    pub fn set_next_outcome(&self, outcome: PurchaseOutcome) {
        if let Ok(mut next) = self.next_outcome.lock() {
            *next = outcome;
        }
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PurchaseLedger for InMemoryLedger {
    async fn products(&self) -> Result<Vec<ProductInfo>, LedgerError> {
        Ok(self.products.clone())
    }

    async fn purchase(&self, product_id: &str) -> Result<PurchaseOutcome, LedgerError> {
        if !self.products.iter().any(|p| p.id == product_id) {
            return Err(LedgerError::UnknownProduct(product_id.to_string()));
        }

        let outcome = self
            .next_outcome
            .lock()
            .map(|o| *o)
            .unwrap_or(PurchaseOutcome::Success);

        if outcome == PurchaseOutcome::Success {
            self.grant(product_id);
        }
        Ok(outcome)
    }

    async fn restore(&self) -> Result<(), LedgerError> {
        let _ = self.updates_tx.send(());
        Ok(())
    }

    async fn current_entitlements(&self) -> Result<Vec<Entitlement>, LedgerError> {
        let grants = self
            .grants
            .lock()
            .map_err(|_| LedgerError::Unavailable("grants lock poisoned".to_string()))?;
        Ok(grants.values().cloned().collect())
    }

    fn updates(&self) -> broadcast::Receiver<()> {
        self.updates_tx.subscribe()
    }
}
