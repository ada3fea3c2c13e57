//! Entitlement gate: purchase, restore, and refresh against the platform
//! purchase ledger. Any owned product grants full premium status; there
//! is no tiering.

use std::collections::HashSet;

use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::events::AppEvent;
use crate::ledger::{ProductInfo, PurchaseOutcome};
use crate::state::Services;

/// Whether the user currently holds an active subscription. Eventually
/// consistent: reflects the last completed entitlement refresh.
pub fn is_premium(svc: &Services) -> Result<bool> {
    let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
    Ok(state.is_premium)
}

/// The offered products, for the paywall.
pub async fn products(svc: &Services) -> Result<Vec<ProductInfo>> {
    Ok(svc.ledger.products().await?)
}

/// Re-derive the owned-product set from the ledger's current, non-revoked
/// grants. Returns the (possibly unchanged) premium status.
pub async fn refresh_entitlements(svc: &Services) -> Result<bool> {
    let entitlements = svc.ledger.current_entitlements().await?;
    let owned: HashSet<String> = entitlements
        .iter()
        .filter(|e| e.is_active())
        .map(|e| e.product_id.clone())
        .collect();
    let is_premium = !owned.is_empty();

    let changed = {
        let mut state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
        let changed = state.is_premium != is_premium || state.owned_products != owned;
        state.owned_products = owned;
        state.is_premium = is_premium;
        changed
    };

    if changed {
        debug!(is_premium, "entitlements changed");
        svc.emit(AppEvent::EntitlementsChanged { is_premium });
    }
    Ok(is_premium)
}

/// Start a purchase. Returns `true` when the purchase succeeded and
/// entitlements were refreshed; `false` when the user cancelled or the
/// purchase is pending. Other failures surface as
/// [`AppError::PurchaseFailed`].
pub async fn purchase(svc: &Services, product_id: &str) -> Result<bool> {
    let outcome = svc
        .ledger
        .purchase(product_id)
        .await
        .map_err(|e| AppError::PurchaseFailed(e.to_string()))?;

    match outcome {
        PurchaseOutcome::Success => {
            refresh_entitlements(svc).await?;
            Ok(true)
        }
        PurchaseOutcome::Cancelled | PurchaseOutcome::Pending => Ok(false),
    }
}

/// Restore previous purchases. Returns the refreshed premium status.
pub async fn restore_purchases(svc: &Services) -> Result<bool> {
    svc.ledger
        .restore()
        .await
        .map_err(|e| AppError::PurchaseFailed(e.to_string()))?;
    refresh_entitlements(svc).await
}

/// Long-running listener: every ledger-update notification triggers an
/// entitlement refresh. Spawn once at startup; returns when the ledger's
/// update channel closes.
pub async fn run_update_listener(svc: Services) {
    let mut updates = svc.ledger.updates();
    loop {
        match updates.recv().await {
            Ok(()) => {
                if let Err(e) = refresh_entitlements(&svc).await {
                    warn!(error = %e, "entitlement refresh after ledger update failed");
                }
            }
            Err(RecvError::Lagged(missed)) => {
                debug!(missed, "ledger updates lagged");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
