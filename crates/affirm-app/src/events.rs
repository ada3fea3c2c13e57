//! App events broadcast to UI subscribers.

use serde::Serialize;

/// Events emitted by the command layer. Subscribers that fall behind
/// simply miss events; every payload can be re-derived from the store.
#[derive(Debug, Clone, Serialize)]
pub enum AppEvent {
    /// The favorite set changed (toggle, reset, or sync pull).
    FavoritesChanged { count: usize },

    /// A custom affirmation was created, edited or deleted.
    CustomAffirmationsChanged { count: usize },

    /// A sync pull was applied to the local store.
    SyncCompleted {
        favorites_applied: usize,
        custom_updated: usize,
        custom_created: usize,
    },

    /// The owned-entitlement set changed.
    EntitlementsChanged { is_premium: bool },

    /// The streak crossed a celebration milestone.
    MilestoneReached { streak: u32 },
}
