/// Application name
pub const APP_NAME: &str = "Affirm";

/// Subscription product identifiers. Either grants full premium status.
pub const PRODUCT_ID_WEEKLY: &str = "app.affirm.weekly";
pub const PRODUCT_ID_MONTHLY: &str = "app.affirm.monthly";

/// All offered products, in paywall display order.
pub const PRODUCT_IDS: [&str; 2] = [PRODUCT_ID_MONTHLY, PRODUCT_ID_WEEKLY];

/// Remote key-value blob key holding the favorite-id array.
pub const KV_KEY_FAVORITES: &str = "favorites";

/// Remote key-value blob key holding the custom-affirmation records.
pub const KV_KEY_CUSTOM_AFFIRMATIONS: &str = "customAffirmations";

/// Maximum favorites for non-premium users.
pub const FREE_FAVORITES_LIMIT: usize = 5;

/// Identifier of the single repeating daily reminder.
pub const REMINDER_IDENTIFIER: &str = "dailyAffirmation";

/// Reminder time for non-premium users (custom times are a premium feature).
pub const DEFAULT_REMINDER_HOUR: u8 = 9;
pub const DEFAULT_REMINDER_MINUTE: u8 = 0;

/// Streak lengths that trigger a milestone celebration, ascending.
pub const STREAK_MILESTONES: [u32; 8] = [7, 14, 21, 30, 60, 90, 100, 365];

/// Soft deadline for any remote blob read/write, in seconds.
pub const REMOTE_TIMEOUT_SECS: u64 = 15;
