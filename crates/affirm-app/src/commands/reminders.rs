//! The single repeating daily reminder, and the deep link carried by a
//! notification tap.

use rand::seq::SliceRandom;
use uuid::Uuid;

use affirm_shared::constants::{
    DEFAULT_REMINDER_HOUR, DEFAULT_REMINDER_MINUTE, REMINDER_IDENTIFIER,
};

use crate::error::{AppError, Result};
use crate::scheduler::ReminderRequest;
use crate::state::Services;

const REMINDER_TITLE: &str = "Daily Affirmation";
const FALLBACK_BODY: &str = "Start your day with positivity!";

/// Enable the daily reminder.
///
/// Asks for notification permission first; denial surfaces
/// [`AppError::NotificationsDenied`] so the caller can point the user at
/// system settings. Custom times are a premium feature: free users are
/// pinned to the default time regardless of the requested one. The body
/// quotes a randomly picked affirmation and carries its id for
/// deep-linking.
pub async fn enable_daily_reminder(svc: &Services, hour: u8, minute: u8) -> Result<ReminderRequest> {
    if !svc.scheduler.request_authorization().await? {
        return Err(AppError::NotificationsDenied);
    }

    let request = {
        let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
        let db = &state.database;

        let (hour, minute) = if state.is_premium {
            (hour, minute)
        } else {
            (DEFAULT_REMINDER_HOUR, DEFAULT_REMINDER_MINUTE)
        };

        let affirmations = db.list_affirmations()?;
        let pick = affirmations.choose(&mut rand::thread_rng());
        let (body, affirmation_id) = match pick {
            Some(a) => (a.text.clone(), Some(a.id)),
            None => (FALLBACK_BODY.to_string(), None),
        };

        let mut settings = db.get_settings()?;
        settings.reminder_enabled = true;
        settings.reminder_hour = hour;
        settings.reminder_minute = minute;
        db.save_settings(&settings)?;

        ReminderRequest {
            identifier: REMINDER_IDENTIFIER.to_string(),
            hour,
            minute,
            title: REMINDER_TITLE.to_string(),
            body,
            affirmation_id,
        }
    };

    svc.scheduler.schedule_daily(&request).await?;
    Ok(request)
}

/// Cancel the daily reminder and persist the choice.
pub async fn disable_daily_reminder(svc: &Services) -> Result<()> {
    {
        let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
        let db = &state.database;

        let mut settings = db.get_settings()?;
        settings.reminder_enabled = false;
        db.save_settings(&settings)?;
    }

    svc.scheduler.cancel(REMINDER_IDENTIFIER).await?;
    Ok(())
}

/// Record the affirmation id from a tapped notification; the UI opens it
/// when it next comes to the foreground.
pub fn handle_notification_open(svc: &Services, affirmation_id: Uuid) -> Result<()> {
    let mut state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
    state.pending_affirmation = Some(affirmation_id);
    Ok(())
}

/// Take (and clear) the pending deep-link target, if any.
pub fn take_pending_affirmation(svc: &Services) -> Result<Option<Uuid>> {
    let mut state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
    Ok(state.pending_affirmation.take())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{harness, make_premium};
    use crate::commands::{affirmations, settings};

    #[tokio::test]
    async fn free_users_get_the_default_time() {
        let h = harness();
        let request = enable_daily_reminder(&h.svc, 20, 30).await.unwrap();

        assert_eq!(request.hour, DEFAULT_REMINDER_HOUR);
        assert_eq!(request.minute, DEFAULT_REMINDER_MINUTE);
        assert_eq!(
            h.scheduler.scheduled(REMINDER_IDENTIFIER).unwrap().hour,
            DEFAULT_REMINDER_HOUR
        );
    }

    #[tokio::test]
    async fn premium_users_pick_their_time() {
        let h = harness();
        make_premium(&h.svc);

        let request = enable_daily_reminder(&h.svc, 20, 30).await.unwrap();
        assert_eq!(request.hour, 20);
        assert_eq!(request.minute, 30);

        let persisted = settings::get_settings(&h.svc).unwrap();
        assert!(persisted.reminder_enabled);
        assert_eq!(persisted.reminder_hour, 20);
        assert_eq!(persisted.reminder_minute, 30);
    }

    #[tokio::test]
    async fn denied_permission_surfaces() {
        let h = harness();
        h.scheduler.set_authorized(false);

        let result = enable_daily_reminder(&h.svc, 9, 0).await;
        assert!(matches!(result, Err(AppError::NotificationsDenied)));
        assert!(h.scheduler.scheduled(REMINDER_IDENTIFIER).is_none());
    }

    #[tokio::test]
    async fn body_quotes_a_seeded_affirmation() {
        let h = harness();
        affirmations::seed_if_needed(&h.svc).unwrap();

        let request = enable_daily_reminder(&h.svc, 9, 0).await.unwrap();
        assert!(request.affirmation_id.is_some());
        assert_ne!(request.body, FALLBACK_BODY);
    }

    #[tokio::test]
    async fn empty_store_falls_back_to_stock_body() {
        let h = harness();
        let request = enable_daily_reminder(&h.svc, 9, 0).await.unwrap();
        assert_eq!(request.body, FALLBACK_BODY);
        assert!(request.affirmation_id.is_none());
    }

    #[tokio::test]
    async fn disable_cancels_and_persists() {
        let h = harness();
        enable_daily_reminder(&h.svc, 9, 0).await.unwrap();
        disable_daily_reminder(&h.svc).await.unwrap();

        assert!(h.scheduler.scheduled(REMINDER_IDENTIFIER).is_none());
        assert!(!settings::get_settings(&h.svc).unwrap().reminder_enabled);
    }

    #[test]
    fn pending_affirmation_take_clears() {
        let h = harness();
        let id = Uuid::new_v4();

        handle_notification_open(&h.svc, id).unwrap();
        assert_eq!(take_pending_affirmation(&h.svc).unwrap(), Some(id));
        assert_eq!(take_pending_affirmation(&h.svc).unwrap(), None);
    }
}
