//! The platform notification scheduler seam.
//!
//! Delivery mechanics belong to the platform; the app only schedules or
//! cancels a single repeating daily reminder keyed by a fixed identifier.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// A repeating daily reminder. The affirmation id, when present, lets a
/// notification tap deep-link back to the card it quoted.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReminderRequest {
    pub identifier: String,
    pub hour: u8,
    pub minute: u8,
    pub title: String,
    pub body: String,
    pub affirmation_id: Option<Uuid>,
}

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Notification scheduler unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait NotificationScheduler: Send + Sync {
    /// Ask the user for notification permission. Returns whether it was
    /// granted; asking again after a grant is a cheap no-op.
    async fn request_authorization(&self) -> Result<bool, SchedulerError>;

    /// Schedule (or replace) the repeating daily reminder with the given
    /// identifier.
    async fn schedule_daily(&self, request: &ReminderRequest) -> Result<(), SchedulerError>;

    /// Cancel a scheduled reminder by identifier.
    async fn cancel(&self, identifier: &str) -> Result<(), SchedulerError>;
}

/// In-memory [`NotificationScheduler`] for tests and headless builds.
/// Records what would have been scheduled.
pub struct InMemoryScheduler {
    authorized: Mutex<bool>,
    scheduled: Mutex<HashMap<String, ReminderRequest>>,
}

impl InMemoryScheduler {
    pub fn new() -> Self {
        Self::with_authorization(true)
    }

    pub fn with_authorization(authorized: bool) -> Self {
        Self {
            authorized: Mutex::new(authorized),
            scheduled: Mutex::new(HashMap::new()),
        }
    }

    pub fn set_authorized(&self, authorized: bool) {
        if let Ok(mut guard) = self.authorized.lock() {
            *guard = authorized;
        }
    }

    /// The currently scheduled reminder under `identifier`, if any.
    pub fn scheduled(&self, identifier: &str) -> Option<ReminderRequest> {
        self.scheduled
            .lock()
            .ok()
            .and_then(|map| map.get(identifier).cloned())
    }
}

impl Default for InMemoryScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationScheduler for InMemoryScheduler {
    async fn request_authorization(&self) -> Result<bool, SchedulerError> {
        self.authorized
            .lock()
            .map(|granted| *granted)
            .map_err(|_| SchedulerError::Unavailable("authorization lock poisoned".to_string()))
    }

    async fn schedule_daily(&self, request: &ReminderRequest) -> Result<(), SchedulerError> {
        let mut scheduled = self
            .scheduled
            .lock()
            .map_err(|_| SchedulerError::Unavailable("schedule lock poisoned".to_string()))?;
        scheduled.insert(request.identifier.clone(), request.clone());

        tracing::debug!(
            identifier = %request.identifier,
            hour = request.hour,
            minute = request.minute,
            "scheduled daily reminder"
        );
        Ok(())
    }

    async fn cancel(&self, identifier: &str) -> Result<(), SchedulerError> {
        let mut scheduled = self
            .scheduled
            .lock()
            .map_err(|_| SchedulerError::Unavailable("schedule lock poisoned".to_string()))?;
        scheduled.remove(identifier);

        tracing::debug!(identifier, "cancelled daily reminder");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ReminderRequest {
        ReminderRequest {
            identifier: "dailyAffirmation".to_string(),
            hour: 9,
            minute: 0,
            title: "Daily Affirmation".to_string(),
            body: "You are amazing!".to_string(),
            affirmation_id: None,
        }
    }

    #[tokio::test]
    async fn schedule_replaces_by_identifier() {
        let scheduler = InMemoryScheduler::new();
        scheduler.schedule_daily(&request()).await.unwrap();

        let mut updated = request();
        updated.hour = 21;
        scheduler.schedule_daily(&updated).await.unwrap();

        assert_eq!(scheduler.scheduled("dailyAffirmation").unwrap().hour, 21);
    }

    #[tokio::test]
    async fn cancel_removes_reminder() {
        let scheduler = InMemoryScheduler::new();
        scheduler.schedule_daily(&request()).await.unwrap();
        scheduler.cancel("dailyAffirmation").await.unwrap();
        assert!(scheduler.scheduled("dailyAffirmation").is_none());
    }

    #[tokio::test]
    async fn authorization_is_configurable() {
        let scheduler = InMemoryScheduler::with_authorization(false);
        assert!(!scheduler.request_authorization().await.unwrap());
        scheduler.set_authorized(true);
        assert!(scheduler.request_authorization().await.unwrap());
    }
}
