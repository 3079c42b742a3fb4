use async_trait::async_trait;

use super::notification_model::{NewNotification, Notification};
use crate::errors::Result;

/// Trait for notification repository operations
#[async_trait]
pub trait NotificationRepositoryTrait: Send + Sync {
    async fn insert(&self, new_notification: NewNotification) -> Result<Notification>;
    fn get_by_id(&self, notification_id: &str) -> Result<Notification>;
    fn list_unread(&self, user_id: &str) -> Result<Vec<Notification>>;
    async fn mark_read(&self, notification_id: &str) -> Result<Notification>;
}

/// Trait for notification service operations
#[async_trait]
pub trait NotificationServiceTrait: Send + Sync {
    /// Appends a notification to the user's inbox.
    async fn notify(&self, user_id: &str, message: &str) -> Result<Notification>;
    fn get_unread_notifications(&self, user_id: &str) -> Result<Vec<Notification>>;
    /// Marks a notification read; only the owner may do so.
    async fn mark_as_read(&self, user_id: &str, notification_id: &str) -> Result<Notification>;
}
