//! Service for the notification inbox.

use std::sync::Arc;

use async_trait::async_trait;

use super::notification_model::{NewNotification, Notification};
use super::notification_traits::{NotificationRepositoryTrait, NotificationServiceTrait};
use crate::errors::{Error, Result};

pub struct NotificationService {
    repository: Arc<dyn NotificationRepositoryTrait>,
}

impl NotificationService {
    pub fn new(repository: Arc<dyn NotificationRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl NotificationServiceTrait for NotificationService {
    async fn notify(&self, user_id: &str, message: &str) -> Result<Notification> {
        self.repository
            .insert(NewNotification {
                user_id: user_id.to_string(),
                message: message.to_string(),
            })
            .await
    }

    fn get_unread_notifications(&self, user_id: &str) -> Result<Vec<Notification>> {
        self.repository.list_unread(user_id)
    }

    async fn mark_as_read(&self, user_id: &str, notification_id: &str) -> Result<Notification> {
        let notification = self.repository.get_by_id(notification_id)?;
        if notification.user_id != user_id {
            return Err(Error::Forbidden(format!(
                "Notification {} does not belong to user {}",
                notification_id, user_id
            )));
        }
        self.repository.mark_read(notification_id).await
    }
}
