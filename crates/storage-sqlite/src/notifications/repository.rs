use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use roboadvisor_core::notifications::{
    NewNotification, Notification, NotificationRepositoryTrait,
};
use roboadvisor_core::Result;

use super::model::NotificationDB;
use crate::db::{get_connection, DbPool};
use crate::errors::IntoCore;
use crate::schema::notifications::dsl::*;

pub struct NotificationRepository {
    pool: Arc<DbPool>,
}

impl NotificationRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        NotificationRepository { pool }
    }
}

#[async_trait]
impl NotificationRepositoryTrait for NotificationRepository {
    async fn insert(&self, new_notification: NewNotification) -> Result<Notification> {
        let mut conn = get_connection(&self.pool)?;
        let row = NotificationDB {
            id: Uuid::new_v4().to_string(),
            user_id: new_notification.user_id,
            message: new_notification.message,
            is_read: false,
            created_at: Utc::now().naive_utc(),
        };
        diesel::insert_into(notifications)
            .values(&row)
            .execute(&mut conn)
            .into_core()?;
        Ok(row.into())
    }

    fn get_by_id(&self, notification_id: &str) -> Result<Notification> {
        let mut conn = get_connection(&self.pool)?;
        let row = notifications
            .find(notification_id)
            .first::<NotificationDB>(&mut conn)
            .into_core()?;
        Ok(row.into())
    }

    fn list_unread(&self, user_id_param: &str) -> Result<Vec<Notification>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = notifications
            .filter(user_id.eq(user_id_param))
            .filter(is_read.eq(false))
            .order(created_at.asc())
            .load::<NotificationDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Notification::from).collect())
    }

    async fn mark_read(&self, notification_id: &str) -> Result<Notification> {
        let mut conn = get_connection(&self.pool)?;
        diesel::update(notifications.find(notification_id))
            .set(is_read.eq(true))
            .execute(&mut conn)
            .into_core()?;
        let row = notifications
            .find(notification_id)
            .first::<NotificationDB>(&mut conn)
            .into_core()?;
        Ok(row.into())
    }
}
