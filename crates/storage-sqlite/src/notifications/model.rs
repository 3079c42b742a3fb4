//! Database models for notifications.

use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;

use roboadvisor_core::notifications::Notification;

/// Database model for notifications
#[derive(Queryable, Identifiable, Insertable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::notifications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NotificationDB {
    pub id: String,
    pub user_id: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

impl From<NotificationDB> for Notification {
    fn from(db: NotificationDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            message: db.message,
            read: db.is_read,
            created_at: DateTime::<Utc>::from_naive_utc_and_offset(db.created_at, Utc),
        }
    }
}
