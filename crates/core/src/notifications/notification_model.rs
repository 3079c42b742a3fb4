//! Notification domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One-way alert delivered to a user's inbox.
///
/// Notifications are an append-only audit trail: they are created, later
/// marked read, and never deleted. Read notifications simply drop out of the
/// unread listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Input model for appending a notification.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub user_id: String,
    pub message: String,
}
