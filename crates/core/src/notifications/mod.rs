//! Notifications module - domain models, services, and traits.

mod notification_model;
mod notification_service;
mod notification_traits;

pub use notification_model::{NewNotification, Notification};
pub use notification_service::NotificationService;
pub use notification_traits::{NotificationRepositoryTrait, NotificationServiceTrait};
