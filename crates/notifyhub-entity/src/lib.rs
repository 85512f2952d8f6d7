//! # notifyhub-entity
//!
//! Domain entities for NotifyHub: the notification record and its
//! kind/priority enums, the list-page shape returned by the gateway,
//! user preferences, aggregate stats, and device platforms.

pub mod device;
pub mod notification;

pub use device::DevicePlatform;
pub use notification::{
    Notification, NotificationKind, NotificationPage, NotificationPreferences,
    NotificationPriority, NotificationStats,
};
