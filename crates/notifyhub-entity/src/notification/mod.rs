//! Notification domain entities.

pub mod kind;
pub mod model;
pub mod page;
pub mod preference;
pub mod priority;
pub mod stats;

pub use kind::NotificationKind;
pub use model::Notification;
pub use page::NotificationPage;
pub use preference::{KindPreference, NotificationPreferences};
pub use priority::NotificationPriority;
pub use stats::NotificationStats;
