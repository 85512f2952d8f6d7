//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use notifyhub_core::types::NotificationId;

use super::kind::NotificationKind;
use super::priority::NotificationPriority;

/// A notification held by the client.
///
/// The backend owns the record; this is a cached copy whose `is_read`
/// flag is mutated locally ahead of remote confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Unique notification identifier, stable across fetches.
    pub id: NotificationId,
    /// Notification category.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Priority level, used for display emphasis only.
    #[serde(default)]
    pub priority: NotificationPriority,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Whether the user has read this notification.
    #[serde(default)]
    pub is_read: bool,
    /// When the notification was created. The backend orders lists by
    /// this field (newest first); the client never re-sorts.
    pub created_at: DateTime<Utc>,
    /// Click-through target. Clicking a notification with an action URL
    /// marks it read and navigates there.
    #[serde(default)]
    pub action_url: Option<String>,
}

impl Notification {
    /// Check if the notification has not been read.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }

    /// Check if clicking this notification navigates somewhere.
    pub fn has_action(&self) -> bool {
        self.action_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_wire_shape() {
        let json = serde_json::json!({
            "id": "b9e7c3d4-2f61-4a8e-9c0b-5d1e8f7a6b4c",
            "type": "low_stock",
            "priority": "high",
            "title": "Low stock",
            "message": "SKU-100 is below threshold",
            "is_read": false,
            "created_at": "2025-11-03T09:15:00Z",
            "action_url": "/inventory/items/100"
        });
        let n: Notification = serde_json::from_value(json).expect("deserialize");
        assert_eq!(n.kind, NotificationKind::LowStock);
        assert_eq!(n.priority, NotificationPriority::High);
        assert!(n.is_unread());
        assert!(n.has_action());
    }

    #[test]
    fn test_optional_fields_default() {
        let json = serde_json::json!({
            "id": "b9e7c3d4-2f61-4a8e-9c0b-5d1e8f7a6b4c",
            "type": "system_alert",
            "title": "Maintenance",
            "message": "Scheduled downtime tonight",
            "created_at": "2025-11-03T09:15:00Z"
        });
        let n: Notification = serde_json::from_value(json).expect("deserialize");
        assert_eq!(n.priority, NotificationPriority::Medium);
        assert!(!n.is_read);
        assert!(n.action_url.is_none());
    }
}
