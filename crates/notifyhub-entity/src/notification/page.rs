//! List-page response shape.

use serde::{Deserialize, Serialize};

use super::model::Notification;

/// One page of notifications as returned by the gateway list operation.
///
/// `unread_count` and `total` describe the whole collection, not just
/// this page, and are authoritative when merged into store state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPage {
    /// The notifications on this page, server-ordered newest first.
    pub notifications: Vec<Notification>,
    /// Total notifications across all pages.
    pub total: u64,
    /// Unread notifications across all pages.
    pub unread_count: u64,
    /// Whether further pages exist.
    pub has_more: bool,
}

impl NotificationPage {
    /// An empty page reporting zero items.
    pub fn empty() -> Self {
        Self {
            notifications: Vec::new(),
            total: 0,
            unread_count: 0,
            has_more: false,
        }
    }

    /// Check if this page carries no items.
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}
