//! The remote operations the notification store depends on.

use async_trait::async_trait;

use notifyhub_core::AppResult;
use notifyhub_core::types::{NotificationId, PageWindow};
use notifyhub_entity::notification::{
    Notification, NotificationKind, NotificationPage, NotificationPreferences,
    NotificationPriority, NotificationStats,
};

use crate::dto::DeviceRegistration;

/// Filtered window into the server-side notification list.
#[derive(Debug, Clone)]
pub struct ListQuery {
    /// Page window (skip/limit).
    pub window: PageWindow,
    /// Restrict to unread notifications.
    pub unread_only: bool,
    /// Restrict to a single kind.
    pub kind: Option<NotificationKind>,
    /// Restrict to a single priority.
    pub priority: Option<NotificationPriority>,
}

impl ListQuery {
    /// Query for a window with no filters.
    pub fn new(window: PageWindow) -> Self {
        Self {
            window,
            unread_only: false,
            kind: None,
            priority: None,
        }
    }

    /// Restrict the query to unread notifications.
    pub fn unread_only(mut self, unread_only: bool) -> Self {
        self.unread_only = unread_only;
        self
    }

    /// Restrict the query to one notification kind.
    pub fn kind(mut self, kind: NotificationKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Restrict the query to one priority.
    pub fn priority(mut self, priority: NotificationPriority) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Remote operations the store and CLI depend on.
///
/// Implemented by [`HttpNotificationGateway`](crate::HttpNotificationGateway)
/// in production and by scripted mocks in tests. All mutating operations
/// are idempotent on the backend.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// List notifications, server-ordered newest first.
    async fn list(&self, query: &ListQuery) -> AppResult<NotificationPage>;

    /// Fetch a single notification.
    async fn get(&self, id: NotificationId) -> AppResult<Notification>;

    /// Mark one notification read; returns the updated record.
    async fn mark_read(&self, id: NotificationId) -> AppResult<Notification>;

    /// Mark every notification read; returns the number transitioned.
    async fn mark_all_read(&self) -> AppResult<u64>;

    /// Delete one notification.
    async fn delete(&self, id: NotificationId) -> AppResult<()>;

    /// Archive one notification; returns the updated record.
    async fn archive(&self, id: NotificationId) -> AppResult<Notification>;

    /// Mark a batch of notifications read; returns the number touched.
    async fn bulk_mark_read(&self, ids: &[NotificationId]) -> AppResult<u64>;

    /// Delete a batch of notifications; returns the number touched.
    async fn bulk_delete(&self, ids: &[NotificationId]) -> AppResult<u64>;

    /// Archive a batch of notifications; returns the number touched.
    async fn bulk_archive(&self, ids: &[NotificationId]) -> AppResult<u64>;

    /// Aggregate counts by kind and priority.
    async fn stats(&self) -> AppResult<NotificationStats>;

    /// Fetch the user's notification preferences.
    async fn get_preferences(&self) -> AppResult<NotificationPreferences>;

    /// Replace the user's notification preferences.
    async fn update_preferences(
        &self,
        preferences: &serde_json::Value,
    ) -> AppResult<NotificationPreferences>;

    /// Register a push device token; returns the backend confirmation.
    async fn register_device(&self, registration: &DeviceRegistration) -> AppResult<String>;

    /// Unregister a push device token.
    async fn unregister_device(&self, token: &str) -> AppResult<()>;
}
