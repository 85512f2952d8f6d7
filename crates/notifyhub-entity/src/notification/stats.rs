//! Aggregate notification statistics.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Aggregate counts reported by the stats endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationStats {
    /// Total notifications for the user.
    pub total: u64,
    /// Unread notifications for the user.
    pub unread: u64,
    /// Counts keyed by notification kind.
    #[serde(default)]
    pub by_type: HashMap<String, u64>,
    /// Counts keyed by priority.
    #[serde(default)]
    pub by_priority: HashMap<String, u64>,
}
