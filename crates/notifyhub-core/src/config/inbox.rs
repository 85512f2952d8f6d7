//! Inbox store configuration.

use serde::{Deserialize, Serialize};

/// Settings for the client-side notification inbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboxConfig {
    /// Number of notifications fetched per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// Whether archiving a notification reduces the `total` counter the
    /// way deleting does. The backend keeps archived items in some
    /// aggregates, so the default leaves `total` untouched.
    #[serde(default)]
    pub archive_reduces_total: bool,
}

impl Default for InboxConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            archive_reduces_total: false,
        }
    }
}

fn default_page_size() -> u64 {
    50
}
