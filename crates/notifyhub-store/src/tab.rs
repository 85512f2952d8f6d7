//! Inbox tab filter.

use serde::{Deserialize, Serialize};

/// Which slice of the inbox the list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InboxTab {
    /// Every notification.
    #[default]
    All,
    /// Unread notifications only.
    Unread,
}

impl InboxTab {
    /// Return the tab as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Unread => "unread",
        }
    }
}

impl std::fmt::Display for InboxTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
