//! Notification priority levels.

use serde::{Deserialize, Serialize};

/// Notification priority levels.
///
/// Ordered low to critical; the ordering drives display emphasis only,
/// no business logic depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    /// Background events.
    Low,
    /// Standard events.
    Medium,
    /// Important events.
    High,
    /// Requires immediate attention.
    Critical,
}

impl NotificationPriority {
    /// Parse from a wire string, falling back to `Medium` for values this
    /// client version does not know.
    pub fn from_str_value(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "low" => Self::Low,
            "high" => Self::High,
            "critical" => Self::Critical,
            _ => Self::Medium,
        }
    }

    /// Return the priority as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Whether this priority warrants highlighted display.
    pub fn is_elevated(&self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

impl Default for NotificationPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl std::fmt::Display for NotificationPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
