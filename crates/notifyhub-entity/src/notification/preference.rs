//! Notification preference entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-user notification delivery preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPreferences {
    /// Preferences as a JSON object keyed by notification kind.
    ///
    /// Structure:
    /// ```json
    /// {
    ///   "low_stock": { "enabled": true, "push": true, "email": false },
    ///   "new_order": { "enabled": true, "push": true, "email": true },
    ///   ...
    /// }
    /// ```
    pub preferences: serde_json::Value,
    /// When preferences were last updated.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Preference settings for a single notification kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KindPreference {
    /// Whether this kind is enabled at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Whether to deliver via push notification.
    #[serde(default = "default_true")]
    pub push: bool,
    /// Whether to deliver via email.
    #[serde(default)]
    pub email: bool,
}

impl NotificationPreferences {
    /// Typed view of the preference entry for one kind, if present and
    /// well-formed.
    pub fn for_kind(&self, kind: &str) -> Option<KindPreference> {
        self.preferences
            .get(kind)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

impl Default for KindPreference {
    fn default() -> Self {
        Self {
            enabled: true,
            push: true,
            email: false,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_kind_reads_typed_entry() {
        let prefs = NotificationPreferences {
            preferences: serde_json::json!({
                "low_stock": { "enabled": false, "push": false, "email": true }
            }),
            updated_at: None,
        };
        let entry = prefs.for_kind("low_stock").expect("entry present");
        assert!(!entry.enabled);
        assert!(entry.email);
    }

    #[test]
    fn test_for_kind_missing_entry() {
        let prefs = NotificationPreferences {
            preferences: serde_json::json!({}),
            updated_at: None,
        };
        assert!(prefs.for_kind("new_order").is_none());
    }
}
