//! Notification kind enumeration.

use serde::{Deserialize, Serialize};

/// Category of a notification for filtering and icon selection.
///
/// The backend may introduce new categories at any time, so unrecognized
/// wire values are preserved as [`NotificationKind::Other`] instead of
/// failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NotificationKind {
    /// An inventory item fell below its reorder threshold.
    LowStock,
    /// An inventory item is exhausted.
    OutOfStock,
    /// A new sales order arrived.
    NewOrder,
    /// An invoice was issued.
    InvoiceCreated,
    /// An HR leave request awaits action.
    LeaveRequest,
    /// System-level alerts and broadcasts.
    SystemAlert,
    /// A category this client version does not know.
    Other(String),
}

impl NotificationKind {
    /// Return the kind as its wire string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::LowStock => "low_stock",
            Self::OutOfStock => "out_of_stock",
            Self::NewOrder => "new_order",
            Self::InvoiceCreated => "invoice_created",
            Self::LeaveRequest => "leave_request",
            Self::SystemAlert => "system_alert",
            Self::Other(value) => value,
        }
    }

    /// Whether this client version recognizes the category.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for NotificationKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "low_stock" => Self::LowStock,
            "out_of_stock" => Self::OutOfStock,
            "new_order" => Self::NewOrder,
            "invoice_created" => Self::InvoiceCreated,
            "leave_request" => Self::LeaveRequest,
            "system_alert" => Self::SystemAlert,
            _ => Self::Other(value),
        }
    }
}

impl From<NotificationKind> for String {
    fn from(kind: NotificationKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
