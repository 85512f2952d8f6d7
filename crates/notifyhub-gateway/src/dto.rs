//! Wire DTOs for the notification REST surface.

use serde::{Deserialize, Serialize};
use validator::Validate;

use notifyhub_core::types::NotificationId;
use notifyhub_core::{AppError, AppResult};
use notifyhub_entity::device::DevicePlatform;

/// Standard response envelope used by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data, present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error details, present on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
}

/// Error payload inside a failed envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code.
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable error message.
    pub message: String,
}

impl<T> ApiEnvelope<T> {
    /// Wrap data in a successful envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Unwrap the payload, turning envelope-level failure into an error.
    pub fn into_data(self) -> AppResult<T> {
        if self.success {
            self.data
                .ok_or_else(|| AppError::serialization("Response envelope is missing data"))
        } else {
            let message = self
                .error
                .map(|e| e.message)
                .unwrap_or_else(|| "Backend reported failure without detail".to_string());
            Err(AppError::api(message))
        }
    }
}

/// Request body for the bulk mark-read/delete/archive endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BulkIdsRequest {
    /// Ids the operation applies to.
    #[validate(length(min = 1, message = "at least one notification id is required"))]
    pub notification_ids: Vec<NotificationId>,
}

/// Count payload returned by read-all and bulk endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountData {
    /// Number of notifications the operation touched.
    pub count: u64,
}

/// Message payload returned by device-token endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageData {
    /// Human-readable confirmation.
    pub message: String,
}

/// Request body for updating notification preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePreferencesRequest {
    /// Preference object keyed by notification kind.
    pub preferences: serde_json::Value,
}

/// Request body for registering a push device token.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeviceRegistration {
    /// Opaque push token issued by the platform.
    #[validate(length(min = 1, max = 4096, message = "token must not be empty"))]
    pub token: String,
    /// Platform the token belongs to.
    pub platform: DevicePlatform,
    /// Stable device identifier, if the platform provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

impl DeviceRegistration {
    /// Create a registration for the given token and platform.
    pub fn new(token: impl Into<String>, platform: DevicePlatform) -> Self {
        Self {
            token: token.into(),
            platform,
            device_id: None,
        }
    }

    /// Attach a stable device identifier.
    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }
}
