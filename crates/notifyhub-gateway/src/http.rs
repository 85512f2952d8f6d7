//! HTTP implementation of the notification gateway.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::Validate;

use notifyhub_core::config::gateway::GatewayConfig;
use notifyhub_core::error::{AppError, ErrorKind};
use notifyhub_core::result::AppResult;
use notifyhub_core::types::NotificationId;
use notifyhub_entity::notification::{
    Notification, NotificationPage, NotificationPreferences, NotificationStats,
};

use crate::dto::{
    ApiEnvelope, BulkIdsRequest, CountData, DeviceRegistration, MessageData,
    UpdatePreferencesRequest,
};
use crate::gateway::{ListQuery, NotificationGateway};
use crate::session::SessionContext;

/// REST gateway talking to the backend notification service.
#[derive(Debug, Clone)]
pub struct HttpNotificationGateway {
    /// Shared HTTP client.
    client: reqwest::Client,
    /// Base URL without trailing slash, e.g. `https://erp.example.com/api`.
    base_url: String,
    /// Explicit session credentials.
    session: SessionContext,
}

impl HttpNotificationGateway {
    /// Build a gateway from configuration and explicit credentials.
    pub fn new(config: &GatewayConfig, session: SessionContext) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .connect_timeout(std::time::Duration::from_secs(config.connect_timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Join a path onto the base URL.
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Map a non-success HTTP status onto the error taxonomy.
    fn status_error(status: StatusCode, message: String) -> AppError {
        let kind = match status {
            StatusCode::UNAUTHORIZED => ErrorKind::Authentication,
            StatusCode::FORBIDDEN => ErrorKind::Authorization,
            StatusCode::NOT_FOUND => ErrorKind::NotFound,
            StatusCode::CONFLICT => ErrorKind::Conflict,
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ErrorKind::Validation,
            StatusCode::TOO_MANY_REQUESTS => ErrorKind::RateLimit,
            _ => ErrorKind::Api,
        };
        AppError::new(kind, message)
    }

    /// Send a request and decode the enveloped payload.
    async fn execute<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> AppResult<T> {
        let response = request
            .bearer_auth(self.session.token())
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Transport, format!("Request failed: {e}"), e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.error)
                .map(|e| e.message)
                .unwrap_or_else(|| format!("Backend returned HTTP {status}"));
            debug!(%status, "Gateway request rejected");
            return Err(Self::status_error(status, message));
        }

        let envelope: ApiEnvelope<T> = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Failed to decode response: {e}"),
                e,
            )
        })?;
        envelope.into_data()
    }

    /// Send a request where only the status matters.
    async fn execute_unit(&self, request: reqwest::RequestBuilder) -> AppResult<()> {
        let response = request
            .bearer_auth(self.session.token())
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Transport, format!("Request failed: {e}"), e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.error)
                .map(|e| e.message)
                .unwrap_or_else(|| format!("Backend returned HTTP {status}"));
            return Err(Self::status_error(status, message));
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationGateway for HttpNotificationGateway {
    async fn list(&self, query: &ListQuery) -> AppResult<NotificationPage> {
        let mut params = vec![
            ("skip", query.window.skip().to_string()),
            ("limit", query.window.limit().to_string()),
        ];
        if query.unread_only {
            params.push(("unread_only", "true".to_string()));
        }
        if let Some(kind) = &query.kind {
            params.push(("notification_type", kind.as_str().to_string()));
        }
        if let Some(priority) = query.priority {
            params.push(("priority", priority.as_str().to_string()));
        }

        self.execute(self.client.get(self.url("notifications")).query(&params))
            .await
    }

    async fn get(&self, id: NotificationId) -> AppResult<Notification> {
        self.execute(self.client.get(self.url(&format!("notifications/{id}"))))
            .await
    }

    async fn mark_read(&self, id: NotificationId) -> AppResult<Notification> {
        self.execute(
            self.client
                .put(self.url(&format!("notifications/{id}/read"))),
        )
        .await
    }

    async fn mark_all_read(&self) -> AppResult<u64> {
        let data: CountData = self
            .execute(self.client.put(self.url("notifications/read-all")))
            .await?;
        Ok(data.count)
    }

    async fn delete(&self, id: NotificationId) -> AppResult<()> {
        self.execute_unit(self.client.delete(self.url(&format!("notifications/{id}"))))
            .await
    }

    async fn archive(&self, id: NotificationId) -> AppResult<Notification> {
        self.execute(
            self.client
                .put(self.url(&format!("notifications/{id}/archive"))),
        )
        .await
    }

    async fn bulk_mark_read(&self, ids: &[NotificationId]) -> AppResult<u64> {
        let body = BulkIdsRequest {
            notification_ids: ids.to_vec(),
        };
        body.validate()
            .map_err(|e| AppError::validation(format!("Invalid bulk request: {e}")))?;
        let data: CountData = self
            .execute(
                self.client
                    .post(self.url("notifications/bulk/mark-read"))
                    .json(&body),
            )
            .await?;
        Ok(data.count)
    }

    async fn bulk_delete(&self, ids: &[NotificationId]) -> AppResult<u64> {
        let body = BulkIdsRequest {
            notification_ids: ids.to_vec(),
        };
        body.validate()
            .map_err(|e| AppError::validation(format!("Invalid bulk request: {e}")))?;
        let data: CountData = self
            .execute(
                self.client
                    .post(self.url("notifications/bulk/delete"))
                    .json(&body),
            )
            .await?;
        Ok(data.count)
    }

    async fn bulk_archive(&self, ids: &[NotificationId]) -> AppResult<u64> {
        let body = BulkIdsRequest {
            notification_ids: ids.to_vec(),
        };
        body.validate()
            .map_err(|e| AppError::validation(format!("Invalid bulk request: {e}")))?;
        let data: CountData = self
            .execute(
                self.client
                    .post(self.url("notifications/bulk/archive"))
                    .json(&body),
            )
            .await?;
        Ok(data.count)
    }

    async fn stats(&self) -> AppResult<NotificationStats> {
        self.execute(self.client.get(self.url("notifications/stats")))
            .await
    }

    async fn get_preferences(&self) -> AppResult<NotificationPreferences> {
        self.execute(self.client.get(self.url("notifications/preferences")))
            .await
    }

    async fn update_preferences(
        &self,
        preferences: &serde_json::Value,
    ) -> AppResult<NotificationPreferences> {
        let body = UpdatePreferencesRequest {
            preferences: preferences.clone(),
        };
        self.execute(
            self.client
                .put(self.url("notifications/preferences"))
                .json(&body),
        )
        .await
    }

    async fn register_device(&self, registration: &DeviceRegistration) -> AppResult<String> {
        registration
            .validate()
            .map_err(|e| AppError::validation(format!("Invalid device registration: {e}")))?;
        let data: MessageData = self
            .execute(
                self.client
                    .post(self.url("notifications/device-token"))
                    .json(registration),
            )
            .await?;
        Ok(data.message)
    }

    async fn unregister_device(&self, token: &str) -> AppResult<()> {
        self.execute_unit(
            self.client
                .delete(self.url(&format!("notifications/device-token/{token}"))),
        )
        .await
    }
}
