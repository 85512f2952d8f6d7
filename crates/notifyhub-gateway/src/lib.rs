//! # notifyhub-gateway
//!
//! The boundary between the client and the backend notification service:
//! the [`NotificationGateway`] contract every store collaborator
//! implements, the wire DTOs, and the [`HttpNotificationGateway`] REST
//! implementation.

pub mod dto;
pub mod gateway;
pub mod http;
pub mod session;

pub use dto::DeviceRegistration;
pub use gateway::{ListQuery, NotificationGateway};
pub use http::HttpNotificationGateway;
pub use session::SessionContext;
