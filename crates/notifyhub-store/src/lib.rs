//! # notifyhub-store
//!
//! The client-side notification inbox: an in-memory list of cached
//! notification records, the unread counter, pagination state, and the
//! all/unread tab filter. Mutations are applied optimistically ahead of
//! the gateway call and reverted if the call fails; list responses that
//! were superseded by a tab switch or refresh are discarded.

pub mod store;
pub mod tab;

pub use store::{InboxSnapshot, NotificationStore, UnreadListener};
pub use tab::InboxTab;
