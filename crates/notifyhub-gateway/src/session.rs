//! Explicit session credentials for gateway construction.

use std::fmt;

/// Credentials and session scope for talking to the backend.
///
/// The gateway receives this at construction; nothing in the client reads
/// tokens from ambient global state.
#[derive(Clone)]
pub struct SessionContext {
    /// Bearer token presented on every request.
    token: String,
}

impl SessionContext {
    /// Create a session context around a bearer token.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// The bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for SessionContext {
    // The token never appears in logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_token() {
        let session = SessionContext::bearer("super-secret");
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
