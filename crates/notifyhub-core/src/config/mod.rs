//! Client configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod gateway;
pub mod inbox;
pub mod logging;

use serde::{Deserialize, Serialize};

use self::gateway::GatewayConfig;
use self::inbox::InboxConfig;
use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root client configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files plus the `NOTIFYHUB`-prefixed environment
/// overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Remote gateway settings.
    pub gateway: GatewayConfig,
    /// Inbox (store) settings.
    #[serde(default)]
    pub inbox: InboxConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Load configuration from the given file plus environment overrides.
    ///
    /// The file is optional; `NOTIFYHUB__GATEWAY__BASE_URL`-style variables
    /// can supply everything on their own.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("NOTIFYHUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
