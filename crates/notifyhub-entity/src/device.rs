//! Push-notification device platforms.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use notifyhub_core::AppError;

/// Platform a push device token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevicePlatform {
    /// Apple push (APNs).
    Ios,
    /// Google push (FCM).
    Android,
    /// Browser push (Web Push).
    Web,
}

impl DevicePlatform {
    /// Return the platform as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
            Self::Web => "web",
        }
    }
}

impl fmt::Display for DevicePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DevicePlatform {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ios" => Ok(Self::Ios),
            "android" => Ok(Self::Android),
            "web" => Ok(Self::Web),
            _ => Err(AppError::validation(format!(
                "Invalid device platform: '{s}'. Expected one of: ios, android, web"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_from_str() {
        let platform: DevicePlatform = "Android".parse().expect("should parse");
        assert_eq!(platform, DevicePlatform::Android);
    }

    #[test]
    fn test_invalid_platform_rejected() {
        assert!("blackberry".parse::<DevicePlatform>().is_err());
    }
}
