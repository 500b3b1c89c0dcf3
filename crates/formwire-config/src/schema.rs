//! Configuration schema definitions.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub encoding: EncodingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Parameter encoding configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EncodingConfig {
    #[serde(default)]
    pub profile: EncodingProfile,
}

/// How a field name is turned into a parameter key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingProfile {
    /// `a[b][]=x` builds `{ a: { b: [x] } }`.
    #[default]
    Nested,
    /// The whole name is one opaque key holding `[value]`.
    Flat,
}

impl EncodingProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            EncodingProfile::Nested => "nested",
            EncodingProfile::Flat => "flat",
        }
    }
}

impl fmt::Display for EncodingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncodingProfile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nested" => Ok(EncodingProfile::Nested),
            "flat" => Ok(EncodingProfile::Flat),
            other => Err(ConfigError::InvalidValue {
                field: "encoding.profile".to_string(),
                message: format!("unknown profile '{}', expected 'nested' or 'flat'", other),
            }),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,

    /// Directory for daily-rolling log files. Console only when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            dir: None,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.encoding.profile, EncodingProfile::Nested);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.dir.is_none());
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!("nested".parse::<EncodingProfile>().unwrap(), EncodingProfile::Nested);
        assert_eq!(" FLAT ".parse::<EncodingProfile>().unwrap(), EncodingProfile::Flat);
        assert!("rails".parse::<EncodingProfile>().is_err());
    }

    #[test]
    fn test_profile_display_round_trip() {
        for profile in [EncodingProfile::Nested, EncodingProfile::Flat] {
            assert_eq!(profile.to_string().parse::<EncodingProfile>().unwrap(), profile);
        }
    }

    #[test]
    fn test_profile_deserialize() {
        let config: Config = toml::from_str("[encoding]\nprofile = \"flat\"").unwrap();
        assert_eq!(config.encoding.profile, EncodingProfile::Flat);
    }
}
