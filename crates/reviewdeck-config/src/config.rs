use reviewdeck_models::Platform;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Top-level TOML configuration.
///
/// One optional section per platform; a missing section means the platform
/// is not connected and contributes nothing to unified queries.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub platforms: PlatformsConfig,
    #[serde(default)]
    pub inbox: InboxOptions,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct PlatformsConfig {
    #[serde(default)]
    pub google: Option<GoogleConfig>,
    #[serde(default)]
    pub facebook: Option<FacebookConfig>,
    #[serde(default)]
    pub tripadvisor: Option<TripadvisorConfig>,
    #[serde(default)]
    pub booking: Option<BookingConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GoogleConfig {
    pub enabled: bool,
    /// Google Business Profile place id.
    pub place_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FacebookConfig {
    pub enabled: bool,
    pub page_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TripadvisorConfig {
    pub enabled: bool,
    pub location_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingConfig {
    pub enabled: bool,
    pub property_id: String,
}

/// Paging bounds for the unified inbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboxOptions {
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

fn default_page_size() -> usize {
    20
}

fn default_max_page_size() -> usize {
    100
}

impl Default for InboxOptions {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw).map_err(write_err)?;
        Ok(())
    }

    /// An enabled platform must carry its external identifier; a disabled or
    /// absent section is always valid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(google) = &self.platforms.google {
            if google.enabled && google.place_id.is_empty() {
                return Err(ConfigError::MissingIdentifier {
                    platform: Platform::Google,
                    field: "place_id",
                });
            }
        }
        if let Some(facebook) = &self.platforms.facebook {
            if facebook.enabled && facebook.page_id.is_empty() {
                return Err(ConfigError::MissingIdentifier {
                    platform: Platform::Facebook,
                    field: "page_id",
                });
            }
        }
        if let Some(tripadvisor) = &self.platforms.tripadvisor {
            if tripadvisor.enabled && tripadvisor.location_id.is_empty() {
                return Err(ConfigError::MissingIdentifier {
                    platform: Platform::Tripadvisor,
                    field: "location_id",
                });
            }
        }
        if let Some(booking) = &self.platforms.booking {
            if booking.enabled && booking.property_id.is_empty() {
                return Err(ConfigError::MissingIdentifier {
                    platform: Platform::Booking,
                    field: "property_id",
                });
            }
        }
        if self.inbox.max_page_size == 0 {
            return Err(ConfigError::ZeroMaxPageSize);
        }
        Ok(())
    }

    pub fn is_enabled(&self, platform: Platform) -> bool {
        match platform {
            Platform::Google => self
                .platforms
                .google
                .as_ref()
                .map(|c| c.enabled)
                .unwrap_or(false),
            Platform::Facebook => self
                .platforms
                .facebook
                .as_ref()
                .map(|c| c.enabled)
                .unwrap_or(false),
            Platform::Tripadvisor => self
                .platforms
                .tripadvisor
                .as_ref()
                .map(|c| c.enabled)
                .unwrap_or(false),
            Platform::Booking => self
                .platforms
                .booking
                .as_ref()
                .map(|c| c.enabled)
                .unwrap_or(false),
        }
    }

    /// Enabled platforms in the fixed tie-break order.
    pub fn enabled_platforms(&self) -> Vec<Platform> {
        Platform::ALL
            .into_iter()
            .filter(|p| self.is_enabled(*p))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let raw = r#"
            [platforms.google]
            enabled = true
            place_id = "place-123"

            [platforms.booking]
            enabled = false
            property_id = ""
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        config.validate().unwrap();
        assert!(config.is_enabled(Platform::Google));
        assert!(!config.is_enabled(Platform::Booking));
        assert!(!config.is_enabled(Platform::Facebook));
        assert_eq!(config.enabled_platforms(), vec![Platform::Google]);
        assert_eq!(config.inbox.default_page_size, 20);
        assert_eq!(config.inbox.max_page_size, 100);
    }

    #[test]
    fn test_enabled_platform_requires_identifier() {
        let raw = r#"
            [platforms.facebook]
            enabled = true
            page_id = ""
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        match config.validate() {
            Err(ConfigError::MissingIdentifier { platform, field }) => {
                assert_eq!(platform, Platform::Facebook);
                assert_eq!(field, "page_id");
            }
            other => panic!("expected MissingIdentifier, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_max_page_size_is_rejected() {
        let raw = r#"
            [inbox]
            max_page_size = 0
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroMaxPageSize)
        ));
    }

    #[test]
    fn test_load_surfaces_read_failure_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        match Config::load(&path) {
            Err(ConfigError::Read { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected Read error, got {:?}", other),
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviewdeck.toml");

        let config = Config {
            platforms: PlatformsConfig {
                tripadvisor: Some(TripadvisorConfig {
                    enabled: true,
                    location_id: "loc-9".to_string(),
                }),
                ..Default::default()
            },
            inbox: InboxOptions {
                default_page_size: 10,
                max_page_size: 50,
            },
        };
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert!(loaded.is_enabled(Platform::Tripadvisor));
        assert_eq!(loaded.inbox.default_page_size, 10);
    }
}
