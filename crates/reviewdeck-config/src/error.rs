use reviewdeck_models::Platform;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write config at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A platform section is enabled but its external identifier is blank.
    #[error("{platform} is enabled but {field} is not configured")]
    MissingIdentifier {
        platform: Platform,
        field: &'static str,
    },

    #[error("inbox.max_page_size must be positive")]
    ZeroMaxPageSize,
}
