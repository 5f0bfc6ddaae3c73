pub mod config;
pub mod error;
pub mod paths;

pub use config::{
    BookingConfig, Config, FacebookConfig, GoogleConfig, InboxOptions, PlatformsConfig,
    TripadvisorConfig,
};
pub use error::ConfigError;
pub use paths::PathManager;
