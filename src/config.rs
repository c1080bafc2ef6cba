//! Configuration: settings types, file loading and validation.
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Request path matcher
mod matcher;
/// Configuration types and settings
mod types;

pub use manager::ConfigManager;
pub use matcher::{
    MatcherError,
    PathMatcher,
};
pub use types::{
    ConfigError,
    EdgeConfig,
    I18nSettings,
    StorageConfig,
    StrategyKind,
    ValidationError,
};
