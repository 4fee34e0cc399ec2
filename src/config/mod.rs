//! Configuration loading

mod search_config;

pub use search_config::{
    ConfigError, FieldBoosts, IndexConfig, SearchConfig, SearchOptions, CONFIG_ENV,
    DEFAULT_CONFIG_PATH,
};
