//! MongoDB connector: configuration, connection management, health checks.

mod config;
mod connector;
mod health;

pub use config::MongoConfig;
pub use connector::{MongoError, connect_from_config, connect_from_config_with_retry};
pub use health::check_health;

// Re-export driver types for convenience
pub use mongodb::{Client, Collection, Database};
