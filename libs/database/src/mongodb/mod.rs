//! MongoDB connection management and health probes

mod config;
mod connector;
mod health;

pub use config::{DEFAULT_DATABASE, MongoConfig, database_from_url};
pub use connector::{MongoError, connect_from_config, connect_from_config_with_retry};
pub use health::ping;

pub use mongodb::{Client, Collection, Database};
