//! I/O side of the page-content studio: configuration, the REST client for
//! the page-content and asset endpoints, the HTTP-backed asset ingestor,
//! and the persistence coordinator.

pub mod api;
pub mod config;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod persist;

pub use api::ApiClient;
pub use config::{ClientConfig, ConfigError};
pub use error::PersistError;
pub use ingest::HttpIngestor;
pub use persist::PersistenceCoordinator;
