pub mod config;
pub mod error;
pub mod error_utils;
pub mod project_store;
pub mod relevance;
pub mod types;

pub use config::AppConfig;
pub use error::*;
pub use error_utils::*;
pub use project_store::ProjectStore;
pub use relevance::RelevanceBand;
pub use types::*;
