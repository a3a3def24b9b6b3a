use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Analysis service error: {0}")]
    Analysis(#[from] AnalysisApiError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// The two operations exposed by the external analysis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisOperation {
    InitialAnalysis,
    MatchPosts,
}

impl AnalysisOperation {
    pub fn endpoint(&self) -> &'static str {
        match self {
            AnalysisOperation::InitialAnalysis => "/analyze/initial",
            AnalysisOperation::MatchPosts => "/analyze/reddit",
        }
    }

    /// Short message shown to the user when the service rejects the request.
    pub fn failure_message(&self) -> &'static str {
        match self {
            AnalysisOperation::InitialAnalysis => "Failed to analyze project",
            AnalysisOperation::MatchPosts => "Failed to fetch mentions",
        }
    }
}

impl fmt::Display for AnalysisOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

#[derive(Error, Debug, Clone)]
pub enum AnalysisApiError {
    #[error("Transport failure calling {operation}: {details}")]
    Transport {
        operation: AnalysisOperation,
        details: String,
    },

    #[error("Request to {operation} failed with status {status_code}")]
    RequestFailed {
        operation: AnalysisOperation,
        status_code: u16,
    },

    #[error("Invalid API response: {details}")]
    InvalidResponse { details: String },

    #[error("Request to {operation} timed out after {seconds} seconds")]
    Timeout {
        operation: AnalysisOperation,
        seconds: u64,
    },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Connection failed: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Migration failed: {migration}")]
    MigrationFailed { migration: String },

    #[error("Query execution failed: {query}")]
    QueryFailed { query: String },

    #[error("Store not connected")]
    NotConnected,

    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Configuration validation failed: {reason}")]
    ValidationFailed { reason: String },

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}
