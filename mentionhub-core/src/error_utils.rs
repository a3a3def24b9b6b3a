use crate::error::*;
use tracing::error;

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        match self {
            CoreError::Analysis(e) => {
                error!("Analysis service error details: {:?}", e);
            }
            CoreError::Storage(e) => {
                error!("Storage error details: {:?}", e);
            }
            CoreError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::Analysis(e) => e.user_friendly_message(),
            CoreError::Storage(e) => e.user_friendly_message(),
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::Network(_) => {
                "Network connection error. Please check that the analysis service is running."
                    .to_string()
            }
            CoreError::Serialization(_) => "Invalid response format from server".to_string(),
            CoreError::InvalidInput { message } => message.clone(),
            CoreError::NotFound { resource } => format!("Could not find: {}", resource),
            _ => "An unexpected error occurred. Please try again later.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::Analysis(_) => "ANALYSIS_API".to_string(),
            CoreError::Storage(_) => "STORAGE".to_string(),
            CoreError::Config(_) => "CONFIG".to_string(),
            CoreError::Io(_) => "IO".to_string(),
            CoreError::Serialization(_) => "SERIALIZATION".to_string(),
            CoreError::Network(_) => "NETWORK".to_string(),
            CoreError::InvalidInput { .. } => "INVALID_INPUT".to_string(),
            CoreError::NotFound { .. } => "NOT_FOUND".to_string(),
            CoreError::Internal { .. } => "INTERNAL".to_string(),
        }
    }
}

impl ErrorExt for AnalysisApiError {
    fn log_error(&self) -> &Self {
        error!("AnalysisApiError: {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            AnalysisApiError::Transport { .. } => {
                "Network connection error. Please check that the analysis service is running."
                    .to_string()
            }
            AnalysisApiError::RequestFailed { operation, .. } => {
                operation.failure_message().to_string()
            }
            AnalysisApiError::InvalidResponse { .. } => {
                "Invalid response format from server".to_string()
            }
            AnalysisApiError::Timeout { .. } => {
                "The analysis service took too long to respond. Please try again.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            AnalysisApiError::Transport { .. } => "ANALYSIS_TRANSPORT".to_string(),
            AnalysisApiError::RequestFailed { .. } => "ANALYSIS_REQUEST_FAILED".to_string(),
            AnalysisApiError::InvalidResponse { .. } => "ANALYSIS_INVALID_RESPONSE".to_string(),
            AnalysisApiError::Timeout { .. } => "ANALYSIS_TIMEOUT".to_string(),
        }
    }
}

impl ErrorExt for StorageError {
    fn log_error(&self) -> &Self {
        error!("StorageError: {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            StorageError::ConnectionFailed { .. } | StorageError::NotConnected => {
                "Mention cache is unavailable. Please restart the application.".to_string()
            }
            _ => "Failed to save mentions locally. Please try again.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            StorageError::ConnectionFailed { .. } => "STORE_CONNECTION_FAILED".to_string(),
            StorageError::MigrationFailed { .. } => "STORE_MIGRATION_FAILED".to_string(),
            StorageError::QueryFailed { .. } => "STORE_QUERY_FAILED".to_string(),
            StorageError::NotConnected => "STORE_NOT_CONNECTED".to_string(),
            StorageError::Sql(_) => "STORE_SQL_ERROR".to_string(),
        }
    }
}

impl ErrorExt for ConfigError {
    fn log_error(&self) -> &Self {
        error!("ConfigError: {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::FileNotFound { path } => {
                format!("Configuration file '{}' not found.", path)
            }
            ConfigError::InvalidValue { field, .. } => {
                format!("Invalid value for configuration field '{}'.", field)
            }
            ConfigError::ValidationFailed { reason } => {
                format!("Configuration is invalid: {}", reason)
            }
            ConfigError::Parse(_) => {
                "Configuration file format is invalid. Please check the settings.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND".to_string(),
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE".to_string(),
            ConfigError::ValidationFailed { .. } => "CONFIG_VALIDATION_FAILED".to_string(),
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR".to_string(),
        }
    }
}
