use mentionhub_core::{
    AnalysisApiError, AnalysisOperation, ConfigError, CoreError, ErrorExt, StorageError,
};

#[test]
fn test_error_codes() {
    let analysis_error = CoreError::Analysis(AnalysisApiError::InvalidResponse {
        details: "missing matching_posts".to_string(),
    });
    assert_eq!(analysis_error.error_code(), "ANALYSIS_API");

    let storage_error = CoreError::Storage(StorageError::NotConnected);
    assert_eq!(storage_error.error_code(), "STORAGE");

    let config_error = CoreError::Config(ConfigError::ValidationFailed {
        reason: "bad".to_string(),
    });
    assert_eq!(config_error.error_code(), "CONFIG");

    let inner = AnalysisApiError::RequestFailed {
        operation: AnalysisOperation::MatchPosts,
        status_code: 500,
    };
    assert_eq!(inner.error_code(), "ANALYSIS_REQUEST_FAILED");
}

#[test]
fn test_invalid_response_message() {
    let error = CoreError::Analysis(AnalysisApiError::InvalidResponse {
        details: "missing field `matching_posts`".to_string(),
    });
    assert_eq!(
        error.user_friendly_message(),
        "Invalid response format from server"
    );
}

#[test]
fn test_status_messages_depend_on_operation() {
    let initial = CoreError::Analysis(AnalysisApiError::RequestFailed {
        operation: AnalysisOperation::InitialAnalysis,
        status_code: 502,
    });
    assert_eq!(initial.user_friendly_message(), "Failed to analyze project");

    let matching = CoreError::Analysis(AnalysisApiError::RequestFailed {
        operation: AnalysisOperation::MatchPosts,
        status_code: 404,
    });
    assert_eq!(matching.user_friendly_message(), "Failed to fetch mentions");
    assert!(matching.to_string().contains("/analyze/reddit"));
    assert!(matching.to_string().contains("404"));
}

#[test]
fn test_user_friendly_messages() {
    let transport = CoreError::Analysis(AnalysisApiError::Transport {
        operation: AnalysisOperation::MatchPosts,
        details: "connection refused".to_string(),
    });
    assert!(transport
        .user_friendly_message()
        .contains("analysis service is running"));

    let config_error = CoreError::Config(ConfigError::InvalidValue {
        field: "post_limit".to_string(),
        value: "abc".to_string(),
    });
    assert!(config_error.user_friendly_message().contains("post_limit"));

    let invalid_input = CoreError::InvalidInput {
        message: "Project name is required".to_string(),
    };
    assert_eq!(
        invalid_input.user_friendly_message(),
        "Project name is required"
    );
}
