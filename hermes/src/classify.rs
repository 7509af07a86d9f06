//! Maps publish failures onto HTTP responses.

use axum::http::StatusCode;
use tracing::error;

use crate::error::PublishFailure;

/// Pick the response status for a failed publish and log the failure.
///
/// - remote service failure: 500, logs code, status code, request id
/// - client/library error: 502, logs code and underlying error
/// - anything else: 500, logs the raw message
///
/// Counters are the caller's responsibility.
pub fn classify(failure: &PublishFailure) -> StatusCode {
    let kind = failure.kind();
    match failure {
        PublishFailure::RemoteFailure {
            code,
            status,
            request_id,
            message,
        } => {
            error!(
                kind,
                code = %code,
                status_code = status,
                request_id = request_id.as_deref().unwrap_or(""),
                message = %message,
                "sns_request_failed"
            );
            StatusCode::INTERNAL_SERVER_ERROR
        }
        PublishFailure::ClientError { code, message } => {
            error!(kind, code = %code, orig_err = %message, "sns_client_error");
            StatusCode::BAD_GATEWAY
        }
        PublishFailure::Unclassified { message } => {
            error!(kind, error = %message, "publish_failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture_logs;

    #[test]
    fn test_remote_failure_is_internal_error() {
        let failure = PublishFailure::RemoteFailure {
            code: "AuthorizationError".to_string(),
            status: 403,
            request_id: Some("b6f2c2a1".to_string()),
            message: "not authorized".to_string(),
        };
        assert_eq!(classify(&failure), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_remote_failure_without_request_id_is_internal_error() {
        let failure = PublishFailure::RemoteFailure {
            code: "InternalError".to_string(),
            status: 500,
            request_id: None,
            message: String::new(),
        };
        assert_eq!(classify(&failure), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_client_error_is_bad_gateway() {
        let failure = PublishFailure::ClientError {
            code: "DispatchFailure".to_string(),
            message: "dns error".to_string(),
        };
        assert_eq!(classify(&failure), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_unclassified_is_internal_error() {
        let failure = PublishFailure::Unclassified {
            message: "something odd".to_string(),
        };
        assert_eq!(classify(&failure), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_remote_failure_logs_request_details() {
        let (logs, _guard) = capture_logs();
        let failure = PublishFailure::RemoteFailure {
            code: "NotFound".to_string(),
            status: 404,
            request_id: Some("req-42".to_string()),
            message: "Topic does not exist".to_string(),
        };
        classify(&failure);

        let logs = logs.contents();
        assert!(logs.contains("ERROR"));
        assert!(logs.contains("sns_request_failed"));
        assert!(logs.contains("code=NotFound"));
        assert!(logs.contains("status_code=404"));
        assert!(logs.contains("request_id=\"req-42\""));
        assert!(logs.contains("Topic does not exist"));
    }

    #[test]
    fn test_client_error_logs_code_and_cause() {
        let (logs, _guard) = capture_logs();
        let failure = PublishFailure::ClientError {
            code: "DispatchFailure".to_string(),
            message: "dns error".to_string(),
        };
        classify(&failure);

        let logs = logs.contents();
        assert!(logs.contains("sns_client_error"));
        assert!(logs.contains("code=DispatchFailure"));
        assert!(logs.contains("orig_err=dns error"));
    }

    #[test]
    fn test_unclassified_logs_raw_message() {
        let (logs, _guard) = capture_logs();
        classify(&PublishFailure::Unclassified {
            message: "something odd".to_string(),
        });

        let logs = logs.contents();
        assert!(logs.contains("publish_failed"));
        assert!(logs.contains("error=something odd"));
    }
}
