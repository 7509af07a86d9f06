//! Error types shared across the bridge.

use thiserror::Error;

/// Startup configuration errors. These are fatal: the process must not bind
/// its listener when one is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Topic ARN does not split into exactly six `:`-delimited segments.
    #[error("could not infer AWS region from ARN {arn:?}: expected 6 segments, found {segments}")]
    MalformedTopicArn { arn: String, segments: usize },
}

/// Why a publish did not produce an acknowledgment.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PublishFailure {
    /// The remote service received the call and answered with an error.
    #[error("{code}: {message} (status {status}, request id {request_id:?})")]
    RemoteFailure {
        code: String,
        status: u16,
        request_id: Option<String>,
        message: String,
    },

    /// The call failed before a structured service response was available:
    /// connectivity, credentials, malformed parameters.
    #[error("{code}: {message}")]
    ClientError { code: String, message: String },

    /// Anything that fits neither shape above.
    #[error("{message}")]
    Unclassified { message: String },
}

impl PublishFailure {
    /// Short label for the failure kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            PublishFailure::RemoteFailure { .. } => "remote_failure",
            PublishFailure::ClientError { .. } => "client_error",
            PublishFailure::Unclassified { .. } => "unclassified",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_arn_message_names_segment_count() {
        let err = ConfigError::MalformedTopicArn {
            arn: "bad-arn".to_string(),
            segments: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("bad-arn"));
        assert!(msg.contains("found 1"));
    }

    #[test]
    fn test_publish_failure_kind_labels() {
        let remote = PublishFailure::RemoteFailure {
            code: "NotFound".to_string(),
            status: 404,
            request_id: Some("req-1".to_string()),
            message: "Topic does not exist".to_string(),
        };
        let client = PublishFailure::ClientError {
            code: "DispatchFailure".to_string(),
            message: "connection refused".to_string(),
        };
        let other = PublishFailure::Unclassified {
            message: "boom".to_string(),
        };

        assert_eq!(remote.kind(), "remote_failure");
        assert_eq!(client.kind(), "client_error");
        assert_eq!(other.kind(), "unclassified");
        assert_eq!(other.to_string(), "boom");
    }
}
