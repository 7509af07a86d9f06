//! SNS-backed [`Publisher`].

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sns::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_sns::operation::publish::PublishError;
use aws_sdk_sns::operation::RequestId;
use aws_sdk_sns::Client;
use tracing::info;

use super::{MessageAck, Publisher};
use crate::error::PublishFailure;
use crate::topic::TopicArn;

/// Headers SNS may carry its request id in.
const REQUEST_ID_HEADERS: [&str; 2] = ["x-amzn-requestid", "x-amz-request-id"];

/// Publishes messages to an SNS topic.
///
/// The underlying client is cheap to clone and safe to share between tasks.
#[derive(Clone, Debug)]
pub struct SnsPublisher {
    client: Client,
}

impl SnsPublisher {
    /// Build a publisher for `region`, loading credentials from the default
    /// provider chain. `endpoint_url` points the client at an alternative
    /// endpoint such as a local emulator.
    pub async fn new(region: &str, endpoint_url: Option<&str>) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_string()));
        if let Some(url) = endpoint_url {
            loader = loader.endpoint_url(url);
        }
        let sdk_config = loader.load().await;

        info!(
            region = %region,
            endpoint_url = ?endpoint_url,
            "sns_publisher_created"
        );

        Self::from_client(Client::new(&sdk_config))
    }

    /// Wrap an already configured client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Publisher for SnsPublisher {
    async fn publish(&self, topic: &TopicArn, message: &[u8]) -> Result<MessageAck, PublishFailure> {
        // SNS messages are strings; refuse to rewrite a body that is not text.
        let message = std::str::from_utf8(message).map_err(|e| PublishFailure::ClientError {
            code: "InvalidParameter".to_string(),
            message: format!("message body is not valid UTF-8: {e}"),
        })?;

        let output = self
            .client
            .publish()
            .topic_arn(topic.as_str())
            .message(message)
            .send()
            .await
            .map_err(failure_from_sdk)?;

        Ok(MessageAck {
            message_id: output.message_id().map(str::to_string),
        })
    }
}

/// Translate an SDK error into the bridge's failure taxonomy.
fn failure_from_sdk(err: SdkError<PublishError>) -> PublishFailure {
    let client_error = |code: &str, err: &SdkError<PublishError>| PublishFailure::ClientError {
        code: code.to_string(),
        message: DisplayErrorContext(err).to_string(),
    };

    match &err {
        SdkError::ServiceError(ctx) => {
            let service_err = ctx.err();
            PublishFailure::RemoteFailure {
                code: service_err.code().unwrap_or("Unknown").to_string(),
                status: ctx.raw().status().as_u16(),
                request_id: service_err.request_id().map(str::to_string),
                message: service_err.message().unwrap_or_default().to_string(),
            }
        }
        SdkError::ConstructionFailure(_) => client_error("ConstructionFailure", &err),
        SdkError::TimeoutError(_) => client_error("TimeoutError", &err),
        SdkError::DispatchFailure(_) => client_error("DispatchFailure", &err),
        // SNS answered but the body could not be parsed: still a remote failure.
        SdkError::ResponseError(ctx) => {
            let headers = ctx.raw().headers();
            PublishFailure::RemoteFailure {
                code: "SerializationError".to_string(),
                status: ctx.raw().status().as_u16(),
                request_id: REQUEST_ID_HEADERS
                    .iter()
                    .find_map(|name| headers.get(*name))
                    .map(str::to_string),
                message: DisplayErrorContext(&err).to_string(),
            }
        }
        _ => PublishFailure::Unclassified {
            message: DisplayErrorContext(&err).to_string(),
        },
    }
}
