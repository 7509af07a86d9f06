//! Publisher abstraction over the downstream pub/sub service.
//!
//! The HTTP layer only ever talks to a [`Publisher`]; the SNS binding lives in
//! [`sns`] and tests substitute recording stubs.

pub mod sns;

use async_trait::async_trait;

use crate::error::PublishFailure;
use crate::topic::TopicArn;

pub use sns::SnsPublisher;

/// Delivery acknowledgment returned by a successful publish.
///
/// The bridge does not act on it beyond logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageAck {
    pub message_id: Option<String>,
}

/// Hands one message to the pub/sub backend.
///
/// Implementations must be safe to call from many request handlers at once.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publish `message` unchanged to `topic`.
    async fn publish(&self, topic: &TopicArn, message: &[u8]) -> Result<MessageAck, PublishFailure>;
}
