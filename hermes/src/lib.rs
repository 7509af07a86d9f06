//! Hermes - webhook to SNS bridge.
//!
//! Accepts HTTP event notifications and republishes each payload unchanged
//! onto a single SNS topic, counting received and failed requests.
//!
//! ## Architecture
//!
//! ```text
//! POST /event → web::handlers::event → Publisher (SNS) → 204 / 500 / 502
//!                        ↓
//!                     Metrics → GET /metrics
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod metrics;
pub mod publish;
pub mod topic;
pub mod web;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::Config;
pub use error::{ConfigError, PublishFailure};
pub use metrics::Metrics;
pub use publish::{MessageAck, Publisher, SnsPublisher};
pub use topic::TopicArn;
pub use web::{router, AppState};
