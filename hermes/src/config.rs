//! Command line and environment configuration.

use clap::Parser;

use crate::error::ConfigError;
use crate::topic::TopicArn;

/// Default limit on inbound request bodies (2 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Webhook to SNS bridge.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Config {
    /// SNS Topic ARN
    pub topic: String,

    /// Enable debug mode. Logs every request body in full, unredacted, so
    /// payloads containing secrets end up in the logs.
    #[arg(short, long, env = "HERMES_DEBUG")]
    pub debug: bool,

    /// Port for the web server to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Override the SNS endpoint, e.g. for a local emulator
    #[arg(long, env = "HERMES_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Largest request body accepted, in bytes
    #[arg(long, env = "HERMES_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,
}

impl Config {
    /// Parse the configured topic ARN.
    pub fn topic_arn(&self) -> Result<TopicArn, ConfigError> {
        TopicArn::parse(&self.topic)
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}
