//! Destination topic identifier.
//!
//! A topic ARN has the shape
//! `arn:partition:service:region:account:resource`, for example
//! `arn:aws:sns:us-west-2:123456789012:my-topic`. The region is read once at
//! startup and never changes afterwards.

use std::fmt;

use crate::error::ConfigError;

/// Number of `:`-delimited segments a topic ARN must have.
const ARN_SEGMENTS: usize = 6;

/// Index of the region segment.
const REGION_INDEX: usize = 3;

/// Parsed, immutable topic ARN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicArn {
    arn: String,
    region: String,
}

impl TopicArn {
    /// Parse a topic ARN, resolving its region.
    pub fn parse(arn: &str) -> Result<Self, ConfigError> {
        let parts: Vec<&str> = arn.split(':').collect();
        if parts.len() != ARN_SEGMENTS {
            return Err(ConfigError::MalformedTopicArn {
                arn: arn.to_string(),
                segments: parts.len(),
            });
        }

        Ok(Self {
            arn: arn.to_string(),
            region: parts[REGION_INDEX].to_string(),
        })
    }

    /// Full ARN as supplied at startup.
    pub fn as_str(&self) -> &str {
        &self.arn
    }

    /// Region segment of the ARN.
    pub fn region(&self) -> &str {
        &self.region
    }
}

impl fmt::Display for TopicArn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.arn)
    }
}

/// Resolve the region of a topic ARN without keeping the parsed value.
pub fn resolve_region(arn: &str) -> Result<String, ConfigError> {
    TopicArn::parse(arn).map(|topic| topic.region)
}
