//! Error types and utilities for publish operations.

use std::time::Duration;

/// Result type for all publish operations in this crate.
///
/// This is a convenience type alias that defaults to using [`Error`] as the error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type for publish operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Client/connection setup errors
    #[error("creating pubsub client: {0}")]
    Connection(#[source] async_nats::Error),

    /// Value could not be encoded as JSON
    #[error("marshaling message for channel '{channel}': {source}")]
    Serialization {
        channel: String,
        #[source]
        source: serde_json::Error,
    },

    /// Channel is not a subject that can be published to
    #[error("invalid channel '{channel}': {reason}")]
    InvalidChannel { channel: String, reason: String },

    /// The transport rejected the message or did not confirm delivery
    #[error("publishing message to channel '{channel}': {reason}")]
    DeliveryFailed { channel: String, reason: String },

    /// Operation timeout
    #[error("operation timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    /// Invalid configuration
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl Error {
    /// Create a delivery failed error
    pub fn delivery_failed(channel: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DeliveryFailed {
            channel: channel.into(),
            reason: reason.into(),
        }
    }

    /// Create a serialization error for a message bound to `channel`
    pub fn serialization(channel: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            channel: channel.into(),
            source,
        }
    }

    /// Create an invalid channel error
    pub fn invalid_channel(channel: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidChannel {
            channel: channel.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create a timeout error with the given duration
    pub fn timeout(duration: Duration) -> Self {
        Self::Timeout { timeout: duration }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_failed_names_channel() {
        let err = Error::delivery_failed("orders.placed", "no responders");
        assert_eq!(
            err.to_string(),
            "publishing message to channel 'orders.placed': no responders"
        );
    }

    #[test]
    fn serialization_names_channel() {
        let source = serde_json::from_str::<u8>("300").unwrap_err();
        let err = Error::serialization("orders.placed", source);
        assert!(
            err.to_string()
                .starts_with("marshaling message for channel 'orders.placed': "),
            "{err}"
        );
    }

    #[test]
    fn timeout_formats_duration() {
        let err = Error::timeout(Duration::from_secs(3));
        assert_eq!(err.to_string(), "operation timed out after 3s");
    }
}
