//! Error types for envelope decoding.

/// Result type for all envelope operations in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type for envelope decoding.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The event could not be interpreted as a Pub/Sub message wrapper.
    #[error("failed to parse pubsub message wrapper: {reason}")]
    Envelope { reason: String },

    /// The inner message data is not valid JSON for the requested type.
    #[error("failed to unmarshal message: {0}")]
    Payload(#[source] serde_json::Error),
}

impl Error {
    /// Create an envelope error
    pub fn envelope(reason: impl Into<String>) -> Self {
        Self::Envelope {
            reason: reason.into(),
        }
    }
}
