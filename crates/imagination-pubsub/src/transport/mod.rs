//! The seam between JSON encoding and the wire.

use std::fmt;

use bytes::Bytes;

use crate::{MessageAttributes, Result};

mod jetstream;

pub use jetstream::JetStreamTransport;

/// An encoded message ready to be handed to a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMessage {
    /// Channel (subject) the message is delivered to.
    pub channel: String,
    /// Encoded message body.
    pub payload: Bytes,
    /// Attributes carried alongside the body.
    pub attributes: MessageAttributes,
}

impl OutgoingMessage {
    /// Creates a message without attributes.
    pub fn new(channel: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        Self {
            channel: channel.into(),
            payload: payload.into(),
            attributes: MessageAttributes::new(),
        }
    }

    /// Attaches attributes to the message.
    #[must_use]
    pub fn with_attributes(mut self, attributes: MessageAttributes) -> Self {
        self.attributes = attributes;
        self
    }
}

/// Delivers encoded messages and confirms their delivery.
///
/// Implementations must only return `Ok` once the backend has acknowledged
/// the message.
#[async_trait::async_trait]
pub trait MessageTransport: fmt::Debug + Send + Sync + 'static {
    /// Submits the message and waits for the delivery acknowledgement.
    async fn publish(&self, message: OutgoingMessage) -> Result<()>;
}
