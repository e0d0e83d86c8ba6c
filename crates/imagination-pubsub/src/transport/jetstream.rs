//! JetStream-backed [`MessageTransport`].

use std::time::Duration;

use async_nats::HeaderMap;
use async_nats::jetstream::Context;
use tokio::time::timeout;

use super::{MessageTransport, OutgoingMessage};
use crate::{Error, Result, TRACING_TARGET_PUBLISH};

/// Publishes through a JetStream context and awaits the server's `PublishAck`.
#[derive(Debug, Clone)]
pub struct JetStreamTransport {
    jetstream: Context,
    ack_timeout: Duration,
}

impl JetStreamTransport {
    /// Wraps a JetStream context, bounding each acknowledgement wait.
    pub fn new(jetstream: Context, ack_timeout: Duration) -> Self {
        Self {
            jetstream,
            ack_timeout,
        }
    }
}

#[async_trait::async_trait]
impl MessageTransport for JetStreamTransport {
    #[tracing::instrument(
        skip(self, message),
        fields(channel = %message.channel, payload_size = message.payload.len()),
        target = TRACING_TARGET_PUBLISH
    )]
    async fn publish(&self, message: OutgoingMessage) -> Result<()> {
        let OutgoingMessage {
            channel,
            payload,
            attributes,
        } = message;

        let submitted = if attributes.is_empty() {
            self.jetstream.publish(channel.clone(), payload).await
        } else {
            let mut headers = HeaderMap::new();
            for (key, value) in attributes.iter() {
                headers.insert(key.as_str(), value.as_str());
            }
            self.jetstream
                .publish_with_headers(channel.clone(), headers, payload)
                .await
        };
        let ack_future = submitted.map_err(|e| Error::delivery_failed(&channel, e.to_string()))?;

        let ack = timeout(self.ack_timeout, ack_future)
            .await
            .map_err(|_| {
                Error::delivery_failed(
                    &channel,
                    format!("no acknowledgement within {:?}", self.ack_timeout),
                )
            })?
            .map_err(|e| Error::delivery_failed(&channel, e.to_string()))?;

        tracing::debug!(
            target: TRACING_TARGET_PUBLISH,
            channel = %channel,
            stream = %ack.stream,
            sequence = ack.sequence,
            duplicate = ack.duplicate,
            "Message acknowledged"
        );
        Ok(())
    }
}
