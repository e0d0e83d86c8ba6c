//! Messaging client wrapper and connection management.
//!
//! [`PubSubClient`] is cheap to clone. Clones share the same transport, and
//! for JetStream the same multiplexed TCP connection.

use std::sync::Arc;
use std::time::Duration;

use async_nats::{ConnectOptions, jetstream};
use serde::Serialize;
use tokio::time::timeout;

use super::pubsub_config::PubSubConfig;
use crate::channel::check_channel;
use crate::transport::{JetStreamTransport, MessageTransport, OutgoingMessage};
use crate::{
    Error, MessageAttributes, Result, TRACING_TARGET_CLIENT, TRACING_TARGET_CONNECTION,
    TRACING_TARGET_PUBLISH,
};

const PING_INTERVAL: Duration = Duration::from_secs(30);
const RECONNECT_BASE_DELAY: Duration = Duration::from_secs(2);
const RECONNECT_MAX_DELAY: Duration = Duration::from_secs(30);

/// Exponential backoff between reconnection attempts, capped at
/// [`RECONNECT_MAX_DELAY`].
fn reconnect_delay(attempts: usize) -> Duration {
    let factor = 2_u32.saturating_pow(u32::try_from(attempts).unwrap_or(u32::MAX));
    RECONNECT_BASE_DELAY
        .saturating_mul(factor)
        .min(RECONNECT_MAX_DELAY)
}

/// Publishes JSON-encoded values to named channels.
#[derive(Debug, Clone)]
pub struct PubSubClient {
    transport: Arc<dyn MessageTransport>,
}

impl PubSubClient {
    /// Connect to NATS and publish through JetStream.
    #[tracing::instrument(skip(config), target = TRACING_TARGET_CLIENT)]
    pub async fn connect(config: PubSubConfig) -> Result<Self> {
        config.validate()?;
        tracing::info!(
            target: TRACING_TARGET_CONNECTION,
            servers = %config.url,
            client_name = %config.client_name,
            "Connecting to NATS servers"
        );

        let mut connect_opts = ConnectOptions::new()
            .name(&config.client_name)
            .ping_interval(PING_INTERVAL)
            .connection_timeout(config.connect_timeout())
            .token(config.token.clone())
            .reconnect_delay_callback(reconnect_delay);

        if let Some(limit) = config.reconnect_limit() {
            connect_opts = connect_opts.max_reconnects(limit);
        }

        let connect_timeout = config.connect_timeout();
        let client = timeout(
            connect_timeout,
            async_nats::connect_with_options(config.url.as_str(), connect_opts),
        )
        .await
        .map_err(|_| Error::timeout(connect_timeout))?
        .map_err(|e| Error::Connection(Box::new(e)))?;

        let server_info = client.server_info();
        tracing::info!(
            target: TRACING_TARGET_CONNECTION,
            server_host = %server_info.host,
            server_version = %server_info.version,
            max_payload = server_info.max_payload,
            "Successfully connected to NATS"
        );

        let transport = JetStreamTransport::new(jetstream::new(client), config.ack_timeout());
        Ok(Self::with_transport(transport))
    }

    /// Publish through an arbitrary transport.
    pub fn with_transport(transport: impl MessageTransport) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Serialize `object` to JSON and publish it to `channel`, returning once
    /// delivery has been acknowledged.
    pub async fn publish_message<T>(&self, channel: &str, object: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.publish_message_with_attributes(channel, object, MessageAttributes::new())
            .await
    }

    /// Same as [`publish_message`](Self::publish_message), attaching
    /// `attributes` to the message.
    #[tracing::instrument(skip(self, object, attributes), target = TRACING_TARGET_PUBLISH)]
    pub async fn publish_message_with_attributes<T>(
        &self,
        channel: &str,
        object: &T,
        attributes: MessageAttributes,
    ) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        check_channel(channel)?;
        let payload =
            serde_json::to_vec(object).map_err(|source| Error::serialization(channel, source))?;
        let payload_size = payload.len();

        let message = OutgoingMessage::new(channel, payload).with_attributes(attributes);
        self.transport.publish(message).await?;

        tracing::debug!(
            target: TRACING_TARGET_PUBLISH,
            channel = %channel,
            payload_size,
            "Published message"
        );
        Ok(())
    }
}
