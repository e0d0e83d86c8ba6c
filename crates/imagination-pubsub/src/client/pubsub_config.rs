//! Connection settings for [`PubSubClient`](super::PubSubClient).

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const DEFAULT_CLIENT_NAME: &str = "imagination-pubsub";
const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_ACK_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_MAX_RECONNECTS: usize = 10;

/// Schemes `async-nats` can dial without extra features.
const SUPPORTED_SCHEMES: [&str; 2] = ["nats", "tls"];

/// Where the publisher connects and how long it waits on the server.
///
/// Only `url` and `token` are required; everything else has a default that
/// also applies when the field is missing from a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct PubSubConfig {
    /// Server address, e.g. `nats://localhost:4222`; comma-separated for a cluster
    #[cfg_attr(feature = "config", arg(long = "pubsub-url", env = "PUBSUB_URL"))]
    pub url: String,

    /// Token presented when connecting
    #[cfg_attr(feature = "config", arg(long = "pubsub-token", env = "PUBSUB_TOKEN"))]
    pub token: String,

    /// Connection name shown in server monitoring
    #[serde(default = "default_client_name")]
    #[cfg_attr(
        feature = "config",
        arg(long = "pubsub-client-name", env = "PUBSUB_CLIENT_NAME", default_value = DEFAULT_CLIENT_NAME)
    )]
    pub client_name: String,

    /// Milliseconds to wait for the initial connection
    #[serde(default = "default_connect_timeout_ms")]
    #[cfg_attr(
        feature = "config",
        arg(long = "pubsub-connect-timeout-ms", env = "PUBSUB_CONNECT_TIMEOUT_MS", default_value_t = DEFAULT_CONNECT_TIMEOUT_MS)
    )]
    pub connect_timeout_ms: u64,

    /// Milliseconds to wait for JetStream to acknowledge a published message
    #[serde(default = "default_ack_timeout_ms")]
    #[cfg_attr(
        feature = "config",
        arg(long = "pubsub-ack-timeout-ms", env = "PUBSUB_ACK_TIMEOUT_MS", default_value_t = DEFAULT_ACK_TIMEOUT_MS)
    )]
    pub ack_timeout_ms: u64,

    /// Reconnection attempts before the connection is given up; 0 retries forever
    #[serde(default = "default_max_reconnects")]
    #[cfg_attr(
        feature = "config",
        arg(long = "pubsub-max-reconnects", env = "PUBSUB_MAX_RECONNECTS", default_value_t = DEFAULT_MAX_RECONNECTS)
    )]
    pub max_reconnects: usize,
}

fn default_client_name() -> String {
    DEFAULT_CLIENT_NAME.to_owned()
}

fn default_connect_timeout_ms() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_MS
}

fn default_ack_timeout_ms() -> u64 {
    DEFAULT_ACK_TIMEOUT_MS
}

fn default_max_reconnects() -> usize {
    DEFAULT_MAX_RECONNECTS
}

impl PubSubConfig {
    /// Settings for `url` authenticated with `token`, defaults elsewhere.
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
            client_name: default_client_name(),
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            ack_timeout_ms: DEFAULT_ACK_TIMEOUT_MS,
            max_reconnects: DEFAULT_MAX_RECONNECTS,
        }
    }

    #[must_use]
    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout_ms = duration_ms(timeout);
        self
    }

    #[must_use]
    pub fn with_ack_timeout(mut self, timeout: Duration) -> Self {
        self.ack_timeout_ms = duration_ms(timeout);
        self
    }

    /// Caps reconnection attempts; 0 lifts the cap.
    #[must_use]
    pub fn with_max_reconnects(mut self, attempts: usize) -> Self {
        self.max_reconnects = attempts;
        self
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Upper bound on the wait for a `PublishAck`.
    pub fn ack_timeout(&self) -> Duration {
        Duration::from_millis(self.ack_timeout_ms)
    }

    /// Reconnection cap in the form `async-nats` expects, `None` for no cap.
    pub fn reconnect_limit(&self) -> Option<usize> {
        (self.max_reconnects > 0).then_some(self.max_reconnects)
    }

    /// Individual server addresses listed in `url`.
    pub fn server_addrs(&self) -> impl Iterator<Item = &str> {
        self.url.split(',').map(str::trim)
    }

    /// Rejects settings that cannot produce a working connection.
    pub fn validate(&self) -> Result<()> {
        for addr in self.server_addrs() {
            check_server_addr(addr)?;
        }

        if self.token.is_empty() {
            return Err(Error::invalid_config("token must not be empty"));
        }
        if self.connect_timeout_ms == 0 {
            return Err(Error::invalid_config("connect timeout must be positive"));
        }
        if self.ack_timeout_ms == 0 {
            return Err(Error::invalid_config("ack timeout must be positive"));
        }

        Ok(())
    }
}

fn check_server_addr(addr: &str) -> Result<()> {
    let Some((scheme, host)) = addr.split_once("://") else {
        return Err(Error::invalid_config(format!(
            "server address '{addr}' has no scheme; expected nats:// or tls://"
        )));
    };

    if !SUPPORTED_SCHEMES.contains(&scheme) {
        return Err(Error::invalid_config(format!(
            "unsupported scheme '{scheme}' in server address '{addr}'"
        )));
    }
    if host.is_empty() {
        return Err(Error::invalid_config(format!(
            "server address '{addr}' has no host"
        )));
    }

    Ok(())
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
