#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for client operations.
///
/// Use this target for logging client initialization, configuration, and client-level errors.
pub const TRACING_TARGET_CLIENT: &str = "imagination_pubsub::client";

/// Tracing target for connection operations.
///
/// Use this target for logging connection establishment, reconnection, and connection errors.
pub const TRACING_TARGET_CONNECTION: &str = "imagination_pubsub::connection";

/// Tracing target for publish operations.
///
/// Use this target for logging message submission and delivery acknowledgements.
pub const TRACING_TARGET_PUBLISH: &str = "imagination_pubsub::publish";

mod channel;
mod client;
mod error;
mod transport;

pub use client::{PubSubClient, PubSubConfig};
pub use error::{Error, Result};
pub use imagination_events::MessageAttributes;
pub use transport::{JetStreamTransport, MessageTransport, OutgoingMessage};

#[doc(hidden)]
pub mod prelude;
