//! Prelude module for imagination-pubsub.
//!
//! Re-exports the most commonly used types so a single `use` is enough.
//!
//! ```rust,ignore
//! use imagination_pubsub::prelude::*;
//!
//! let client = PubSubClient::connect(PubSubConfig::new("nats://localhost:4222", "token")).await?;
//! ```

pub use crate::client::{PubSubClient, PubSubConfig};
pub use crate::transport::{JetStreamTransport, MessageTransport, OutgoingMessage};
pub use crate::{Error, MessageAttributes, Result};
