//! Client connection management and configuration.

mod pubsub_client;
mod pubsub_config;

pub use pubsub_client::PubSubClient;
pub use pubsub_config::PubSubConfig;
