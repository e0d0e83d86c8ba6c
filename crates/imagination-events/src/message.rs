//! Pub/Sub message shapes carried inside CloudEvents.
//!
//! These mirror `google.events.cloud.pubsub.v1.MessagePublishedData` and
//! `google.events.cloud.pubsub.v1.PubsubMessage`, limited to the fields
//! needed to decode business payloads.

use jiff::Timestamp;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{Error, MessageAttributes, Result};

/// The CloudEvent data wrapper for a published Pub/Sub message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagePublishedData {
    /// The published message.
    pub message: PubsubMessage,
    /// Resource name of the subscription that delivered the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<String>,
}

/// A Pub/Sub message as delivered inside an event.
///
/// `data` is base64 on the wire and raw bytes here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PubsubMessage {
    #[serde(default)]
    pub attributes: MessageAttributes,
    #[serde(default, with = "base64_data")]
    pub data: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_time: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordering_key: Option<String>,
}

impl PubsubMessage {
    /// Decodes the message data as JSON into `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.data).map_err(Error::Payload)
    }
}

mod base64_data {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
