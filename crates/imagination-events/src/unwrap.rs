//! Unwrapping CloudEvents into typed payloads.

use cloudevents::{AttributesReader, Data, Event};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::{Error, MessagePublishedData, Result, TRACING_TARGET_DECODE};

/// Parses the event data as a [`MessagePublishedData`] wrapper.
///
/// JSON, string and binary event data are all accepted.
pub fn message_published_data(event: &Event) -> Result<MessagePublishedData> {
    let parsed = match event.data() {
        Some(Data::Json(value)) => MessagePublishedData::deserialize(value),
        Some(Data::String(text)) => serde_json::from_str(text),
        Some(Data::Binary(bytes)) => serde_json::from_slice(bytes),
        None => {
            return Err(Error::envelope(format!(
                "event '{}' carries no data",
                event.id()
            )));
        }
    };

    parsed.map_err(|e| {
        tracing::debug!(
            target: TRACING_TARGET_DECODE,
            event_id = %event.id(),
            event_type = %event.ty(),
            error = %e,
            "Event data is not a pubsub message wrapper"
        );
        Error::envelope(e.to_string())
    })
}

/// Extracts the Pub/Sub message from a CloudEvent and decodes its data as
/// JSON into `T`.
///
/// Fails with [`Error::Envelope`] when the event is not a message wrapper
/// and with [`Error::Payload`] when the message data does not decode as `T`.
pub fn event_to_struct<T: DeserializeOwned>(event: &Event) -> Result<T> {
    let wrapper = message_published_data(event)?;
    wrapper.message.decode()
}
