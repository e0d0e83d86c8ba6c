//! Convenience re-exports.

pub use crate::{
    Error, MessageAttributes, MessagePublishedData, PubsubMessage, Result, event_to_struct,
    message_published_data,
};
