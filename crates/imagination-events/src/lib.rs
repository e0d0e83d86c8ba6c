#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for envelope decoding.
///
/// Use this target for logging wrapper parsing and payload decoding failures.
pub const TRACING_TARGET_DECODE: &str = "imagination_events::decode";

mod attributes;
mod error;
mod message;
mod unwrap;

pub use attributes::MessageAttributes;
pub use error::{Error, Result};
pub use message::{MessagePublishedData, PubsubMessage};
pub use unwrap::{event_to_struct, message_published_data};

#[doc(hidden)]
pub mod prelude;
