//! String attributes attached to a Pub/Sub message.

use std::collections::HashMap;

use derive_more::{Deref, DerefMut, From, Into};
use serde::{Deserialize, Serialize};

/// Key-value attributes published alongside a message body.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(Serialize, Deserialize, Deref, DerefMut, From, Into)]
#[serde(transparent)]
pub struct MessageAttributes {
    #[deref]
    #[deref_mut]
    attributes: HashMap<String, String>,
}

impl MessageAttributes {
    /// Creates an empty attribute set.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of an attribute.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Sets an attribute, returning the updated set.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}
