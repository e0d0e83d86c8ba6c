//! User-defined object metadata.

use std::borrow::Cow;
use std::collections::HashMap;

use derive_more::{Deref, DerefMut, From, Into};
use object_store::{Attribute, AttributeValue, Attributes};
use serde::{Deserialize, Serialize};

/// Flat string key-value metadata stored alongside an object.
///
/// Maps onto [`Attribute::Metadata`] entries of the backing store.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(Serialize, Deserialize, Deref, DerefMut, From, Into)]
#[serde(transparent)]
pub struct ObjectMetadata {
    #[deref]
    #[deref_mut]
    entries: HashMap<String, String>,
}

impl ObjectMetadata {
    /// Creates empty metadata.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an entry, returning the updated metadata.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Gets an entry by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Collects the metadata entries out of store attributes.
    pub fn from_attributes(attributes: &Attributes) -> Self {
        let entries = attributes
            .iter()
            .filter_map(|(attribute, value)| match attribute {
                Attribute::Metadata(key) => Some((key.to_string(), value.to_string())),
                _ => None,
            })
            .collect();
        Self { entries }
    }

    /// Converts the entries into store attributes.
    pub fn into_attributes(self) -> Attributes {
        let mut attributes = Attributes::new();
        for (key, value) in self.entries {
            attributes.insert(
                Attribute::Metadata(Cow::Owned(key)),
                AttributeValue::from(value),
            );
        }
        attributes
    }
}
