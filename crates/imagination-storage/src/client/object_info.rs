//! Descriptive attributes of a stored object.

use object_store::{Attribute, Attributes, ObjectMeta};

use crate::ObjectMetadata;

/// Content-type, size and user metadata of a stored object.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectInfo {
    /// Size of the object body in bytes.
    pub size: u64,
    /// MIME content-type, if the object has one.
    pub content_type: Option<String>,
    /// User-defined metadata.
    pub metadata: ObjectMetadata,
}

impl ObjectInfo {
    pub(crate) fn from_parts(meta: &ObjectMeta, attributes: &Attributes) -> Self {
        Self {
            size: meta.size,
            content_type: attributes
                .get(&Attribute::ContentType)
                .map(|v| v.to_string()),
            metadata: ObjectMetadata::from_attributes(attributes),
        }
    }
}
