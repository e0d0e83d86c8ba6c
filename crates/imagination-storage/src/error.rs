//! Error types for storage operations.

use std::io;

use crate::schema::SchemaViolation;

/// Result type for all storage operations in this crate.
///
/// This is a convenience type alias that defaults to using [`Error`] as the error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type for storage operations.
///
/// Every variant that touches the store names the bucket and object involved.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The backend for a bucket could not be constructed
    #[error("creating {provider} client for bucket '{bucket}': {reason}")]
    Provider {
        provider: &'static str,
        bucket: String,
        reason: String,
    },

    /// Value could not be encoded to or decoded from JSON
    #[error("json for '{bucket}/{name}': {source}")]
    Serialization {
        bucket: String,
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Value does not satisfy its own schema
    #[error("validating '{bucket}/{name}': {source}")]
    SchemaValidation {
        bucket: String,
        name: String,
        #[source]
        source: SchemaViolation,
    },

    /// Schema has no name to tag objects with
    #[error("schema for '{bucket}/{name}' has no name; only named schemas (record, enum, fixed) can tag objects")]
    UnnamedSchema { bucket: String, name: String },

    /// Stored schema tag does not match the expected schema, or is missing
    #[error("schema mismatch or missing {key} for '{bucket}/{name}': have={have:?} want={want:?}", key = crate::SCHEMA_REF_KEY)]
    SchemaMismatch {
        bucket: String,
        name: String,
        have: String,
        want: String,
    },

    /// Streaming content into the object failed
    #[error("copying content to '{bucket}/{name}': {source}")]
    Write {
        bucket: String,
        name: String,
        #[source]
        source: io::Error,
    },

    /// Committing the object failed
    #[error("closing writer for '{bucket}/{name}': {source}")]
    Finalize {
        bucket: String,
        name: String,
        #[source]
        source: io::Error,
    },

    /// The object does not exist
    #[error("object '{name}' not found in bucket '{bucket}'")]
    NotFound { bucket: String, name: String },

    /// Fetching object metadata failed
    #[error("getting attrs for '{bucket}/{name}': {source}")]
    Metadata {
        bucket: String,
        name: String,
        #[source]
        source: object_store::Error,
    },

    /// Opening or reading the object body failed
    #[error("reading '{bucket}/{name}': {source}")]
    Read {
        bucket: String,
        name: String,
        #[source]
        source: object_store::Error,
    },
}

impl Error {
    /// Create a provider construction error
    pub fn provider(provider: &'static str, bucket: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Provider {
            provider,
            bucket: bucket.into(),
            reason: reason.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(bucket: &str, name: &str, source: serde_json::Error) -> Self {
        Self::Serialization {
            bucket: bucket.to_owned(),
            name: name.to_owned(),
            source,
        }
    }

    /// Create a schema validation error
    pub fn schema_validation(bucket: &str, name: &str, source: SchemaViolation) -> Self {
        Self::SchemaValidation {
            bucket: bucket.to_owned(),
            name: name.to_owned(),
            source,
        }
    }

    /// Create an unnamed schema error
    pub fn unnamed_schema(bucket: &str, name: &str) -> Self {
        Self::UnnamedSchema {
            bucket: bucket.to_owned(),
            name: name.to_owned(),
        }
    }

    /// Create a write error
    pub fn write(bucket: &str, name: &str, source: io::Error) -> Self {
        Self::Write {
            bucket: bucket.to_owned(),
            name: name.to_owned(),
            source,
        }
    }

    /// Create a finalize error
    pub fn finalize(bucket: &str, name: &str, source: io::Error) -> Self {
        Self::Finalize {
            bucket: bucket.to_owned(),
            name: name.to_owned(),
            source,
        }
    }

    /// Create a metadata error, mapping a missing object to [`Error::NotFound`]
    pub fn metadata(bucket: &str, name: &str, source: object_store::Error) -> Self {
        match source {
            object_store::Error::NotFound { .. } => Self::not_found(bucket, name),
            source => Self::Metadata {
                bucket: bucket.to_owned(),
                name: name.to_owned(),
                source,
            },
        }
    }

    /// Create a read error, mapping a missing object to [`Error::NotFound`]
    pub fn read(bucket: &str, name: &str, source: object_store::Error) -> Self {
        match source {
            object_store::Error::NotFound { .. } => Self::not_found(bucket, name),
            source => Self::Read {
                bucket: bucket.to_owned(),
                name: name.to_owned(),
                source,
            },
        }
    }

    /// Create an object not found error
    pub fn not_found(bucket: &str, name: &str) -> Self {
        Self::NotFound {
            bucket: bucket.to_owned(),
            name: name.to_owned(),
        }
    }

    /// Whether the error means the object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
