//! Convenience re-exports.

pub use crate::providers::{
    BucketProvider, GcsCredentials, GcsProvider, InMemoryProvider, S3Credentials, S3Provider,
};
pub use crate::{
    Error, ObjectInfo, ObjectMetadata, Result, SCHEMA_REF_KEY, SchemaProvider, StorageClient,
};
