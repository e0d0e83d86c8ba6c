#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for object operations.
///
/// Use this target for logging uploads, downloads, and object-related errors.
pub const TRACING_TARGET_OBJECT: &str = "imagination_storage::object";

/// Tracing target for schema operations.
///
/// Use this target for logging schema validation and schema tag checks.
pub const TRACING_TARGET_SCHEMA: &str = "imagination_storage::schema";

mod client;
mod error;
mod metadata;
/// Bucket providers for the supported storage backends.
pub mod providers;
mod schema;

pub use client::{ObjectInfo, StorageClient};
pub use error::{Error, Result};
pub use metadata::ObjectMetadata;
pub use providers::{BucketProvider, GcsProvider, InMemoryProvider, S3Provider};
pub use schema::{SCHEMA_REF_KEY, SchemaProvider, SchemaViolation, schema_name, validate};

#[doc(hidden)]
pub mod prelude;
