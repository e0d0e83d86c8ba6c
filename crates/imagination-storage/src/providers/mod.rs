//! Bucket providers resolving bucket names to object store backends.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use object_store::ObjectStore;

use crate::Result;

mod gcs;
mod memory;
mod s3;

pub use gcs::{GcsCredentials, GcsProvider};
pub use memory::InMemoryProvider;
pub use s3::{S3Credentials, S3Provider};

/// Factory for the object store backing a named bucket.
///
/// Implementations handle credential configuration and client construction
/// for a specific backend (e.g. GCS, S3).
pub trait BucketProvider: fmt::Debug + Send + Sync + 'static {
    /// Unique identifier (e.g. "gcs", "s3").
    fn id(&self) -> &'static str;

    /// Returns a store scoped to `bucket`.
    fn bucket(&self, bucket: &str) -> Result<Arc<dyn ObjectStore>>;
}

/// Stores already built by a provider, keyed by bucket name.
///
/// Each bucket is built once so its HTTP client and credential provider are
/// shared by every call addressing that bucket.
#[derive(Debug, Default)]
struct BucketCache {
    stores: Mutex<HashMap<String, Arc<dyn ObjectStore>>>,
}

impl BucketCache {
    /// Returns the cached store for `bucket`, building it on first use.
    ///
    /// A failed build is not cached.
    fn get_or_build<F>(&self, bucket: &str, build: F) -> Result<Arc<dyn ObjectStore>>
    where
        F: FnOnce() -> Result<Arc<dyn ObjectStore>>,
    {
        let mut stores = self.stores.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(store) = stores.get(bucket) {
            return Ok(Arc::clone(store));
        }

        let store = build()?;
        stores.insert(bucket.to_owned(), Arc::clone(&store));
        Ok(store)
    }
}
