//! In-process provider for tests and local development.

use std::sync::Arc;

use object_store::ObjectStore;
use object_store::memory::InMemory;

use super::{BucketCache, BucketProvider};
use crate::Result;

/// Keeps one [`InMemory`] store per bucket name for the provider's lifetime.
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    buckets: BucketCache,
}

impl InMemoryProvider {
    /// Create a provider with no buckets.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BucketProvider for InMemoryProvider {
    fn id(&self) -> &'static str {
        "memory"
    }

    fn bucket(&self, bucket: &str) -> Result<Arc<dyn ObjectStore>> {
        self.buckets.get_or_build(bucket, || {
            let store: Arc<dyn ObjectStore> = Arc::new(InMemory::new());
            Ok(store)
        })
    }
}
