//! Google Cloud Storage provider using [`object_store::gcp::GoogleCloudStorageBuilder`].

use std::sync::Arc;

use object_store::ObjectStore;
use object_store::gcp::GoogleCloudStorageBuilder;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{BucketCache, BucketProvider};
use crate::{Error, Result};

/// Typed credentials for Google Cloud Storage.
///
/// Unset fields fall back to the `GOOGLE_*` environment variables and
/// application default credentials.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GcsCredentials {
    /// Contents of a JSON service account key.
    #[serde(default)]
    pub service_account_key: Option<String>,
    /// Base URL of a GCS-compatible server (e.g. `http://localhost:4443`
    /// for fake-gcs-server).
    ///
    /// Without a service account key the server is called anonymously.
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl GcsCredentials {
    /// The service account key handed to the builder.
    ///
    /// `object_store` reads a custom base URL from the `gcs_base_url` field
    /// of the key, so an endpoint is merged into the given key, or into an
    /// anonymous key with OAuth disabled.
    fn effective_key(&self) -> serde_json::Result<Option<String>> {
        let Some(endpoint) = &self.endpoint else {
            return Ok(self.service_account_key.clone());
        };

        let mut key = match &self.service_account_key {
            Some(key) => serde_json::from_str::<Map<String, Value>>(key)?,
            None => anonymous_key(),
        };
        key.insert("gcs_base_url".to_owned(), Value::from(endpoint.as_str()));

        serde_json::to_string(&key).map(Some)
    }
}

fn anonymous_key() -> Map<String, Value> {
    let mut key = Map::new();
    key.insert("client_email".to_owned(), Value::from(""));
    key.insert("private_key".to_owned(), Value::from(""));
    key.insert("private_key_id".to_owned(), Value::from(""));
    key.insert("disable_oauth".to_owned(), Value::from(true));
    key
}

/// Google Cloud Storage-backed bucket provider.
///
/// Builds one store per bucket and reuses it for later calls.
#[derive(Debug, Default)]
pub struct GcsProvider {
    credentials: GcsCredentials,
    buckets: BucketCache,
}

impl GcsProvider {
    const ID: &str = "gcs";

    /// Create a provider with explicit credentials.
    pub fn new(credentials: GcsCredentials) -> Self {
        Self {
            credentials,
            buckets: BucketCache::default(),
        }
    }

    fn build(&self, bucket: &str) -> Result<Arc<dyn ObjectStore>> {
        let mut builder = GoogleCloudStorageBuilder::from_env().with_bucket_name(bucket);

        let key = self
            .credentials
            .effective_key()
            .map_err(|e| Error::provider(Self::ID, bucket, format!("invalid service account key: {e}")))?;
        if let Some(key) = key {
            builder = builder.with_service_account_key(key);
        }

        let store = builder
            .build()
            .map_err(|e| Error::provider(Self::ID, bucket, e.to_string()))?;

        Ok(Arc::new(store))
    }
}

impl BucketProvider for GcsProvider {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn bucket(&self, bucket: &str) -> Result<Arc<dyn ObjectStore>> {
        self.buckets.get_or_build(bucket, || self.build(bucket))
    }
}
