//! S3-compatible provider using [`object_store::aws::AmazonS3Builder`].
//!
//! Works with AWS S3, MinIO, and any S3-compatible service.

use std::sync::Arc;

use object_store::ObjectStore;
use object_store::aws::AmazonS3Builder;
use serde::{Deserialize, Serialize};

use super::{BucketCache, BucketProvider};
use crate::{Error, Result};

/// Typed credentials for S3-compatible provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Credentials {
    /// AWS region (defaults to `us-east-1`).
    #[serde(default = "default_region")]
    pub region: String,
    /// Endpoint URL (e.g. `http://localhost:9000` for MinIO).
    /// Required for non-AWS S3-compatible services.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Access key ID for static credentials.
    #[serde(default)]
    pub access_key_id: Option<String>,
    /// Secret access key for static credentials.
    #[serde(default)]
    pub secret_access_key: Option<String>,
    /// Session token for temporary credentials.
    #[serde(default)]
    pub session_token: Option<String>,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

impl Default for S3Credentials {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
        }
    }
}

/// S3-backed bucket provider.
///
/// Builds one store per bucket and reuses it for later calls.
#[derive(Debug, Default)]
pub struct S3Provider {
    credentials: S3Credentials,
    buckets: BucketCache,
}

impl S3Provider {
    const ID: &str = "s3";

    /// Create a provider with explicit credentials.
    pub fn new(credentials: S3Credentials) -> Self {
        Self {
            credentials,
            buckets: BucketCache::default(),
        }
    }

    fn build(&self, bucket: &str) -> Result<Arc<dyn ObjectStore>> {
        let creds = &self.credentials;
        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(bucket)
            .with_region(&creds.region);

        if let Some(endpoint) = &creds.endpoint {
            builder = builder.with_endpoint(endpoint);
            if endpoint.starts_with("http://") {
                builder = builder.with_allow_http(true);
            }
        }

        if let Some(access_key) = &creds.access_key_id {
            builder = builder.with_access_key_id(access_key);
        }

        if let Some(secret_key) = &creds.secret_access_key {
            builder = builder.with_secret_access_key(secret_key);
        }

        if let Some(token) = &creds.session_token {
            builder = builder.with_token(token);
        }

        let store = builder
            .build()
            .map_err(|e| Error::provider(Self::ID, bucket, e.to_string()))?;

        Ok(Arc::new(store))
    }
}

impl BucketProvider for S3Provider {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn bucket(&self, bucket: &str) -> Result<Arc<dyn ObjectStore>> {
        self.buckets.get_or_build(bucket, || self.build(bucket))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_default_region() {
        let creds: S3Credentials =
            serde_json::from_str(r#"{"endpoint":"http://localhost:9000"}"#).unwrap();
        assert_eq!(creds.region, "us-east-1");
        assert_eq!(creds.endpoint.as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn builds_store_for_minio_endpoint() {
        let provider = S3Provider::new(S3Credentials {
            endpoint: Some("http://localhost:9000".into()),
            access_key_id: Some("minioadmin".into()),
            secret_access_key: Some("minioadmin".into()),
            ..Default::default()
        });

        assert_eq!(provider.id(), "s3");
        provider.bucket("artifacts").unwrap();
    }

    #[test]
    fn reuses_store_per_bucket() {
        let provider = S3Provider::new(S3Credentials {
            endpoint: Some("http://localhost:9000".into()),
            access_key_id: Some("minioadmin".into()),
            secret_access_key: Some("minioadmin".into()),
            ..Default::default()
        });

        let first = provider.bucket("artifacts").unwrap();
        let second = provider.bucket("artifacts").unwrap();
        let other = provider.bucket("releases").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &other));
    }
}
