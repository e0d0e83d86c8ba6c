//! Object storage client addressed by bucket and object name.
//!
//! [`StorageClient`] resolves each bucket through a [`BucketProvider`] and
//! scopes every stream it opens to a single call: writers are committed or
//! aborted, readers are dropped before returning.

use std::sync::Arc;

use bytes::Bytes;
use object_store::buffered::BufWriter;
use object_store::path::Path;
use object_store::{Attribute, GetOptions, ObjectStore};
use tokio::io::{AsyncRead, AsyncWriteExt};

use crate::providers::{BucketProvider, GcsProvider, InMemoryProvider};
use crate::{Error, ObjectMetadata, Result, TRACING_TARGET_OBJECT};

mod object_info;
mod schematized;

pub use object_info::ObjectInfo;

/// Content-type recorded for JSON uploads.
const JSON_CONTENT_TYPE: &str = "application/json";

/// Cloneable handle for uploading and downloading objects.
#[derive(Clone, Debug)]
pub struct StorageClient {
    provider: Arc<dyn BucketProvider>,
}

impl StorageClient {
    /// Wrap a bucket provider.
    pub fn new(provider: impl BucketProvider) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Client for Google Cloud Storage using ambient credentials.
    pub fn gcs() -> Self {
        Self::new(GcsProvider::default())
    }

    /// Client backed by in-process buckets.
    pub fn in_memory() -> Self {
        Self::new(InMemoryProvider::new())
    }

    /// Stream `content` into `bucket/name`, committing once the stream ends.
    pub async fn upload_file<R>(&self, bucket: &str, name: &str, mut content: R) -> Result<()>
    where
        R: AsyncRead + Unpin,
    {
        self.upload(bucket, name, &mut content, None, ObjectMetadata::new())
            .await
    }

    /// Download the full contents of `bucket/name`.
    #[tracing::instrument(skip(self), target = TRACING_TARGET_OBJECT)]
    pub async fn download_file(&self, bucket: &str, name: &str) -> Result<Bytes> {
        let store = self.provider.bucket(bucket)?;
        self.read_object(store.as_ref(), bucket, name).await
    }

    /// Fetch content-type, size and metadata of `bucket/name` without reading
    /// its body.
    #[tracing::instrument(skip(self), target = TRACING_TARGET_OBJECT)]
    pub async fn object_info(&self, bucket: &str, name: &str) -> Result<ObjectInfo> {
        let store = self.provider.bucket(bucket)?;
        self.read_info(store.as_ref(), bucket, name).await
    }

    /// Write all bytes from `content` to `bucket/name` with the given
    /// content-type and metadata, then commit.
    ///
    /// A failed copy aborts the pending upload; a failed commit is reported
    /// as [`Error::Finalize`] even if bytes were transmitted.
    #[tracing::instrument(skip(self, content, metadata), target = TRACING_TARGET_OBJECT)]
    async fn upload<R>(
        &self,
        bucket: &str,
        name: &str,
        content: &mut R,
        content_type: Option<&str>,
        metadata: ObjectMetadata,
    ) -> Result<()>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        let store = self.provider.bucket(bucket)?;

        let mut attributes = metadata.into_attributes();
        if let Some(ct) = content_type {
            attributes.insert(Attribute::ContentType, ct.to_string().into());
        }

        let mut writer = BufWriter::new(store, Path::from(name)).with_attributes(attributes);

        let size = match tokio::io::copy(content, &mut writer).await {
            Ok(size) => size,
            Err(source) => {
                if let Err(abort) = writer.abort().await {
                    tracing::warn!(
                        target: TRACING_TARGET_OBJECT,
                        bucket,
                        name,
                        error = %abort,
                        "Failed to abort upload"
                    );
                }
                return Err(Error::write(bucket, name, source));
            }
        };

        writer
            .shutdown()
            .await
            .map_err(|source| Error::finalize(bucket, name, source))?;

        tracing::debug!(
            target: TRACING_TARGET_OBJECT,
            bucket,
            name,
            size,
            "Uploaded object"
        );
        Ok(())
    }

    /// Read the full body of `name` from `store`.
    async fn read_object(&self, store: &dyn ObjectStore, bucket: &str, name: &str) -> Result<Bytes> {
        let result = store
            .get(&Path::from(name))
            .await
            .map_err(|e| Error::read(bucket, name, e))?;
        let data = result
            .bytes()
            .await
            .map_err(|e| Error::read(bucket, name, e))?;

        tracing::debug!(
            target: TRACING_TARGET_OBJECT,
            bucket,
            name,
            size = data.len(),
            "Downloaded object"
        );
        Ok(data)
    }

    /// Fetch the attributes of `name` from `store` with a head-only request.
    async fn read_info(&self, store: &dyn ObjectStore, bucket: &str, name: &str) -> Result<ObjectInfo> {
        let options = GetOptions {
            head: true,
            ..Default::default()
        };
        let result = store
            .get_opts(&Path::from(name), options)
            .await
            .map_err(|e| Error::metadata(bucket, name, e))?;

        Ok(ObjectInfo::from_parts(&result.meta, &result.attributes))
    }
}
