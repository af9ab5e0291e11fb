//! Package storage using `object_store`.
//!
//! Supports S3 (and S3-compatible endpoints) and a local directory backend.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutPayload};
use tracing::debug;

use crate::application::ports::BlobStore;
use crate::domain::BlobStoreConfig;

/// Production implementation of the `BlobStore` port.
pub struct ObjectStoreBlobStore {
    config: BlobStoreConfig,
}

impl ObjectStoreBlobStore {
    #[must_use]
    pub fn new(config: BlobStoreConfig) -> Self {
        Self { config }
    }

    /// Build a store scoped to one bucket.
    fn store_for(&self, bucket: &str) -> Result<Arc<dyn ObjectStore>> {
        match self.config.backend.as_str() {
            "s3" => {
                use object_store::aws::AmazonS3Builder;
                // Credentials and default region come from the AWS_* environment.
                let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);
                if let Some(region) = &self.config.region {
                    builder = builder.with_region(region);
                }
                if let Some(endpoint) = &self.config.endpoint {
                    builder = builder.with_endpoint(endpoint);
                }
                let store = builder.build().context("failed to create S3 store")?;
                Ok(Arc::new(store))
            }
            "local" => {
                let root = self
                    .config
                    .root
                    .as_deref()
                    .context("blob_store.root is required for the local backend")?;
                let dir = PathBuf::from(root).join(bucket);
                std::fs::create_dir_all(&dir)
                    .with_context(|| format!("cannot create {}", dir.display()))?;
                let store = object_store::local::LocalFileSystem::new_with_prefix(&dir)
                    .context("failed to create local store")?;
                Ok(Arc::new(store))
            }
            other => anyhow::bail!("unsupported blob store backend: {other}"),
        }
    }
}

impl BlobStore for ObjectStoreBlobStore {
    async fn upload(&self, local: &Path, bucket: &str, key: &str) -> Result<()> {
        let store = self.store_for(bucket)?;
        let data = tokio::fs::read(local)
            .await
            .with_context(|| format!("cannot read {}", local.display()))?;
        let location = ObjectPath::from(key);

        debug!(path = %location, bucket, size = data.len(), "uploading package");
        store
            .put(&location, PutPayload::from(data))
            .await
            .with_context(|| format!("failed to upload {location}"))?;
        Ok(())
    }
}
