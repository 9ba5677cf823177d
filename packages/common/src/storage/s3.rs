use std::io::Cursor;

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::{Bucket, Region};

use super::error::StorageError;
use super::key::ObjectKey;
use super::traits::{BoxReader, ObjectStore};

/// S3-compatible object store backend (AWS S3, R2, MinIO, ...).
pub struct S3ObjectStore {
    bucket: Box<Bucket>,
    max_size: u64,
}

impl S3ObjectStore {
    /// Connect to a bucket. A custom `endpoint` selects path-style addressing
    /// for S3-compatible services; without one, `region` must be a known AWS
    /// region name.
    pub fn new(
        bucket_name: &str,
        region: &str,
        endpoint: Option<&str>,
        access_key: &str,
        secret_key: &str,
        max_size: u64,
    ) -> Result<Self, StorageError> {
        let region = match endpoint {
            Some(endpoint) => Region::Custom {
                region: region.to_string(),
                endpoint: endpoint.to_string(),
            },
            None => region
                .parse()
                .map_err(|e| StorageError::Backend(format!("invalid region {region:?}: {e}")))?,
        };

        let credentials = Credentials::new(Some(access_key), Some(secret_key), None, None, None)
            .map_err(|e| StorageError::Backend(format!("credentials: {e}")))?;

        let bucket = Bucket::new(bucket_name, region, credentials)
            .map_err(|e| StorageError::Backend(format!("bucket init: {e}")))?
            .with_path_style();

        Ok(Self { bucket, max_size })
    }

    fn map_err(key: &ObjectKey, err: S3Error) -> StorageError {
        match err {
            S3Error::HttpFailWithBody(404, _) => StorageError::NotFound(key.to_string()),
            other => StorageError::Backend(other.to_string()),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(
        &self,
        key: &ObjectKey,
        data: &[u8],
        content_type: &str,
    ) -> Result<(), StorageError> {
        if data.len() as u64 > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: data.len() as u64,
                limit: self.max_size,
            });
        }

        let response = self
            .bucket
            .put_object_with_content_type(key.as_str(), data, content_type)
            .await
            .map_err(|e| Self::map_err(key, e))?;

        let code = response.status_code();
        if !(200..300).contains(&code) {
            return Err(StorageError::Backend(format!(
                "unexpected status {code} storing {key}"
            )));
        }

        Ok(())
    }

    async fn get(&self, key: &ObjectKey) -> Result<Vec<u8>, StorageError> {
        let response = self
            .bucket
            .get_object(key.as_str())
            .await
            .map_err(|e| Self::map_err(key, e))?;

        Ok(response.bytes().to_vec())
    }

    async fn get_stream(&self, key: &ObjectKey) -> Result<BoxReader, StorageError> {
        // rust-s3 buffers the body anyway, so stream from memory.
        let bytes = self.get(key).await?;
        Ok(Box::new(Cursor::new(bytes)))
    }

    async fn delete(&self, key: &ObjectKey) -> Result<bool, StorageError> {
        match self.bucket.delete_object(key.as_str()).await {
            Ok(_) => Ok(true),
            Err(S3Error::HttpFailWithBody(404, _)) => Ok(false),
            Err(e) => Err(Self::map_err(key, e)),
        }
    }
}
