pub mod error;
pub mod s3;

use crate::types::object::{BucketName, ObjectKey, ObjectListing};
use crate::types::params::RetryScope;
use async_trait::async_trait;
use bytes::Bytes;
pub use error::StorageError;

/// Outcome of an upload or delete call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    Success,
    TimedOut,
    Failed,
    Cancelled,
}

/// Outcome of a download call. The fetched bytes ride in the success
/// variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Success(Bytes),
    TimedOut,
    Failed,
    NotFound,
}

/// Addressing and cancellation bounds shared by single-object transfers.
#[derive(Debug, Clone)]
pub struct TransferSpec {
    pub bucket: BucketName,
    pub key: ObjectKey,
    pub scope: RetryScope,
}

#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub spec: TransferSpec,
    pub payload: Bytes,
}

#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub spec: TransferSpec,
}

/// Trait defining the object storage operations the self-test exercises.
///
/// Implementations own transport concerns entirely: retries, request
/// signing, connection pooling. Callers only supply a [`RetryScope`] with
/// the timeout/backoff bounds and a cancellation token per call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Write one object.
    async fn upload_object(&self, request: UploadRequest) -> Result<TransferOutcome, StorageError>;

    /// List up to `max_keys` objects under `prefix`. `None` signals that the
    /// listing could not be obtained.
    async fn list_objects(
        &self,
        bucket: BucketName,
        scope: RetryScope,
        prefix: Option<ObjectKey>,
        max_keys: usize,
    ) -> Result<Option<ObjectListing>, StorageError>;

    /// Fetch one object.
    async fn download_object(&self, request: DownloadRequest) -> Result<DownloadOutcome, StorageError>;

    /// Remove one object.
    async fn delete_object(
        &self,
        bucket: BucketName,
        key: ObjectKey,
        scope: RetryScope,
    ) -> Result<TransferOutcome, StorageError>;
}
