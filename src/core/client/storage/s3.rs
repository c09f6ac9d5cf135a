use super::{DownloadOutcome, DownloadRequest, StorageClient, StorageError, TransferOutcome, UploadRequest};
use crate::types::object::{BucketName, ListedObject, ObjectKey, ObjectListing};
use crate::types::params::RetryScope;
use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// S3-backed storage client.
///
/// Each call is raced against the scope's cancellation token and bounded by
/// the scope's timeout. Retry looping is delegated to the SDK, configured
/// with the backoff supplied at construction.
pub struct AWSS3 {
    client: Client,
}

impl AWSS3 {
    /// Build a client from the ambient AWS environment (credentials chain,
    /// profile, endpoint overrides).
    pub async fn new(region: Option<String>, initial_backoff: Duration) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .retry_config(RetryConfig::standard().with_initial_backoff(initial_backoff));
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let sdk_config = loader.load().await;
        Self { client: Client::new(&sdk_config) }
    }
}

/// Outcome of racing a remote operation against its scope.
#[derive(Debug)]
pub(crate) enum Raced<T> {
    Completed(T),
    Cancelled,
    TimedOut,
}

/// Run a remote operation under the scope's cancellation token and timeout.
///
/// Every await on the remote goes through here, including response body
/// streaming, so teardown can interrupt a transfer that stalls after the
/// request itself was accepted.
pub(crate) async fn race<F: Future>(scope: &RetryScope, operation: F) -> Raced<F::Output> {
    tokio::select! {
        _ = scope.token.cancelled() => Raced::Cancelled,
        outcome = tokio::time::timeout(scope.timeout, operation) => match outcome {
            Err(_) => Raced::TimedOut,
            Ok(value) => Raced::Completed(value),
        },
    }
}

#[async_trait]
impl StorageClient for AWSS3 {
    async fn upload_object(&self, request: UploadRequest) -> Result<TransferOutcome, StorageError> {
        let UploadRequest { spec, payload } = request;
        let send = self
            .client
            .put_object()
            .bucket(spec.bucket.as_str())
            .key(spec.key.as_str())
            .body(ByteStream::from(payload))
            .send();

        match race(&spec.scope, send).await {
            Raced::Cancelled => Ok(TransferOutcome::Cancelled),
            Raced::TimedOut => Ok(TransferOutcome::TimedOut),
            Raced::Completed(Ok(_)) => Ok(TransferOutcome::Success),
            Raced::Completed(Err(e)) => {
                warn!(bucket = %spec.bucket, key = %spec.key, error = ?e, "put_object failed");
                Ok(TransferOutcome::Failed)
            }
        }
    }

    async fn list_objects(
        &self,
        bucket: BucketName,
        scope: RetryScope,
        prefix: Option<ObjectKey>,
        max_keys: usize,
    ) -> Result<Option<ObjectListing>, StorageError> {
        let mut call = self
            .client
            .list_objects_v2()
            .bucket(bucket.as_str())
            .max_keys(i32::try_from(max_keys).unwrap_or(i32::MAX));
        if let Some(prefix) = &prefix {
            call = call.prefix(prefix.as_str());
        }

        match race(&scope, call.send()).await {
            Raced::Cancelled | Raced::TimedOut => Ok(None),
            Raced::Completed(Ok(output)) => {
                let contents = output
                    .contents()
                    .iter()
                    .filter_map(|object| {
                        let key = ObjectKey::from(object.key()?.to_string());
                        let size_bytes = object.size().unwrap_or(0).max(0) as u64;
                        Some(ListedObject { key, size_bytes })
                    })
                    .collect();
                Ok(Some(ObjectListing { contents }))
            }
            Raced::Completed(Err(e)) => {
                warn!(bucket = %bucket, error = ?e, "list_objects_v2 failed");
                Ok(None)
            }
        }
    }

    async fn download_object(&self, request: DownloadRequest) -> Result<DownloadOutcome, StorageError> {
        let DownloadRequest { spec } = request;
        let send = self.client.get_object().bucket(spec.bucket.as_str()).key(spec.key.as_str()).send();

        let output = match race(&spec.scope, send).await {
            Raced::Cancelled => return Ok(DownloadOutcome::Failed),
            Raced::TimedOut => return Ok(DownloadOutcome::TimedOut),
            Raced::Completed(Ok(output)) => output,
            Raced::Completed(Err(e)) => {
                if e.as_service_error().map(|se| se.is_no_such_key()).unwrap_or(false) {
                    return Ok(DownloadOutcome::NotFound);
                }
                warn!(bucket = %spec.bucket, key = %spec.key, error = ?e, "get_object failed");
                return Ok(DownloadOutcome::Failed);
            }
        };

        // The body arrives as a stream after the response headers; it gets
        // its own race so a stalled stream cannot pin the probe.
        match race(&spec.scope, output.body.collect()).await {
            Raced::Cancelled => Ok(DownloadOutcome::Failed),
            Raced::TimedOut => Ok(DownloadOutcome::TimedOut),
            Raced::Completed(Ok(data)) => Ok(DownloadOutcome::Success(data.into_bytes())),
            Raced::Completed(Err(e)) => Err(StorageError::Backend(e.to_string())),
        }
    }

    async fn delete_object(
        &self,
        bucket: BucketName,
        key: ObjectKey,
        scope: RetryScope,
    ) -> Result<TransferOutcome, StorageError> {
        let send = self.client.delete_object().bucket(bucket.as_str()).key(key.as_str()).send();

        match race(&scope, send).await {
            Raced::Cancelled => Ok(TransferOutcome::Cancelled),
            Raced::TimedOut => Ok(TransferOutcome::TimedOut),
            Raced::Completed(Ok(_)) => Ok(TransferOutcome::Success),
            Raced::Completed(Err(e)) => {
                warn!(bucket = %bucket, key = %key, error = ?e, "delete_object failed");
                Ok(TransferOutcome::Failed)
            }
        }
    }
}
