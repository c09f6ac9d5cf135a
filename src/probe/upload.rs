use crate::core::client::storage::{TransferOutcome, TransferSpec, UploadRequest};
use crate::probe::runner::{ProbeEnv, CANCELLED_WARNING};
use crate::types::object::ObjectKey;
use crate::types::probe::{ProbeKind, ProbeResult};
use bytes::Bytes;
use tokio::time::Instant;
use tracing::debug;

pub const UPLOAD_FAILED_ERROR: &str = "failed to upload to cloud storage";
pub const WRITE_DISABLED_ERROR: &str = "remote write is not enabled";

/// Upload the generated payload under the self-test key.
///
/// A passing result is the gate for downstream round-trip verification: the
/// list probe only checks key presence and the download probe only compares
/// bytes when this probe succeeded.
pub(crate) async fn verify_upload(
    env: &ProbeEnv<'_>,
    key: &ObjectKey,
    payload: Option<&Bytes>,
) -> ProbeResult {
    let mut result = ProbeResult::new(&env.opts.name, ProbeKind::Upload);

    if env.is_cancelled() {
        result.warning = Some(CANCELLED_WARNING.into());
        return result;
    }
    if !env.remote_write_enabled {
        result.error = Some(WRITE_DISABLED_ERROR.into());
        return result;
    }
    // The payload is generated whenever remote write is enabled.
    let Some(payload) = payload else {
        result.error = Some("self-test payload was not generated".into());
        return result;
    };

    let request = UploadRequest {
        spec: TransferSpec { bucket: env.bucket.clone(), key: key.clone(), scope: env.retry_scope() },
        payload: payload.clone(),
    };

    let started = Instant::now();
    match env.client.upload_object(request).await {
        Ok(TransferOutcome::Success) => {}
        Ok(TransferOutcome::TimedOut | TransferOutcome::Failed | TransferOutcome::Cancelled) => {
            result.error = Some(UPLOAD_FAILED_ERROR.into());
        }
        Err(e) => result.error = Some(e.to_string()),
    }
    result.duration = started.elapsed();

    debug!(key = %key, passed = result.passed(), "upload probe finished");
    result
}
