use crate::core::client::storage::{DownloadOutcome, DownloadRequest, TransferSpec};
use crate::probe::list::READ_DISABLED_ERROR;
use crate::probe::runner::{ProbeEnv, CANCELLED_WARNING};
use crate::types::object::ObjectKey;
use crate::types::probe::{ProbeKind, ProbeResult};
use bytes::Bytes;
use tokio::time::Instant;
use tracing::debug;

pub const DOWNLOAD_FAILED_ERROR: &str = "failed to download from cloud storage";
pub const NO_CANDIDATE_WARNING: &str = "no object found in the bucket to download";
pub const PAYLOAD_MISMATCH_ERROR: &str = "downloaded object differs from uploaded payload";

/// Download the candidate key and, when a baseline payload is supplied,
/// compare the fetched bytes against it byte for byte.
///
/// The candidate is the uploaded key when the upload probe succeeded, or a
/// fallback picked from the listing otherwise; with no candidate at all the
/// probe is skipped with a warning.
pub(crate) async fn verify_download(
    env: &ProbeEnv<'_>,
    key: Option<&ObjectKey>,
    baseline: Option<&Bytes>,
) -> ProbeResult {
    let mut result = ProbeResult::new(&env.opts.name, ProbeKind::Download);

    if env.is_cancelled() {
        result.warning = Some(CANCELLED_WARNING.into());
        return result;
    }
    if !env.remote_read_enabled {
        result.error = Some(READ_DISABLED_ERROR.into());
        return result;
    }
    let Some(key) = key else {
        result.warning = Some(NO_CANDIDATE_WARNING.into());
        return result;
    };

    let request = DownloadRequest {
        spec: TransferSpec { bucket: env.bucket.clone(), key: key.clone(), scope: env.retry_scope() },
    };

    let started = Instant::now();
    match env.client.download_object(request).await {
        Ok(DownloadOutcome::Success(bytes)) => {
            if let Some(baseline) = baseline {
                if bytes != *baseline {
                    result.error = Some(PAYLOAD_MISMATCH_ERROR.into());
                }
            }
        }
        Ok(DownloadOutcome::TimedOut | DownloadOutcome::Failed | DownloadOutcome::NotFound) => {
            result.error = Some(DOWNLOAD_FAILED_ERROR.into());
        }
        Err(e) => result.error = Some(e.to_string()),
    }
    result.duration = started.elapsed();

    debug!(key = %key, passed = result.passed(), "download probe finished");
    result
}
