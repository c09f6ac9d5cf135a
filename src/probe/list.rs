use crate::probe::runner::{ProbeEnv, CANCELLED_WARNING};
use crate::types::object::{ObjectKey, ObjectListing};
use crate::types::probe::{ProbeKind, ProbeResult};
use tokio::time::Instant;
use tracing::debug;

pub const LIST_FAILED_ERROR: &str = "failed to list objects in cloud storage";
pub const READ_DISABLED_ERROR: &str = "remote read is not enabled";
pub const LIST_MISSING_KEY_ERROR: &str = "uploaded key/payload could not be found in cloud storage item list";

/// List objects under the self-test prefix and, when the upload probe
/// succeeded, check that the freshly uploaded key is present.
///
/// Returns the listing alongside the result so the download probe can pick
/// a fallback target from it; `None` is the failure sentinel for a listing
/// that was not obtained.
pub(crate) async fn verify_list(
    env: &ProbeEnv<'_>,
    prefix: &ObjectKey,
    max_keys: usize,
    uploaded_key: Option<&ObjectKey>,
) -> (Option<ObjectListing>, ProbeResult) {
    let mut result = ProbeResult::new(&env.opts.name, ProbeKind::List);

    if env.is_cancelled() {
        result.warning = Some(CANCELLED_WARNING.into());
        return (None, result);
    }
    if !env.remote_read_enabled {
        result.error = Some(READ_DISABLED_ERROR.into());
        return (None, result);
    }

    let started = Instant::now();
    let listing = match env
        .client
        .list_objects(env.bucket.clone(), env.retry_scope(), Some(prefix.clone()), max_keys)
        .await
    {
        Ok(Some(listing)) => Some(listing),
        Ok(None) => {
            result.error = Some(LIST_FAILED_ERROR.into());
            None
        }
        Err(e) => {
            result.error = Some(e.to_string());
            None
        }
    };
    result.duration = started.elapsed();

    // A successful transport call can still fail the probe: the write must
    // be visible in the listing.
    if let (Some(listing), Some(uploaded)) = (&listing, uploaded_key) {
        if !listing.contains_key(uploaded) {
            result.error = Some(LIST_MISSING_KEY_ERROR.into());
        }
    }

    debug!(prefix = %prefix, passed = result.passed(), "list probe finished");
    (listing, result)
}
