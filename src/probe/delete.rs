use crate::core::client::storage::TransferOutcome;
use crate::probe::runner::{ProbeEnv, CANCELLED_WARNING};
use crate::probe::upload::WRITE_DISABLED_ERROR;
use crate::types::object::ObjectKey;
use crate::types::probe::{ProbeKind, ProbeResult};
use tokio::time::Instant;
use tracing::debug;

pub const DELETE_FAILED_ERROR: &str = "failed to delete from cloud storage";

/// Delete the self-test key. This is the only cleanup mechanism for objects
/// created by the run and is attempted even when the upload failed.
pub(crate) async fn verify_delete(env: &ProbeEnv<'_>, key: &ObjectKey) -> ProbeResult {
    let mut result = ProbeResult::new(&env.opts.name, ProbeKind::Delete);

    if env.is_cancelled() {
        result.warning = Some(CANCELLED_WARNING.into());
        return result;
    }
    if !env.remote_write_enabled {
        result.error = Some(WRITE_DISABLED_ERROR.into());
        return result;
    }

    let started = Instant::now();
    match env.client.delete_object(env.bucket.clone(), key.clone(), env.retry_scope()).await {
        Ok(TransferOutcome::Success) => {}
        Ok(TransferOutcome::TimedOut | TransferOutcome::Failed | TransferOutcome::Cancelled) => {
            result.error = Some(DELETE_FAILED_ERROR.into());
        }
        Err(e) => result.error = Some(e.to_string()),
    }
    result.duration = started.elapsed();

    debug!(key = %key, passed = result.passed(), "delete probe finished");
    result
}
