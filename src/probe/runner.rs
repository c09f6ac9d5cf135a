use crate::config::TierConfig;
use crate::core::client::storage::StorageClient;
use crate::probe::{delete, download, list, upload};
use crate::types::object::{BucketName, ObjectKey};
use crate::types::params::{RetryScope, RunOptions, SchedulingClass};
use crate::types::probe::ProbeResult;
use crate::utils::random_alphanumeric_payload;
use bytes::Bytes;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Prefix under which every self-test object is written, so that probe
/// traffic can never collide with production data.
pub const SELF_TEST_PREFIX: &str = "self-test";

pub const GATE_CLOSED_WARNING: &str = "self-test gate already closed";
pub const STORAGE_DISABLED_WARNING: &str = "cloud storage is not enabled";
pub const CLIENT_NOT_READY_WARNING: &str = "cloud storage client is not initialized";
pub const CANCELLED_WARNING: &str = "run was manually cancelled";

/// Self-test engine for the cloud capacity tier.
///
/// At most one invocation runs at a time per engine; a second `run` while
/// one is in flight is rejected with a warning result rather than queued.
/// Cancellation is two-tier: [`SelfTest::cancel`] is cooperative and only
/// prevents probes that have not started their remote call yet, while
/// [`SelfTest::stop`] cancels the root scope and thereby aborts a call
/// already in flight.
pub struct SelfTest {
    config: Arc<TierConfig>,
    client: Option<Arc<dyn StorageClient>>,
    gate: Mutex<()>,
    closed: AtomicBool,
    cancelled: AtomicBool,
    root: CancellationToken,
}

/// Read-only per-invocation state handed to each probe.
pub(crate) struct ProbeEnv<'a> {
    pub client: &'a dyn StorageClient,
    pub opts: &'a RunOptions,
    pub bucket: &'a BucketName,
    pub remote_read_enabled: bool,
    pub remote_write_enabled: bool,
    pub cancelled: &'a AtomicBool,
    pub root: &'a CancellationToken,
}

impl ProbeEnv<'_> {
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Derive a fresh retry scope for a single remote call.
    pub fn retry_scope(&self) -> RetryScope {
        RetryScope::derive(self.root, self.opts.timeout, self.opts.backoff)
    }
}

impl SelfTest {
    pub fn new(config: Arc<TierConfig>, client: Option<Arc<dyn StorageClient>>) -> Self {
        Self {
            config,
            client,
            gate: Mutex::new(()),
            closed: AtomicBool::new(false),
            cancelled: AtomicBool::new(false),
            root: CancellationToken::new(),
        }
    }

    /// Run one self-test invocation and return the probe results in probe
    /// order. Probe-level failures are carried as data on the results; this
    /// function never fails for them.
    pub async fn run(self: Arc<Self>, opts: RunOptions) -> Vec<ProbeResult> {
        // A cancel issued while no run was in flight does not poison this one.
        self.cancelled.store(false, Ordering::Relaxed);

        if self.closed.load(Ordering::Relaxed) {
            debug!(name = %opts.name, "self-test gate already closed");
            return vec![ProbeResult::run_warning(&opts.name, GATE_CLOSED_WARNING)];
        }
        let Ok(_gate) = self.gate.try_lock() else {
            debug!(name = %opts.name, "self-test invocation already in flight");
            return vec![ProbeResult::run_warning(&opts.name, GATE_CLOSED_WARNING)];
        };

        info!(name = %opts.name, class = %opts.class, "starting cloud storage self-test");

        if !self.config.cloud_storage_enabled {
            warn!("cloud storage is not enabled, exiting cloud storage self-test");
            return vec![ProbeResult::run_warning(&opts.name, STORAGE_DISABLED_WARNING)];
        }
        let Some(client) = self.client.clone() else {
            warn!("storage client is not initialized, exiting cloud storage self-test");
            return vec![ProbeResult::run_warning(&opts.name, CLIENT_NOT_READY_WARNING)];
        };

        match opts.class {
            SchedulingClass::Caller => self.run_probes(client, opts).await,
            SchedulingClass::Dedicated => {
                let name = opts.name.clone();
                let span = info_span!("self_test", name = %opts.name, class = %opts.class);
                let this = Arc::clone(&self);
                let task = tokio::spawn(async move { this.run_probes(client, opts).await }.instrument(span));
                match task.await {
                    Ok(results) => results,
                    Err(e) => {
                        error!(error = %e, "self-test task failed");
                        let mut result = ProbeResult::run_level(&name);
                        result.error = Some(format!("self-test task failed: {e}"));
                        vec![result]
                    }
                }
            }
        }
    }

    /// Request cooperative cancellation. Observed at the next probe's
    /// precondition check; a remote call already in flight is not
    /// interrupted.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Tear the engine down: cancel any in-flight remote call through the
    /// root scope and wait for the current invocation to finish unwinding.
    /// Idempotent, and safe to call without a prior `run`.
    pub async fn stop(&self) {
        self.closed.store(true, Ordering::Relaxed);
        self.root.cancel();
        let _gate = self.gate.lock().await;
    }

    /// Execute the four probes strictly in order. Cross-probe state (the
    /// uploaded key, the generated payload, the listing) is threaded through
    /// explicitly so each probe is a function of its inputs.
    async fn run_probes(&self, client: Arc<dyn StorageClient>, opts: RunOptions) -> Vec<ProbeResult> {
        let mut results = Vec::with_capacity(4);

        let bucket = BucketName::from(self.config.bucket_name.as_str());
        let prefix = ObjectKey::from(SELF_TEST_PREFIX);
        let key = ObjectKey::from(format!("{SELF_TEST_PREFIX}/{}", Uuid::new_v4()));

        // Captured once; a config change mid-run does not affect this run.
        let remote_read_enabled = self.config.remote_read_enabled;
        let remote_write_enabled = self.config.remote_write_enabled;

        let payload: Option<Bytes> =
            remote_write_enabled.then(|| random_alphanumeric_payload(self.config.payload_size_bytes));

        let env = ProbeEnv {
            client: client.as_ref(),
            opts: &opts,
            bucket: &bucket,
            remote_read_enabled,
            remote_write_enabled,
            cancelled: &self.cancelled,
            root: &self.root,
        };

        let upload_result = upload::verify_upload(&env, &key, payload.as_ref()).await;
        let is_uploaded = upload_result.passed();
        results.push(upload_result);

        let uploaded_key = is_uploaded.then_some(&key);
        let (listing, list_result) =
            list::verify_list(&env, &prefix, self.config.max_list_keys, uploaded_key).await;
        results.push(list_result);

        // Round-trip against the key we just wrote; without one, fall back
        // to the cheapest listed object to keep the read check inexpensive.
        let download_key = if is_uploaded {
            Some(key.clone())
        } else {
            listing.as_ref().and_then(|l| l.smallest().map(|object| object.key.clone()))
        };
        let baseline = if is_uploaded { payload.as_ref() } else { None };
        results.push(download::verify_download(&env, download_key.as_ref(), baseline).await);

        // Cleanup is attempted even when the upload failed, so a partially
        // created object is not leaked.
        results.push(delete::verify_delete(&env, &key).await);

        results
    }
}
