use serde::Serialize;
use std::time::Duration;
use strum_macros::Display;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_PROBE_BACKOFF: Duration = Duration::from_millis(100);

/// Isolation hint for a self-test invocation.
///
/// `Dedicated` runs the probe sequence on its own tokio task so that its
/// resource usage is accounted separately from the caller; `Caller` runs the
/// sequence inline on the calling task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SchedulingClass {
    #[default]
    Dedicated,
    Caller,
}

/// Per-invocation options for the self-test engine. Supplied fresh on every
/// `run` call and not retained across runs.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Label attached to every probe result of this run.
    pub name: String,
    pub class: SchedulingClass,
    /// Upper bound on each probe's remote call.
    pub timeout: Duration,
    /// Initial backoff handed to the storage client's retry policy.
    pub backoff: Duration,
}

impl RunOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: SchedulingClass::default(),
            timeout: DEFAULT_PROBE_TIMEOUT,
            backoff: DEFAULT_PROBE_BACKOFF,
        }
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::new("self-test")
    }
}

/// Time-bounded cancellation scope for a single remote call.
///
/// Each probe derives one scope from the engine's root token, so tearing the
/// engine down cancels any call still in flight. Retry looping itself is the
/// storage client's concern; the scope only carries the bounds.
#[derive(Debug, Clone)]
pub struct RetryScope {
    pub token: CancellationToken,
    pub timeout: Duration,
    pub backoff: Duration,
}

impl RetryScope {
    pub fn derive(parent: &CancellationToken, timeout: Duration, backoff: Duration) -> Self {
        Self { token: parent.child_token(), timeout, backoff }
    }
}
