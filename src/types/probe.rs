use serde::Serialize;
use std::time::Duration;
use strum_macros::Display;

/// Fixed test-category tag carried by every result of this engine.
pub const CLOUD_STORAGE_TEST_TYPE: &str = "cloud_storage";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProbeKind {
    Upload,
    List,
    Download,
    Delete,
}

/// Outcome record of a single probe (or of a whole invocation that was
/// rejected before any probe ran, in which case `probe` is `None`).
///
/// `warning` marks a soft skip (cancellation, nothing to download, gate
/// rejection); `error` marks a hard failure. The two are populated by
/// disjoint paths. A result with neither set is a pass.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeResult {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe: Option<ProbeKind>,
    pub test_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Elapsed wall time of the remote call; zero when no call was made.
    pub duration: Duration,
}

impl ProbeResult {
    pub fn new(name: impl Into<String>, probe: ProbeKind) -> Self {
        Self {
            name: name.into(),
            probe: Some(probe),
            test_type: CLOUD_STORAGE_TEST_TYPE,
            warning: None,
            error: None,
            duration: Duration::ZERO,
        }
    }

    /// A result covering the whole invocation rather than a single probe.
    pub fn run_level(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            probe: None,
            test_type: CLOUD_STORAGE_TEST_TYPE,
            warning: None,
            error: None,
            duration: Duration::ZERO,
        }
    }

    pub fn run_warning(name: impl Into<String>, warning: impl Into<String>) -> Self {
        let mut result = Self::run_level(name);
        result.warning = Some(warning.into());
        result
    }

    pub fn passed(&self) -> bool {
        self.warning.is_none() && self.error.is_none()
    }
}
