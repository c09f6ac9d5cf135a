use crate::error::{TierProbeError, TierProbeResult};
use serde::{Deserialize, Serialize};

/// Configuration of the cloud capacity tier, as seen by the self-test.
///
/// Flags are captured once at the start of every invocation; a change made
/// while a run is in progress does not affect that run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierConfig {
    /// Master switch for the capacity tier. When off, the self-test exits
    /// immediately with a warning.
    #[serde(default = "default_true")]
    pub cloud_storage_enabled: bool,

    /// Whether reads from the remote tier are allowed (list, download).
    #[serde(default = "default_true")]
    pub remote_read_enabled: bool,

    /// Whether writes to the remote tier are allowed (upload, delete).
    #[serde(default = "default_true")]
    pub remote_write_enabled: bool,

    #[serde(default = "default_bucket")]
    pub bucket_name: String,

    /// Size of the generated self-test payload.
    #[serde(default = "default_payload_size")]
    pub payload_size_bytes: usize,

    /// Upper bound on the number of keys fetched by the list probe.
    #[serde(default = "default_max_list_keys")]
    pub max_list_keys: usize,
}

impl TierConfig {
    /// Reject configurations that cannot address the capacity tier.
    pub fn validate(&self) -> TierProbeResult<()> {
        if self.cloud_storage_enabled && self.bucket_name.is_empty() {
            return Err(TierProbeError::InvalidConfig(
                "bucket_name must not be empty when cloud storage is enabled".to_string(),
            ));
        }
        // The list API takes a signed 32-bit key cap.
        if self.max_list_keys == 0 || self.max_list_keys > i32::MAX as usize {
            return Err(TierProbeError::InvalidConfig(format!(
                "max_list_keys must be between 1 and {}",
                i32::MAX
            )));
        }
        Ok(())
    }
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            cloud_storage_enabled: true,
            remote_read_enabled: true,
            remote_write_enabled: true,
            bucket_name: default_bucket(),
            payload_size_bytes: default_payload_size(),
            max_list_keys: default_max_list_keys(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_bucket() -> String {
    "tierprobe-bucket".to_string()
}

fn default_payload_size() -> usize {
    4096
}

fn default_max_list_keys() -> usize {
    100
}
