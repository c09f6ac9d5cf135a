use thiserror::Error;

pub type TierProbeResult<T> = Result<T, TierProbeError>;

/// Top-level errors of the tierprobe binary. Probe-level failures never
/// surface here; they are carried as data on the probe results.
#[derive(Error, Debug)]
pub enum TierProbeError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
