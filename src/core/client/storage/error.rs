use thiserror::Error;

/// Errors escaping a storage client call.
///
/// Expected remote failures (timeouts, transport errors, missing objects)
/// are reported through the outcome enums instead; this type covers the
/// genuinely unexpected, and probes catch it at their boundary.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("cloud storage backend error: {0}")]
    Backend(String),
}
