pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod probe;
pub mod types;
pub mod utils;


// Re-export commonly used items
pub use error::{TierProbeError, TierProbeResult};
