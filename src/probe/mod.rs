//! Self-test probes for the cloud capacity tier.
//!
//! One invocation runs upload, list, download and delete strictly in order
//! against a disposable uniquely named object, cross-checking results
//! between probes: the listing must contain the freshly uploaded key, and
//! the downloaded bytes must match the uploaded payload exactly.

pub mod delete;
pub mod download;
pub mod list;
pub mod runner;
pub mod upload;

pub use runner::SelfTest;
