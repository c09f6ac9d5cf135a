use crate::config::TierConfig;
use crate::types::params::{RunOptions, SchedulingClass};
use clap::{Args, Parser, Subcommand};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "tierprobe",
    about = "Self-test diagnostics for the cloud capacity tier of a log-storage cluster",
    long_about = "Tierprobe exercises the object-storage backend used as a capacity tier: it \
    uploads a disposable uniquely named object, lists the self-test prefix, downloads the \
    object back and deletes it, cross-checking results between probes and timing every \
    remote call."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one self-test invocation against the configured bucket
    Run {
        #[command(flatten)]
        run_command: Box<RunCmd>,
    },
}

/// Parameters for a single self-test run.
#[derive(Debug, Clone, Args)]
pub struct RunCmd {
    /// Label attached to every probe result of this run.
    #[arg(long, default_value = "self-test")]
    pub name: String,

    /// The S3 bucket holding the capacity tier.
    #[arg(env = "TIERPROBE_BUCKET", long, default_value = "tierprobe-bucket")]
    pub bucket: String,

    /// AWS region override; the ambient environment is used when absent.
    #[arg(env = "TIERPROBE_AWS_REGION", long)]
    pub aws_region: Option<String>,

    /// Per-probe timeout in seconds.
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Initial retry backoff handed to the storage client, in milliseconds.
    #[arg(long, default_value_t = 100)]
    pub backoff_ms: u64,

    /// Size of the generated upload payload in bytes.
    #[arg(long, default_value_t = 4096)]
    pub payload_size_bytes: usize,

    /// Upper bound on the number of keys fetched by the list probe.
    #[arg(long, default_value_t = 100)]
    pub max_list_keys: usize,

    /// Treat the capacity tier as disabled (the self-test exits with a warning).
    #[arg(long)]
    pub disable_cloud_storage: bool,

    /// Skip probes that read from the remote tier.
    #[arg(long)]
    pub disable_remote_read: bool,

    /// Skip probes that write to the remote tier.
    #[arg(long)]
    pub disable_remote_write: bool,

    /// Run the probe sequence on the calling task instead of a dedicated one.
    #[arg(long)]
    pub inline: bool,

    /// Print results as JSON instead of the human-readable summary.
    #[arg(long)]
    pub json: bool,
}

impl RunCmd {
    pub fn tier_config(&self) -> TierConfig {
        TierConfig {
            cloud_storage_enabled: !self.disable_cloud_storage,
            remote_read_enabled: !self.disable_remote_read,
            remote_write_enabled: !self.disable_remote_write,
            bucket_name: self.bucket.clone(),
            payload_size_bytes: self.payload_size_bytes,
            max_list_keys: self.max_list_keys,
        }
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            name: self.name.clone(),
            class: if self.inline { SchedulingClass::Caller } else { SchedulingClass::Dedicated },
            timeout: Duration::from_secs(self.timeout_secs),
            backoff: Duration::from_millis(self.backoff_ms),
        }
    }
}
