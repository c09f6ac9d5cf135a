use clap::Parser as _;
use dotenvy::dotenv;
use std::process::ExitCode;
use std::sync::Arc;
use tierprobe::cli::{Cli, Commands, RunCmd};
use tierprobe::core::client::storage::s3::AWSS3;
use tierprobe::core::client::storage::StorageClient;
use tierprobe::probe::SelfTest;
use tierprobe::utils::logging::init_logging;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { run_command } => run_self_test(&run_command).await,
    }
}

async fn run_self_test(cmd: &RunCmd) -> ExitCode {
    let config = Arc::new(cmd.tier_config());
    if let Err(e) = config.validate() {
        error!(error = %e, "invalid configuration");
        return ExitCode::FAILURE;
    }
    let opts = cmd.run_options();

    let client: Option<Arc<dyn StorageClient>> = if config.cloud_storage_enabled {
        Some(Arc::new(AWSS3::new(cmd.aws_region.clone(), opts.backoff).await))
    } else {
        None
    };

    let engine = Arc::new(SelfTest::new(config, client));
    let results = Arc::clone(&engine).run(opts).await;
    engine.stop().await;

    let failed = results.iter().any(|result| result.error.is_some());

    if cmd.json {
        match serde_json::to_string_pretty(&results) {
            Ok(output) => println!("{output}"),
            Err(e) => {
                error!(error = %e, "failed to serialize self-test results");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for result in &results {
            let probe = result.probe.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string());
            match (&result.error, &result.warning) {
                (Some(message), _) => {
                    error!(probe = %probe, duration = ?result.duration, "{message}")
                }
                (None, Some(message)) => warn!(probe = %probe, "{message}"),
                (None, None) => info!(probe = %probe, duration = ?result.duration, "ok"),
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
