use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Initialize the tracing subscriber with
/// - a human-readable fmt layer for console output (when LOG_FORMAT != "json")
/// - one-line JSON output suitable for log shippers (when LOG_FORMAT = "json")
///
/// This will also install color_eyre to handle panics in the application.
pub fn init_logging() {
    color_eyre::install().expect("Unable to install color_eyre");

    // Read from `RUST_LOG` environment variable, with fallback to default
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::builder()
            .with_default_directive(Level::INFO.into())
            .parse("tierprobe=info")
            .expect("Invalid filter directive")
    });

    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    if log_format == "json" {
        let fmt_layer = fmt::layer().with_target(true).with_file(true).with_line_number(true).json();
        let subscriber = Registry::default().with(env_filter).with(fmt_layer);
        tracing::subscriber::set_global_default(subscriber).expect("Failed to set global default subscriber");
    } else {
        let fmt_layer = fmt::layer().with_target(true).with_file(true).with_line_number(true);
        let subscriber = Registry::default().with(env_filter).with(fmt_layer);
        tracing::subscriber::set_global_default(subscriber).expect("Failed to set global default subscriber");
    }
}
