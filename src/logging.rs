use crate::config::LogFormat;

/// Initialize structured logging with tracing.
/// Output goes to stderr so command output on stdout stays clean.
/// Call once at startup; a second call is a no-op.
pub fn init_logging(format: LogFormat) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .json()
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .compact()
            )
            .try_init(),
    };

    match result {
        Ok(()) => tracing::debug!(format = ?format, "Structured logging initialized"),
        Err(e) => eprintln!("[logging] subscriber already set: {}", e),
    }
}
