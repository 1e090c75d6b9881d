use std::io::{self, IsTerminal};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Initialize the logging system with environment-based filtering
///
/// - Uses `RUST_LOG` for level filtering (defaults to "info" if not set)
/// - Writes to stderr so command output on stdout stays clean
/// - `Json` flattens event fields for cleaner structured output
pub fn init_normal_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Json => fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .json()
            .flatten_event(true)
            .init(),
        LogFormat::Pretty => fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_ansi(io::stderr().is_terminal())
            .compact()
            .init(),
    }
}

pub fn init_logging(format: LogFormat) {
    // If tokio-console is enabled, DO NOT install the normal subscriber
    if std::env::var("TOKIO_CONSOLE").is_ok() {
        init_console_logging();
    } else {
        init_normal_logging(format);
    }
}

fn init_console_logging() {
    console_subscriber::init();
}

pub fn default_log_format() -> LogFormat {
    if io::stderr().is_terminal() {
        LogFormat::Pretty
    } else {
        LogFormat::Json
    }
}
