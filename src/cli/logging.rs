use std::env;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LEVEL: &str = "info";
const DEFAULT_LOG_FILE: &str = "./logs/retrosavesync.log";

/// Console output plus a plain-text copy of every sync event in the log file.
///
/// `TRACING_LEVEL` takes any `EnvFilter` directive; `LOG_FILE_PATH` moves the log file.
/// Keep the returned guard alive until exit so buffered lines reach the file.
pub fn init_logger() -> impl Drop {
    let level = env::var("TRACING_LEVEL").unwrap_or_else(|_| DEFAULT_LEVEL.to_string());
    let log_file = env::var("LOG_FILE_PATH").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());

    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never("./", &log_file));

    let console = fmt::layer()
        .with_writer(std::io::stdout)
        .pretty()
        .with_file(false)
        .without_time()
        .with_ansi(true);
    let file = fmt::layer().with_writer(file_writer).with_ansi(false);

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .with(EnvFilter::new(&level))
        .init();

    debug!("retrosavesync logging at '{}', sync log in {}", level, log_file);

    guard
}
