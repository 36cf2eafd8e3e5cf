//! Tracing setup: stdout plus an optional file sink.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// Dropping the guard would flush and close the non-blocking writer, so it is
// parked here for the lifetime of the process.
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global tracing subscriber.
///
/// Filtering follows `RUST_LOG` and defaults to `info`. Events always reach stdout
/// in compact form; when the log file can be opened they are mirrored there as well,
/// with targets included so upload and backend failures can be traced to a module.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout = fmt::layer().compact().with_target(false);
    let registry = tracing_subscriber::registry().with(filter).with(stdout);

    match open_log_file() {
        Ok(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            let _ = FILE_GUARD.set(guard);
            registry
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .init();
        }
        Err(err) => {
            registry.init();
            tracing::warn!(error = %err, "File logging disabled; continuing with stdout only");
        }
    }
}

/// Open the log file for appending, creating it (and the default directory) as needed.
///
/// `DOCBRAIN_LOG_FILE` overrides the destination; otherwise `logs/docbrain.log` is used.
fn open_log_file() -> io::Result<File> {
    let path = match std::env::var("DOCBRAIN_LOG_FILE") {
        Ok(custom) => PathBuf::from(custom),
        Err(_) => {
            std::fs::create_dir_all("logs")?;
            PathBuf::from("logs/docbrain.log")
        }
    };
    OpenOptions::new().create(true).append(true).open(path)
}
