use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub fn init_logging(component: &str, to_stderr: bool) -> WorkerGuard {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let log_dir = Path::new(&home).join(".qualscan/logs");
    // No subscriber exists yet, so report straight to stderr
    if let Err(e) = ensure_log_dir(&log_dir) {
        eprintln!("qualscan: cannot create log directory {}: {}", log_dir.display(), e);
    }

    // Files roll daily and carry the component name, e.g. cli.2024-01-21
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(component)
        .build(&log_dir);
    let (non_blocking, guard) = match file_appender {
        Ok(appender) => tracing_appender::non_blocking(appender),
        Err(e) => {
            eprintln!("qualscan: file logging disabled: {}", e);
            tracing_appender::non_blocking(std::io::sink())
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    if to_stderr {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false);
        if let Err(e) = registry.with(stderr_layer).try_init() {
            eprintln!("qualscan: logging already initialized: {}", e);
        }
    } else if let Err(e) = registry.try_init() {
        eprintln!("qualscan: logging already initialized: {}", e);
    }

    guard
}

fn ensure_log_dir(log_dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(log_dir)
}
