//! Tracing subscriber setup for the binary.

use anyhow::Result;
use notifia_core::config::LoggingConfig;
use notifia_infrastructure::NotifiaPaths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used by `--verbose`: debug output from our crates only.
const VERBOSE_FILTER: &str =
    "warn,notifia_core=debug,notifia_infrastructure=debug,notifia_application=debug,notifia_cli=debug";

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over the configured level; `--verbose` wins over both.
/// When file logging is enabled the returned guard must be kept alive until
/// exit so buffered lines get flushed.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<Option<WorkerGuard>> {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.level))
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    if !config.file {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .try_init()?;
        return Ok(None);
    }

    let logs_dir = NotifiaPaths::logs_dir()?;
    std::fs::create_dir_all(&logs_dir)?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&logs_dir, "notifia.log"));
    let file_layer = fmt::layer().with_writer(writer).with_ansi(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    tracing::debug!("[Cli] Logging to {}", logs_dir.display());
    Ok(Some(guard))
}
