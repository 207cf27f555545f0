use anyhow::{Context, Result};
use std::env;
use std::fs::File;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILE: &str = "main.log";
const DEFAULT_FILTER: &str = "info,homework_bot=debug";

/// Console plus a log file that is truncated on every start.
/// The returned guard must stay alive for the file writer to flush.
pub fn init() -> Result<WorkerGuard> {
    let path = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    let file = File::create(&path).with_context(|| format!("Failed to create log file {}", path))?;
    let (file_writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(guard)
}
