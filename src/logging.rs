use crate::config::LogConfig;
use anyhow::{anyhow, Context};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Sends `tracing` output to the configured log file.  Does nothing if no
/// file is configured.
pub(crate) fn init(config: &LogConfig) -> anyhow::Result<()> {
    let Some(ref path) = config.file else {
        return Ok(());
    };
    let env_filter = build_filter(EnvFilter::try_from_default_env().ok(), &config.filter)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }
    Ok(())
}

/// `RUST_LOG` takes precedence over the configured directive
fn build_filter(from_env: Option<EnvFilter>, configured: &str) -> anyhow::Result<EnvFilter> {
    match from_env {
        Some(f) => Ok(f),
        None => EnvFilter::try_new(configured)
            .map_err(|e| anyhow!("invalid log filter {configured:?}: {e}")),
    }
}
