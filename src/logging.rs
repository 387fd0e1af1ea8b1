use anyhow::{anyhow, Context};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Arc;
use tracing::Level;

/// Install a global `fmt` subscriber that appends to `path`.
///
/// The terminal belongs to the TUI, so nothing is ever written to stdout or
/// stderr from here.
pub fn init(path: &Path, level: Level) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_max_level(level)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("installing tracing subscriber")?;

    tracing::info!(path = %path.display(), %level, "logging initialised");
    Ok(())
}
