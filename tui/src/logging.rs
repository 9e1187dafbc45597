use std::{fs::OpenOptions, sync::Mutex};

use crate::{Result, config::LogConfig};

/// Installs the global tracing subscriber.
///
/// The board owns stdout and raw mode garbles stderr, so logs only go to a
/// file, and only when one is configured.
pub fn init_tracing(config: &LogConfig) -> Result<()> {
    let Some(path) = &config.file else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(config.level)
        .try_init()?;

    Ok(())
}
