use anyhow::Result;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::OffsetTime;

pub mod assert;
pub mod collision;
pub mod contour;
pub mod error;
pub mod field;
pub mod gjk;
pub mod hull;
pub mod linalg;
pub mod polygon;

/// Installs the global `tracing` subscriber, writing to `path` (truncated first).
///
/// Fails if the file cannot be opened or a global subscriber is already installed.
pub fn setup_log(path: impl AsRef<Path>) -> Result<()> {
    let logfile = std::fs::OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open(path)?;
    let timer = OffsetTime::new(
        time::UtcOffset::UTC,
        time::macros::format_description!("[hour]:[minute]:[second].[subsecond digits:6]"),
    );
    tracing_subscriber::fmt()
        .event_format(
            tracing_subscriber::fmt::format()
                .with_target(false)
                .with_source_location(true)
                .with_timer(timer),
        )
        .with_writer(Mutex::new(logfile))
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}
