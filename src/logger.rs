//! File logging behind the `log` facade.
//!
//! Nothing is written unless logging is enabled in the configuration. The
//! terminal is owned by the dialog while it runs, so logs only go to a file.

use crate::config::LoggingConfig;
use crate::constants::{APP_DIR, LOG_FILE_NAME};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default log file: `<cache dir>/formkit/formkit.log`.
pub fn get_log_file_path() -> Result<PathBuf> {
    dirs::cache_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine cache directory"))
        .map(|dir| dir.join(APP_DIR).join(LOG_FILE_NAME))
}

/// Build the dispatch writing to `path`, creating its directory if needed.
pub fn build_dispatch(config: &LoggingConfig, path: &Path) -> Result<fern::Dispatch> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let file = fern::log_file(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;

    Ok(fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(config.level_filter()?)
        .chain(file))
}

/// Install the global logger. Returns the log file in use, or `None` when
/// logging is disabled.
pub fn setup(config: &LoggingConfig) -> Result<Option<PathBuf>> {
    if !config.enabled {
        return Ok(None);
    }

    let path = match &config.file {
        Some(path) => path.clone(),
        None => get_log_file_path()?,
    };
    build_dispatch(config, &path)?
        .apply()
        .map_err(|err| anyhow::anyhow!("Failed to install logger: {}", err))?;

    log::info!("Logging to {}", path.display());
    Ok(Some(path))
}
