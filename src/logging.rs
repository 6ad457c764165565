// src/logging.rs
use chrono::Local;
use log::LevelFilter;
use std::path::Path;

/// Routes `log` records to `log_file`. Stdout is owned by the terminal UI.
pub fn setup_logger(log_file: &Path, level: LevelFilter) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        // HTTP internals are noisy at debug.
        .level_for("hyper", LevelFilter::Warn)
        .level_for("hyper_util", LevelFilter::Warn)
        .level_for("reqwest", LevelFilter::Warn)
        .level_for("html5ever", LevelFilter::Warn)
        .chain(fern::log_file(log_file)?)
        .apply()?;
    Ok(())
}
