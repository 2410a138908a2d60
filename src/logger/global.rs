//! Process-wide logger and `log` crate bridge
//!
//! `init_global` installs one `Logger` for the whole process and registers it
//! as the `log` backend, so `log::info!` and friends land in the same sink.

use super::core::Logger;
use super::error::{LoggerError, LoggerResult};
use super::levels::LogLevel;
use log::{Level, LevelFilter, Metadata, Record};
use once_cell::sync::OnceCell;

static GLOBAL_LOGGER: OnceCell<Logger> = OnceCell::new();

static LOG_BRIDGE: LogBridge = LogBridge;

/// Install `logger` as the process-wide instance. Can only succeed once.
///
/// The `log` backend is claimed first; if another backend already owns it,
/// nothing is installed and `global()` stays `None`.
pub fn init_global(logger: Logger) -> LoggerResult<&'static Logger> {
    if log::set_logger(&LOG_BRIDGE).is_err() {
        return Err(match global() {
            Some(_) => LoggerError::AlreadyInitialized,
            None => LoggerError::LogBackendAlreadySet,
        });
    }
    // Threshold changes at runtime, so let every record through to the bridge
    log::set_max_level(LevelFilter::Trace);

    GLOBAL_LOGGER
        .set(logger)
        .map_err(|_| LoggerError::AlreadyInitialized)?;
    global().ok_or(LoggerError::AlreadyInitialized)
}

pub fn global() -> Option<&'static Logger> {
    GLOBAL_LOGGER.get()
}

/// Map `log` levels onto the severity table. Trace has no rank of its own.
pub fn level_name(level: Level) -> &'static str {
    match level {
        Level::Error => LogLevel::Error.as_str(),
        Level::Warn => LogLevel::Warn.as_str(),
        Level::Info => LogLevel::Info.as_str(),
        Level::Debug | Level::Trace => LogLevel::Debug.as_str(),
    }
}

struct LogBridge;

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        global().map_or(false, |logger| logger.enabled(level_name(metadata.level())))
    }

    fn log(&self, record: &Record) {
        if let Some(logger) = global() {
            logger.log(level_name(record.level()), *record.args());
        }
    }

    fn flush(&self) {
        if let Some(logger) = global() {
            logger.flush();
        }
    }
}
