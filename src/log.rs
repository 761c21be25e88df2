//! Logging for simulation runs.
//!
//! Modules log through the usual `log` macros, re-exported here so that callers only
//! need this crate:
//!
//! ```rust
//! use sirs_sim::log::{info, LevelFilter};
//!
//! sirs_sim::log::set_log_level(LevelFilter::Debug).unwrap();
//! info!("sweep starting");
//! ```
//!
//! Nothing is printed until [`enable_logging`] or [`set_log_level`] installs the
//! `log4rs` stderr backend. Later calls swap the configuration of the installed logger.

use std::sync::Mutex;

use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Handle;

use crate::error::SimError;

pub use ::log::{debug, error, info, trace, warn, LevelFilter};

const DEFAULT_LOG_PATTERN: &str = "{d(%H:%M:%S%.3f)} {h({l:<5})} {t} - {m}{n}";
// Reports may be written to stdout, so logs go to stderr.
const CONSOLE_APPENDER: &str = "stderr";

static LOG_HANDLE: Mutex<Option<Handle>> = Mutex::new(None);

fn build_config(level: LevelFilter) -> Result<Config, SimError> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(DEFAULT_LOG_PATTERN)))
        .build();

    Config::builder()
        .appender(Appender::builder().build(CONSOLE_APPENDER, Box::new(stderr)))
        .build(Root::builder().appender(CONSOLE_APPENDER).build(level))
        .map_err(|err| SimError::LoggingError(err.to_string()))
}

/// Turns on logging at `Info`.
pub fn enable_logging() -> Result<(), SimError> {
    set_log_level(LevelFilter::Info)
}

/// Silences all output without uninstalling the logger.
pub fn disable_logging() -> Result<(), SimError> {
    set_log_level(LevelFilter::Off)
}

/// Sets the maximum level that gets printed, installing the console logger on first use.
pub fn set_log_level(level: LevelFilter) -> Result<(), SimError> {
    let config = build_config(level)?;
    let mut handle = LOG_HANDLE
        .lock()
        .map_err(|err| SimError::LoggingError(err.to_string()))?;

    match handle.as_ref() {
        Some(handle) => handle.set_config(config),
        None => {
            let new_handle = log4rs::init_config(config)
                .map_err(|err| SimError::LoggingError(err.to_string()))?;
            *handle = Some(new_handle);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_changes_reuse_the_installed_logger() {
        set_log_level(LevelFilter::Trace).unwrap();
        assert_eq!(::log::max_level(), LevelFilter::Trace);

        disable_logging().unwrap();
        assert_eq!(::log::max_level(), LevelFilter::Off);

        enable_logging().unwrap();
        assert_eq!(::log::max_level(), LevelFilter::Info);
        disable_logging().unwrap();
    }
}
