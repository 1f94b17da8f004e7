use std::{backtrace::Backtrace, panic};

use flexi_logger::{
    Age, Cleanup, Criterion, FileSpec, FlexiLoggerError, LogSpecBuilder, LogSpecification, Logger,
    LoggerHandle, Naming,
};
use log::{error, warn};

pub const LOG_DIRECTORY: &str = "/tmp/deskclock";

/// Start file logging at `info`, duplicated to stdout, and log panics.
///
/// The returned handle is used to apply the configured level once the config
/// is loaded.
pub fn init_logger() -> Result<LoggerHandle, FlexiLoggerError> {
    let logger = Logger::with(
        LogSpecBuilder::new()
            .default(log::LevelFilter::Info)
            .build(),
    )
    .log_to_file(FileSpec::default().directory(LOG_DIRECTORY))
    .duplicate_to_stdout(flexi_logger::Duplicate::All)
    .rotate(
        Criterion::Age(Age::Day),
        Naming::Timestamps,
        Cleanup::KeepLogFiles(7),
    )
    .start()?;

    panic::set_hook(Box::new(|info| {
        let backtrace = Backtrace::capture();
        error!("Panic: {info} \n {backtrace}");
    }));

    Ok(logger)
}

/// Resolve the log spec, letting `RUST_LOG` override the configured level.
///
/// An unparsable level falls back to `info`.
pub fn get_log_spec(log_level: &str) -> LogSpecification {
    LogSpecification::env_or_parse(log_level).unwrap_or_else(|err| {
        warn!("Failed to parse log level '{log_level}': {err}");
        LogSpecification::info()
    })
}
