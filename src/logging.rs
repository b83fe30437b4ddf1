//! Logger setup for the command-line binary.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming, opt_format,
};
use std::path::Path;

/// Rotate log files after 10 MB.
const ROTATE_BYTES: u64 = 10 * 1024 * 1024;

/// Rotated files kept next to the active one.
const KEEP_LOG_FILES: usize = 3;

/// Level used when `RUST_LOG` is unset.
fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Start the logger.
///
/// `RUST_LOG` wins over `verbosity`. With `log_dir` set, output goes to
/// rotated files there; otherwise to stderr, unless `stderr_allowed` is false
/// (the terminal is owned by the TUI), in which case no logger is started.
///
/// The returned handle must be kept alive for the duration of the program.
pub(crate) fn init(
    verbosity: u8,
    log_dir: Option<&Path>,
    stderr_allowed: bool,
) -> Result<Option<LoggerHandle>, FlexiLoggerError> {
    let logger = Logger::try_with_env_or_str(level_for(verbosity))?;

    let handle = match log_dir {
        Some(dir) => logger
            .log_to_file(FileSpec::default().directory(dir).basename("slide2048"))
            .format(opt_format)
            .rotate(
                Criterion::Size(ROTATE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(KEEP_LOG_FILES),
            )
            .start()?,
        None if stderr_allowed => logger.format(flexi_logger::colored_default_format).start()?,
        None => return Ok(None),
    };
    Ok(Some(handle))
}
