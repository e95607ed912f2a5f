pub mod formats;

use flexi_logger::{Logger, LoggerHandle};

use crate::Error;

/// Start logging to stderr; stdout carries command output only.
/// `RUST_LOG` takes precedence over `verbose`.
pub fn init(verbose: bool) -> Result<LoggerHandle, Error> {
    let default = if verbose { "debug" } else { "info" };
    let handle = Logger::try_with_env_or_str(default)?
        .format(formats::cli_format)
        .log_to_stderr()
        .start()?;

    Ok(handle)
}
