use std::error::Error as _;
use std::ffi::OsString;
use std::io::Write;

use tracing::{debug, info, warn};

use crate::config::load_configuration;
use crate::error::Error;
use crate::work::Work;

use super::args::{Options, parse_arguments};
use super::errors::{AppError, Failure};

/// Logs go to stderr so stdout only carries program output.
fn init_logging(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    // A subscriber may already be installed when `run` is called more than once.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load the configuration named by `options` and hand it to `work`.
///
/// Progress output goes to `out`. Returns the status the routine produced.
pub fn run<W>(options: &Options, work: &W, out: &mut dyn Write) -> Result<i32, Failure>
where
    W: Work + ?Sized,
{
    init_logging(options.debug);
    debug!("Options: {:?}", options);

    let config = load_configuration(&options.config, out)?;
    if options.debug {
        match serde_json::to_string(&config) {
            Ok(json) => debug!("Configuration: {}", json),
            Err(e) => debug!("Configuration could not be rendered: {}", e),
        }
    }

    let status = work.run(options, &config).map_err(Error::Work)?;
    info!("Work routine finished with status {}", status);
    Ok(status)
}

/// Top-level failure boundary.
///
/// Parses `argv`, runs `work`, and returns the process exit status. Failure
/// messages are written to `out` as a single line; with `--backtrace` they are
/// followed by one `Caused by:` line per underlying error and the captured
/// backtrace. Usage errors are rendered by the argument parser itself.
/// A routine status outside `0..=255` is reported as 1.
pub fn main<I, T, W>(argv: I, out: &mut dyn Write, work: &W) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Work + ?Sized,
{
    let options = match parse_arguments(argv) {
        Ok(options) => options,
        Err(e) => return report(&Failure::from(e), false, out),
    };

    match run(&options, work, out) {
        Ok(status) => exit_status(status),
        Err(failure) => report(&failure, options.backtrace, out),
    }
}

/// Process exit codes are truncated to 8 bits, so a wider status could read as success.
fn exit_status(status: i32) -> i32 {
    if (0..=255).contains(&status) {
        status
    } else {
        warn!("Work routine returned out-of-range status {}", status);
        1
    }
}

fn report(failure: &Failure, backtrace: bool, out: &mut dyn Write) -> i32 {
    match failure.error() {
        AppError::Usage(e) => {
            let _ = e.print();
        }
        AppError::ConfigNotFound { .. } | AppError::Runtime(_) | AppError::Work(_) => {
            let _ = writeln!(out, "{}", failure);
            if backtrace {
                let causes = std::iter::successors(failure.source(), |e| (*e).source());
                for cause in causes {
                    let _ = writeln!(out, "Caused by: {}", cause);
                }
                let _ = writeln!(out, "{}", failure.backtrace());
            }
        }
    }
    let _ = out.flush();
    failure.exit_code()
}
