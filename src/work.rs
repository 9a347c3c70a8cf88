//! The work routine seam.
//!
//! The shell owns argument parsing, configuration loading and error reporting;
//! everything a concrete program actually does lives behind [`Work`]. The
//! crate ships only [`Placeholder`], which does nothing.
use crate::cli::Options;
use crate::config::Configuration;

/// Error type a work routine may fail with. Any error converts into it.
pub type WorkError = Box<dyn std::error::Error + Send + Sync>;

pub trait Work {
    /// Run the routine and return the process status code (0 on success).
    ///
    /// Statuses outside `0..=255` do not survive as process exit codes; the
    /// shell reports them as 1.
    fn run(&self, options: &Options, config: &Configuration) -> Result<i32, WorkError>;
}

impl<F> Work for F
where
    F: Fn(&Options, &Configuration) -> Result<i32, WorkError>,
{
    fn run(&self, options: &Options, config: &Configuration) -> Result<i32, WorkError> {
        self(options, config)
    }
}

/// Empty routine: succeeds with status 0.
#[derive(Debug, Default, Clone, Copy)]
pub struct Placeholder;

impl Work for Placeholder {
    fn run(&self, _options: &Options, _config: &Configuration) -> Result<i32, WorkError> {
        Ok(0)
    }
}
