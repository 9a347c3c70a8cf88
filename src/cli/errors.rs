use std::backtrace::Backtrace;
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::error::Error;
use crate::work::WorkError;

/// Failure kinds the top-level boundary distinguishes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad command line, or an informational request (`--help`, `--version`).
    #[error(transparent)]
    Usage(#[from] clap::Error),

    #[error("Could not find config file: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// Reading, parsing or querying the configuration failed.
    #[error(transparent)]
    Runtime(Error),

    #[error(transparent)]
    Work(WorkError),
}

impl From<Error> for AppError {
    fn from(e: Error) -> Self {
        match e {
            Error::ConfigNotFound { path } => AppError::ConfigNotFound { path },
            Error::Work(e) => AppError::Work(e),
            other => AppError::Runtime(other),
        }
    }
}

/// An [`AppError`] together with the backtrace captured when it entered the CLI layer.
#[derive(Debug)]
pub struct Failure {
    error: AppError,
    backtrace: Backtrace,
}

impl Failure {
    pub fn error(&self) -> &AppError {
        &self.error
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    /// Status the process exits with. Help and version output count as success.
    pub fn exit_code(&self) -> i32 {
        match &self.error {
            AppError::Usage(e) if !e.use_stderr() => 0,
            AppError::Usage(_)
            | AppError::ConfigNotFound { .. }
            | AppError::Runtime(_)
            | AppError::Work(_) => 1,
        }
    }
}

impl From<AppError> for Failure {
    fn from(error: AppError) -> Self {
        Self {
            error,
            backtrace: Backtrace::force_capture(),
        }
    }
}

impl From<Error> for Failure {
    fn from(e: Error) -> Self {
        AppError::from(e).into()
    }
}

impl From<clap::Error> for Failure {
    fn from(e: clap::Error) -> Self {
        AppError::from(e).into()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl std::error::Error for Failure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.error)
    }
}
