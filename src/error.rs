//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Covers configuration lookup and parsing, typed value conversion, and failures
//! surfaced by the injected work routine.
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ParseError;
use crate::work::WorkError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Could not find config file: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write progress output: {0}")]
    Output(#[source] std::io::Error),

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("No section: '{section}'")]
    NoSection { section: String },

    #[error("No option '{option}' in section: '{section}'")]
    NoOption { section: String, option: String },

    #[error("Invalid value for [{section}] {option}: '{value}' is not a valid {expected}")]
    InvalidValue {
        section: String,
        option: String,
        value: String,
        expected: &'static str,
    },

    #[error("Bad interpolation in [{section}] {option}: {reason}")]
    Interpolation {
        section: String,
        option: String,
        reason: String,
    },

    #[error(transparent)]
    Work(WorkError),
}

impl Error {
    pub fn work<E>(e: E) -> Self
    where
        E: Into<WorkError>,
    {
        Error::Work(e.into())
    }
}
