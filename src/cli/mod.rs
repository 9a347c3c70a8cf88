//! Command Line Interface (CLI) layer.
//!
//! This module defines argument parsing (`args`), the error kinds the
//! top-level boundary distinguishes (`errors`), and the orchestration logic
//! (`runner`): load the configuration, hand it to a [`Work`](crate::work::Work)
//! routine, and turn any failure into an exit status.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::{Options, parse_arguments};
pub use errors::{AppError, Failure};
pub use runner::{main, run};
