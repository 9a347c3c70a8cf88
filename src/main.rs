//! scriptshell CLI entrypoint.
//!
//! Hands the process arguments to the top-level boundary in `cli` with the
//! placeholder work routine, then exits with the status it returns.
use scriptshell::{Placeholder, cli};

fn main() {
    let status = cli::main(std::env::args_os(), &mut std::io::stdout(), &Placeholder);
    std::process::exit(status);
}
