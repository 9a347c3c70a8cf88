#![doc = r#"
scriptshell — a starting point for configuration-driven command-line programs.

The crate wires together the plumbing every small tool needs: option parsing,
loading an INI configuration file, and a single top-level failure boundary that
turns errors into an exit status with an optional backtrace. The actual work is
injected through the [`Work`] trait; the shipped binary runs [`Placeholder`],
which does nothing.

Command line
------------
```text
scriptshell --config <PATH> [--debug] [--backtrace]
```

Exit status is 0 on success and 1 on any failure (bad arguments, missing or
malformed configuration file, or an error from the work routine).

Plugging in a work routine
--------------------------
```rust,no_run
use scriptshell::{Configuration, Options, cli, work::WorkError};

fn greet(_options: &Options, config: &Configuration) -> Result<i32, WorkError> {
    let name = config.get("greeting", "name")?;
    let times = config.get_int_or("greeting", "times", 1)?;
    for _ in 0..times {
        println!("hello, {name}");
    }
    Ok(0)
}

fn main() {
    let status = cli::main(std::env::args_os(), &mut std::io::stdout(), &greet);
    std::process::exit(status);
}
```

Reading configuration directly
------------------------------
```rust
use scriptshell::Configuration;

let config: Configuration = "[DEFAULT]\nroot = /srv\n[app]\ndata = %(root)s/data\nworkers = 4"
    .parse()
    .unwrap();

assert_eq!(config.sections(), vec!["app"]);
assert_eq!(config.get("app", "data").unwrap(), "/srv/data");
assert_eq!(config.get_int("app", "workers").unwrap(), 4);
assert!(!config.get_bool_or("app", "dry_run", false).unwrap());
```

Useful modules
--------------
- [`cli`] — options, the boundary error kinds, and the runner.
- [`config`] — the configuration model, INI parser and loader.
- [`work`] — the work routine seam.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod cli;
pub mod config;
pub mod error;
pub mod work;

pub use cli::{AppError, Failure, Options, parse_arguments, run};
pub use config::{Configuration, ParseError, ParseErrorKind, Section, load_configuration};
pub use error::{Error, Result};
pub use work::{Placeholder, Work, WorkError};
