use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use super::Configuration;
use crate::error::{Error, Result};

/// Read and parse the configuration file at `path`.
///
/// Writes a progress line naming the file to `out`, resolves `path` against the
/// current directory and fails with [`Error::ConfigNotFound`] unless it names a
/// regular file.
pub fn load_configuration(path: &Path, out: &mut dyn Write) -> Result<Configuration> {
    writeln!(out, "Reading configuration file : {}", path.display()).map_err(Error::Output)?;

    let cfg_file = std::path::absolute(path).map_err(|_| Error::ConfigNotFound {
        path: path.to_path_buf(),
    })?;
    if !cfg_file.is_file() {
        return Err(Error::ConfigNotFound { path: cfg_file });
    }

    debug!("Resolved configuration path: {:?}", cfg_file);
    let text = fs::read_to_string(&cfg_file).map_err(|source| Error::Io {
        path: cfg_file.clone(),
        source,
    })?;

    let config = Configuration::parse(&text).map_err(|source| Error::Parse {
        path: cfg_file.clone(),
        source,
    })?;

    info!(
        "Loaded {} section(s) from {:?}",
        config.sections().len(),
        cfg_file
    );
    Ok(config)
}
