//! `%(name)s` value interpolation.
//!
//! A reference resolves against the same section and then the defaults.
//! `%%` yields a literal `%`. Referenced values are expanded recursively up to
//! [`MAX_DEPTH`] levels.
use super::{Configuration, normalize_option};
use crate::error::{Error, Result};

pub const MAX_DEPTH: usize = 10;

/// Expands references in `raw`, the value of `option` in `section`.
pub fn expand(config: &Configuration, section: &str, option: &str, raw: &str) -> Result<String> {
    if !raw.contains('%') {
        return Ok(raw.to_string());
    }
    let mut out = String::with_capacity(raw.len());
    Expander {
        config,
        section,
        option,
    }
    .expand_into(raw, 1, &mut out)?;
    Ok(out)
}

struct Expander<'a> {
    config: &'a Configuration,
    section: &'a str,
    /// Option being looked up; named in every error.
    option: &'a str,
}

impl Expander<'_> {
    fn expand_into(&self, raw: &str, depth: usize, out: &mut String) -> Result<()> {
        if depth > MAX_DEPTH {
            return Err(self.error(format!(
                "recursion limit of {MAX_DEPTH} exceeded while expanding '{raw}'"
            )));
        }

        let mut rest = raw;
        while let Some(pos) = rest.find('%') {
            out.push_str(&rest[..pos]);
            rest = &rest[pos..];

            if let Some(tail) = rest.strip_prefix("%%") {
                out.push('%');
                rest = tail;
            } else if let Some(tail) = rest.strip_prefix("%(") {
                let close = tail
                    .find(')')
                    .filter(|&i| i > 0 && tail[i + 1..].starts_with('s'))
                    .ok_or_else(|| self.error(format!("bad reference in '{rest}'")))?;
                let name = normalize_option(&tail[..close]);
                let value = self.config.get_raw(self.section, &name).map_err(|_| {
                    self.error(format!("references missing option '{name}'"))
                })?;
                self.expand_into(value, depth + 1, out)?;
                rest = &tail[close + 2..];
            } else {
                return Err(self.error(format!(
                    "'%' must be followed by '%' or '(', found '{rest}'"
                )));
            }
        }
        out.push_str(rest);
        Ok(())
    }

    fn error(&self, reason: String) -> Error {
        Error::Interpolation {
            section: self.section.to_string(),
            option: normalize_option(self.option),
            reason,
        }
    }
}
