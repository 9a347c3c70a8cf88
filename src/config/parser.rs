//! INI reader.
//!
//! Accepted syntax:
//! - `[name]` opens a section; text after the last `]` is ignored.
//! - `key = value` or `key: value`, split on the first `=` or `:`. Keys are
//!   trimmed and lowercased, values trimmed.
//! - Lines starting with `#` or `;` (after leading whitespace) are comments.
//! - A line indented deeper than its option line continues that option's value.
//!   Blank lines inside a continued value are kept, trailing ones are dropped.
//! - `[DEFAULT]` may be opened more than once; any other repeated section is an error.
use thiserror::Error;
use tracing::trace;

use super::{Configuration, DEFAULT_SECTION, Section, normalize_option};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number.
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("file contains no section headers before '{0}'")]
    MissingSectionHeader(String),

    #[error("section '{0}' already exists")]
    DuplicateSection(String),

    #[error("option '{option}' in section '{section}' already exists")]
    DuplicateOption { section: String, option: String },

    #[error("option name is empty in '{0}'")]
    EmptyOptionName(String),

    #[error("expected '[section]' or 'key = value', found '{0}'")]
    Malformed(String),
}

/// Which container option lines currently land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Defaults,
    /// Index into the configuration's section list.
    Named(usize),
}

/// Option whose value may still grow through continuation lines.
#[derive(Debug)]
struct Pending {
    indent: usize,
    lines: Vec<String>,
}

#[derive(Debug, Default)]
struct Reader {
    config: Configuration,
    target: Option<Target>,
    pending: Option<Pending>,
    /// Indentation of the last header or option line.
    indent: usize,
}

pub(crate) fn parse(text: &str) -> Result<Configuration, ParseError> {
    let mut reader = Reader::default();
    for (index, line) in text.lines().enumerate() {
        reader
            .feed(line)
            .map_err(|kind| ParseError { line: index + 1, kind })?;
    }
    reader.flush();
    Ok(reader.config)
}

impl Reader {
    fn feed(&mut self, line: &str) -> Result<(), ParseErrorKind> {
        let value = line.trim();

        if value.starts_with('#') || value.starts_with(';') {
            return Ok(());
        }

        if value.is_empty() {
            if let Some(pending) = self.pending.as_mut() {
                pending.lines.push(String::new());
            }
            return Ok(());
        }

        let indent = line.chars().take_while(|c| c.is_whitespace()).count();

        if let Some(pending) = self.pending.as_mut() {
            if indent > pending.indent {
                pending.lines.push(value.to_string());
                return Ok(());
            }
        }

        self.flush();
        self.indent = indent;

        if let Some(name) = section_header(value) {
            return self.open_section(name);
        }

        if self.target.is_none() {
            return Err(ParseErrorKind::MissingSectionHeader(value.to_string()));
        }

        self.open_option(value)
    }

    fn open_section(&mut self, name: &str) -> Result<(), ParseErrorKind> {
        trace!(section = name, "section header");
        if name == DEFAULT_SECTION {
            self.target = Some(Target::Defaults);
            return Ok(());
        }
        if self.config.has_section(name) {
            return Err(ParseErrorKind::DuplicateSection(name.to_string()));
        }
        let index = self.config.add_section(name.to_string());
        self.target = Some(Target::Named(index));
        Ok(())
    }

    fn open_option(&mut self, line: &str) -> Result<(), ParseErrorKind> {
        let split = line
            .find(['=', ':'])
            .ok_or_else(|| ParseErrorKind::Malformed(line.to_string()))?;
        let key = line[..split].trim();
        if key.is_empty() {
            return Err(ParseErrorKind::EmptyOptionName(line.to_string()));
        }
        let key = normalize_option(key);
        let value = line[split + 1..].trim().to_string();

        let (section_name, section) = self.current_section();
        if section.contains_key(&key) {
            return Err(ParseErrorKind::DuplicateOption {
                section: section_name.to_string(),
                option: key,
            });
        }
        section.push(key, value.clone());

        self.pending = Some(Pending {
            indent: self.indent,
            lines: vec![value],
        });
        Ok(())
    }

    /// Writes the accumulated value of the pending option back to its section.
    fn flush(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        if pending.lines.len() > 1 {
            let joined = pending.lines.join("\n").trim_end().to_string();
            self.current_section().1.set_last(joined);
        }
    }

    fn current_section(&mut self) -> (&str, &mut Section) {
        match self.target {
            Some(Target::Named(index)) => self.config.section_at_mut(index),
            _ => (DEFAULT_SECTION, self.config.defaults_mut()),
        }
    }
}

/// Returns the section name if `value` is a header line. A header needs at
/// least one character between the brackets; `[]` is read as an option line.
fn section_header(value: &str) -> Option<&str> {
    if !value.starts_with('[') {
        return None;
    }
    match value.rfind(']') {
        Some(end) if end > 1 => Some(&value[1..end]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_err(text: &str) -> ParseError {
        parse(text).expect_err("input should be rejected")
    }

    #[test]
    fn reads_sections_and_both_delimiters() {
        let config = parse("[paths]\ninput = /tmp/in\noutput: /tmp/out\n").unwrap();
        let section = config.section("paths").unwrap();
        assert_eq!(section.get("input"), Some("/tmp/in"));
        assert_eq!(section.get("output"), Some("/tmp/out"));
    }

    #[test]
    fn first_delimiter_splits_key_from_value() {
        let config = parse("[urls]\nhome = http://example.org/?a=b").unwrap();
        assert_eq!(
            config.get_raw("urls", "home").unwrap(),
            "http://example.org/?a=b"
        );
    }

    #[test]
    fn keys_are_lowercased_and_values_trimmed() {
        let config = parse("[s]\n  MixedCase   =   spaced out   \nempty =\n").unwrap();
        let section = config.section("s").unwrap();
        assert_eq!(section.keys().collect::<Vec<_>>(), vec!["mixedcase", "empty"]);
        assert_eq!(section.get("mixedcase"), Some("spaced out"));
        assert_eq!(section.get("empty"), Some(""));
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let text = "# leading comment\n\n[s]\n; note\nkey = value # not a comment\n\n";
        let config = parse(text).unwrap();
        assert_eq!(config.get_raw("s", "key").unwrap(), "value # not a comment");
        assert_eq!(config.section("s").unwrap().len(), 1);
    }

    #[test]
    fn indented_lines_continue_the_value() {
        let text = "[s]\nlist = first\n  second\n\n  third\n\nnext = 1\n";
        let config = parse(text).unwrap();
        assert_eq!(config.get_raw("s", "list").unwrap(), "first\nsecond\n\nthird");
        assert_eq!(config.get_raw("s", "next").unwrap(), "1");
    }

    #[test]
    fn trailing_blank_lines_are_dropped_from_values() {
        let config = parse("[s]\nkey = value\n\n\n").unwrap();
        assert_eq!(config.get_raw("s", "key").unwrap(), "value");
    }

    #[test]
    fn header_ignores_text_after_last_bracket() {
        let config = parse("[a [b]] trailing\nk = v").unwrap();
        assert_eq!(config.sections(), vec!["a [b]"]);
    }

    #[test]
    fn default_section_may_repeat() {
        let config = parse("[DEFAULT]\na = 1\n[s]\n[DEFAULT]\nb = 2\n").unwrap();
        assert_eq!(config.defaults().len(), 2);
        assert_eq!(config.sections(), vec!["s"]);
    }

    #[test]
    fn option_before_header_is_rejected() {
        let err = parse_err("\nkey = value\n[s]\n");
        assert_eq!(err.line, 2);
        assert!(matches!(err.kind, ParseErrorKind::MissingSectionHeader(_)));
    }

    #[test]
    fn duplicate_section_is_rejected() {
        let err = parse_err("[s]\na = 1\n[t]\n[s]\n");
        assert_eq!(
            err,
            ParseError {
                line: 4,
                kind: ParseErrorKind::DuplicateSection("s".to_string()),
            }
        );
    }

    #[test]
    fn duplicate_option_is_rejected_case_insensitively() {
        let err = parse_err("[s]\nKey = 1\nkey = 2\n");
        assert_eq!(err.line, 3);
        assert_eq!(
            err.to_string(),
            "line 3: option 'key' in section 's' already exists"
        );
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert!(matches!(
            parse_err("[s]\njust words\n").kind,
            ParseErrorKind::Malformed(_)
        ));
        assert!(matches!(
            parse_err("[s]\n[]\n").kind,
            ParseErrorKind::Malformed(_)
        ));
        assert!(matches!(
            parse_err("[]\n").kind,
            ParseErrorKind::MissingSectionHeader(_)
        ));
        assert!(matches!(
            parse_err("[s]\n= value\n").kind,
            ParseErrorKind::EmptyOptionName(_)
        ));
    }

    #[test]
    fn empty_brackets_name_an_option() {
        let config = parse("[s]\n[] = x\n").unwrap();
        assert_eq!(config.sections(), vec!["s"]);
        assert_eq!(config.get_raw("s", "[]").unwrap(), "x");
    }

    #[test]
    fn empty_input_has_no_sections() {
        let config = parse("").unwrap();
        assert!(config.sections().is_empty());
        assert!(config.defaults().is_empty());
    }
}
