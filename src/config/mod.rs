//! Configuration model: an ordered mapping of section names to string-keyed
//! string values, parsed from an INI-style file.
//!
//! Values are stored raw; `%(name)s` references are expanded on lookup by
//! [`Configuration::get`] and the typed accessors built on it. Entries in the
//! `[DEFAULT]` section are visible from every other section.
pub mod interpolate;
pub mod loader;
pub mod parser;

pub use loader::load_configuration;
pub use parser::{ParseError, ParseErrorKind};

use std::str::FromStr;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Error, Result};

/// Name of the section whose entries every other section inherits.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Option names are case-insensitive and stored lowercased.
pub(crate) fn normalize_option(name: &str) -> String {
    name.to_lowercase()
}

/// Key/value pairs of one section, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    entries: Vec<(String, String)>,
}

impl Section {
    /// Raw (uninterpolated) value of `option`, if present in this section.
    pub fn get(&self, option: &str) -> Option<&str> {
        let option = normalize_option(option);
        self.entries
            .iter()
            .find(|(k, _)| *k == option)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, option: &str) -> bool {
        self.get(option).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Callers must have normalized `option` and checked it is not present yet.
    pub(crate) fn push(&mut self, option: String, value: String) {
        self.entries.push((option, value));
    }

    pub(crate) fn set_last(&mut self, value: String) {
        if let Some(last) = self.entries.last_mut() {
            last.1 = value;
        }
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Parsed contents of a configuration file. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    defaults: Section,
    sections: Vec<(String, Section)>,
}

impl Configuration {
    /// Parse INI text. See [`parser`] for the accepted syntax.
    pub fn parse(text: &str) -> std::result::Result<Self, ParseError> {
        parser::parse(text)
    }

    /// Section names in file order. `DEFAULT` is never listed.
    pub fn sections(&self) -> Vec<&str> {
        self.sections.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    /// The `[DEFAULT]` section.
    pub fn defaults(&self) -> &Section {
        &self.defaults
    }

    /// True if `option` is set in `section` or inherited from the defaults.
    /// Unknown sections have no options.
    pub fn has_option(&self, section: &str, option: &str) -> bool {
        self.get_raw(section, option).is_ok()
    }

    /// Option names visible in `section`: its own, then inherited defaults.
    pub fn options(&self, section: &str) -> Result<Vec<&str>> {
        let own = self.require_section(section)?;
        let mut names: Vec<&str> = own.keys().collect();
        names.extend(self.defaults.keys().filter(|k| !own.contains_key(k)));
        Ok(names)
    }

    /// Uninterpolated value of `option` in `section`, falling back to the defaults.
    pub fn get_raw(&self, section: &str, option: &str) -> Result<&str> {
        let own = if section == DEFAULT_SECTION {
            None
        } else {
            Some(self.require_section(section)?)
        };

        own.and_then(|s| s.get(option))
            .or_else(|| self.defaults.get(option))
            .ok_or_else(|| Error::NoOption {
                section: section.to_string(),
                option: normalize_option(option),
            })
    }

    /// Value of `option` in `section` with `%(name)s` references expanded.
    pub fn get(&self, section: &str, option: &str) -> Result<String> {
        let raw = self.get_raw(section, option)?;
        interpolate::expand(self, section, option, raw)
    }

    /// All `(option, value)` pairs visible in `section`, interpolated.
    ///
    /// Inherited default names come first, carrying the section's value where it
    /// overrides them, followed by the section's own remaining options.
    pub fn items(&self, section: &str) -> Result<Vec<(String, String)>> {
        let own = self.require_section(section)?;
        self.defaults
            .keys()
            .chain(own.keys().filter(|k| !self.defaults.contains_key(k)))
            .map(|name| Ok((name.to_string(), self.get(section, name)?)))
            .collect()
    }

    pub fn get_int(&self, section: &str, option: &str) -> Result<i64> {
        self.get_parsed(section, option, "integer", |v| v.parse().ok())
    }

    pub fn get_int_or(&self, section: &str, option: &str, default: i64) -> Result<i64> {
        or_default(self.get_int(section, option), default)
    }

    pub fn get_float(&self, section: &str, option: &str) -> Result<f64> {
        self.get_parsed(section, option, "float", |v| v.parse().ok())
    }

    pub fn get_float_or(&self, section: &str, option: &str, default: f64) -> Result<f64> {
        or_default(self.get_float(section, option), default)
    }

    /// Accepts `1/yes/true/on` and `0/no/false/off`, ignoring case.
    pub fn get_bool(&self, section: &str, option: &str) -> Result<bool> {
        self.get_parsed(section, option, "boolean", parse_bool)
    }

    pub fn get_bool_or(&self, section: &str, option: &str, default: bool) -> Result<bool> {
        or_default(self.get_bool(section, option), default)
    }

    fn get_parsed<T>(
        &self,
        section: &str,
        option: &str,
        expected: &'static str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<T> {
        let value = self.get(section, option)?;
        parse(value.trim()).ok_or_else(|| Error::InvalidValue {
            section: section.to_string(),
            option: normalize_option(option),
            value,
            expected,
        })
    }

    fn require_section(&self, name: &str) -> Result<&Section> {
        self.section(name).ok_or_else(|| Error::NoSection {
            section: name.to_string(),
        })
    }

    pub(crate) fn defaults_mut(&mut self) -> &mut Section {
        &mut self.defaults
    }

    /// Appends an empty section and returns its index.
    pub(crate) fn add_section(&mut self, name: String) -> usize {
        self.sections.push((name, Section::default()));
        self.sections.len() - 1
    }

    pub(crate) fn section_at_mut(&mut self, index: usize) -> (&str, &mut Section) {
        let (name, section) = &mut self.sections[index];
        (name.as_str(), section)
    }
}

impl FromStr for Configuration {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Configuration::parse(s)
    }
}

/// Serializes as a map of section name to section, `DEFAULT` first when non-empty.
impl Serialize for Configuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let with_defaults = !self.defaults.is_empty();
        let len = self.sections.len() + usize::from(with_defaults);
        let mut map = serializer.serialize_map(Some(len))?;
        if with_defaults {
            map.serialize_entry(DEFAULT_SECTION, &self.defaults)?;
        }
        for (name, section) in &self.sections {
            map.serialize_entry(name, section)?;
        }
        map.end()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

fn or_default<T>(result: Result<T>, default: T) -> Result<T> {
    match result {
        Err(Error::NoSection { .. } | Error::NoOption { .. }) => Ok(default),
        other => other,
    }
}
