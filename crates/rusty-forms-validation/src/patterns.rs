// File: rusty-forms-validation/src/patterns.rs
// Purpose: Named regular expressions used by the `format` predicate

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

// Single character: a-z, 0-9, underscore or hyphen
static ALPHANUMERIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([a-z0-9_-])$").unwrap());

// Digits only
static NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9])+$").unwrap());

// Letters only, any length
static TEXT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Za-z])+$").unwrap());

// abc@xyz.com
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-z0-9_.-]+)@([\da-z.-]+)\.([a-z.]{2,6})$").unwrap()
});

// (http(s)://)(abc.)def.xyz(/path)
static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?://)?([\da-z.-]+)\.([a-z.]{2,6})([/\w .-]*)*/?$").unwrap()
});

// D-M-Y with any of - . / between parts, 2 or 4 digit year
static DATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-3]?[0-9])[-./]([0-1]?[0-9])[-./]([0-9]{2}|[0-9]{4})$").unwrap()
});

// H:MM or HH:MM
static TIME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]?[0-9]):([0-5][0-9])$").unwrap());

/// Registry of named patterns.
///
/// `PatternRegistry::default()` carries the built-in patterns; callers can add
/// their own or replace a built-in before handing the registry to a validator.
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    patterns: HashMap<String, Regex>,
}

impl PatternRegistry {
    /// Registry with no patterns at all
    pub fn empty() -> Self {
        Self {
            patterns: HashMap::new(),
        }
    }

    /// Add or replace a compiled pattern
    pub fn insert(&mut self, name: impl Into<String>, regex: Regex) {
        self.patterns.insert(name.into(), regex);
    }

    /// Compile and add a pattern
    pub fn insert_str(
        &mut self,
        name: impl Into<String>,
        pattern: &str,
    ) -> Result<(), regex::Error> {
        let regex = Regex::new(pattern)?;
        self.insert(name, regex);
        Ok(())
    }

    pub fn with(mut self, name: impl Into<String>, regex: Regex) -> Self {
        self.insert(name, regex);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Regex> {
        self.patterns.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.patterns.contains_key(name)
    }

    /// Test `value` against the named pattern; unknown names never match.
    pub fn is_match(&self, name: &str, value: &str) -> bool {
        self.get(name).map_or(false, |regex| regex.is_match(value))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        let builtins: [(&str, &Lazy<Regex>); 7] = [
            ("alphanumeric", &ALPHANUMERIC_REGEX),
            ("number", &NUMBER_REGEX),
            ("text", &TEXT_REGEX),
            ("email", &EMAIL_REGEX),
            ("url", &URL_REGEX),
            ("date", &DATE_REGEX),
            ("time", &TIME_REGEX),
        ];

        let patterns = builtins
            .into_iter()
            .map(|(name, regex)| (name.to_string(), Regex::clone(regex)))
            .collect();

        Self { patterns }
    }
}
