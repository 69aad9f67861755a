//! Search pattern builder.
//!
//! User text is turned into a case-insensitive, multi-line regex. Plain text
//! must match at the start of a word (`\b<text>`, text taken literally). The
//! word boundary is ASCII-only, so `foo` also matches inside `éfoo`. Text
//! starting with the escape marker `\` is a raw pattern: the marker is dropped
//! and the remainder compiled as-is, so `\bar` searches for `bar` anywhere.

use regex::{Regex, RegexBuilder};

use crate::error::ConsoleError;

/// Leading character that switches search text to raw-pattern mode.
const RAW_MARKER: char = '\\';

/// A compiled search rule restricting visibility to matching messages.
#[derive(Debug, Clone)]
pub struct SearchPattern {
    text: String,
    regex: Regex,
}

impl SearchPattern {
    /// Compiles user search text.
    ///
    /// Returns `Ok(None)` for empty text (search disabled) and
    /// [`ConsoleError::InvalidSearch`] when a raw pattern does not compile.
    pub fn compile(text: &str) -> Result<Option<Self>, ConsoleError> {
        if text.is_empty() {
            return Ok(None);
        }

        let pattern = match text.strip_prefix(RAW_MARKER) {
            Some(raw) => raw.to_owned(),
            None => format!(r"(?-u:\b){}", regex::escape(text)),
        };

        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .multi_line(true)
            .build()
            .map_err(|source| ConsoleError::InvalidSearch {
                pattern: text.to_owned(),
                source,
            })?;

        Ok(Some(Self {
            text: text.to_owned(),
            regex,
        }))
    }

    /// Whether `message` contains at least one match.
    pub fn is_match(&self, message: &str) -> bool {
        self.regex.is_match(message)
    }

    /// The search text this pattern was compiled from.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the text was used as a raw pattern.
    pub fn is_raw(&self) -> bool {
        self.text.starts_with(RAW_MARKER)
    }
}

impl PartialEq for SearchPattern {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for SearchPattern {}
