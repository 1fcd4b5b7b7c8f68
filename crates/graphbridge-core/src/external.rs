//! External module patterns.
//!
//! Patterns like `*.png` or `/vendor/*` mark specifiers as always external,
//! independent of resolution. `*` matches any run of characters; everything
//! else matches literally, and the whole specifier must match.

use crate::error::Error;
use regex_lite::Regex;

/// Translate an external pattern into anchored regex source.
#[must_use]
pub fn external_pattern_source(pattern: &str) -> String {
    let mut source = String::with_capacity(pattern.len() + 4);
    source.push('^');
    for (i, literal) in pattern.split('*').enumerate() {
        if i > 0 {
            source.push_str(".*");
        }
        source.push_str(&regex_lite::escape(literal));
    }
    source.push('$');
    source
}

/// Compile an external pattern into an anchored regex.
pub fn external_to_regex(pattern: &str) -> Result<Regex, Error> {
    Regex::new(&external_pattern_source(pattern)).map_err(|source| Error::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// A set of compiled external patterns.
#[derive(Debug, Clone, Default)]
pub struct ExternalMatcher {
    patterns: Vec<Regex>,
}

impl ExternalMatcher {
    /// Compile a list of external patterns.
    pub fn new<I, S>(patterns: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| external_to_regex(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Check whether a specifier matches any pattern.
    #[must_use]
    pub fn is_match(&self, specifier: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(specifier))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
