//! Process-match patterns.
//!
//! A recipe's `processMatch` entries compile to a [`ProcessMatcher`]: plain
//! strings are case-sensitive substrings, `{glob: ...}` and `{regex: ...}`
//! mappings select the other variants.

use std::fmt;

use glob::Pattern;
use regex::Regex;

use crate::domain::manifest::ProcessInfo;

/// A compiled process-match pattern.
#[derive(Debug, Clone)]
pub enum ProcessMatcher {
    /// Matches when the pattern occurs anywhere in the target.
    Substring(String),
    /// Shell-style glob (`*`, `?`, `[...]`) anchored to the whole target.
    Glob(Pattern),
    /// Unanchored regular expression.
    Regex(Regex),
}

impl ProcessMatcher {
    #[must_use]
    pub fn substring(pattern: &str) -> Self {
        Self::Substring(pattern.to_string())
    }

    /// Compile a glob pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern` is not a valid glob, e.g. an unclosed
    /// `[` class.
    pub fn glob(pattern: &str) -> Result<Self, glob::PatternError> {
        Ok(Self::Glob(Pattern::new(pattern)?))
    }

    /// Compile a regular expression.
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern` is not a valid regular expression.
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::Regex(Regex::new(pattern)?))
    }

    /// The pattern source as written in the recipe.
    #[must_use]
    pub fn pattern(&self) -> &str {
        match self {
            Self::Substring(p) => p,
            Self::Glob(glob) => glob.as_str(),
            Self::Regex(re) => re.as_str(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Substring(_) => "substring",
            Self::Glob(_) => "glob",
            Self::Regex(_) => "regex",
        }
    }

    #[must_use]
    pub fn is_match(&self, target: &str) -> bool {
        match self {
            Self::Substring(p) => target.contains(p.as_str()),
            Self::Glob(glob) => glob.matches(target),
            Self::Regex(re) => re.is_match(target),
        }
    }

    #[must_use]
    pub fn matches_process(&self, process: &ProcessInfo) -> bool {
        self.is_match(process.match_target())
    }
}

impl PartialEq for ProcessMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.pattern() == other.pattern()
    }
}

impl Eq for ProcessMatcher {}

impl fmt::Display for ProcessMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Substring(p) => write!(f, "{p}"),
            Self::Glob(glob) => write!(f, "glob:{}", glob.as_str()),
            Self::Regex(re) => write!(f, "regex:{}", re.as_str()),
        }
    }
}
