//! Logical resource names derived from input paths.
//!
//! A name is the input path with two *character classes* trimmed off:
//!
//! - from the left, every character in the set `{r, e, s}`
//! - from the right, every character in the set `{i, n, d, e, x, ., h, t, m, l}`
//!
//! These are sets, not a prefix and a suffix. Trimming stops at the first
//! character outside the set, whatever the order:
//!
//! - `res/index.html` → `/`
//! - `res/about/index.html` → `/about/`
//! - `res/index.js` → `/index.js` (`s` is not in the right-hand set)
//! - `res/sheet.html` → `/s` (right trim eats `heet.html` too)
//! - `resources/index.html` → `ources/`
//!
//! Two inputs can collapse onto the same name; [`crate::compile`] detects that.

use crate::config::NamingConfig;
use std::path::Path;

/// The character sets trimmed from each end of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRules {
    leading: Vec<char>,
    trailing: Vec<char>,
}

impl NameRules {
    /// Build rules from two strings whose *characters* form the trim sets.
    pub fn new(leading: &str, trailing: &str) -> Self {
        Self {
            leading: leading.chars().collect(),
            trailing: trailing.chars().collect(),
        }
    }

    pub fn from_config(config: &NamingConfig) -> Self {
        Self::new(&config.strip_leading, &config.strip_trailing)
    }

    /// Trim the configured character classes from both ends of `name`.
    pub fn apply<'a>(&self, name: &'a str) -> &'a str {
        name.trim_start_matches(|c| self.leading.contains(&c))
            .trim_end_matches(|c| self.trailing.contains(&c))
    }

    /// Resolve a filesystem path to its logical name.
    ///
    /// The path is taken exactly as given (no canonicalisation, separators
    /// untouched). Non-UTF-8 components are replaced lossily.
    pub fn resolve(&self, path: &Path) -> String {
        self.apply(&path.to_string_lossy()).to_string()
    }
}

impl Default for NameRules {
    fn default() -> Self {
        Self::from_config(&NamingConfig::default())
    }
}

/// Resolve a path string with the default `res` / `index.html` sets.
pub fn resolve(path: &str) -> String {
    NameRules::default().apply(path).to_string()
}
