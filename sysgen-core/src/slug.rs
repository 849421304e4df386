//! Slug derivation: lowercase kebab identifiers for unit file names.
//!
//! Words are maximal runs of ASCII alphanumerics. Anything else separates
//! words, as does a lower→upper case transition and the end of an acronym
//! (`HTTPServer` → `http-server`). Letter/digit transitions never split, so
//! `backup-timer-1d` is already a slug.

use std::fmt;

/// A service-manager safe identifier derived from a human readable name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slug(pub String);

impl Slug {
    /// Slug of a single name.
    pub fn of(name: &str) -> Self {
        Self(kebab(name))
    }

    /// `<self>-<kebab(name)>`: the slug of an entity owned by this project.
    pub fn child(&self, name: &str) -> Self {
        Self(format!("{}-{}", self.0, kebab(name)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Convert `name` to lowercase kebab case.
///
/// Idempotent: `kebab(&kebab(x)) == kebab(x)`.
pub fn kebab(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            flush_word(&mut current, &mut words);
            continue;
        }
        // `current` is non-empty only when the previous char was alphanumeric.
        if c.is_ascii_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase() || (prev.is_ascii_uppercase() && next_is_lower) {
                flush_word(&mut current, &mut words);
            }
        }
        current.push(c.to_ascii_lowercase());
    }
    flush_word(&mut current, &mut words);

    words.join("-")
}

fn flush_word(current: &mut String, words: &mut Vec<String>) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}
