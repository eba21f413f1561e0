//! Class-name glob patterns.
//!
//! Globs are matched against binary (dot-separated) class names. `**` crosses
//! package boundaries, `*` matches within one segment, `?` matches a single
//! non-dot character.

use regex::Regex;

use crate::error::{ProscribeError, Result};

/// Returns true if the class position of a signature is a pattern rather than
/// a plain name.
pub(crate) fn is_glob(name: &str) -> bool {
    name.contains('*') || name.contains('?')
}

/// Compiles a class-name glob into an anchored regex.
pub(crate) fn glob_to_regex(glob: &str) -> Result<Regex> {
    let mut regex = String::with_capacity(glob.len() + 16);
    regex.push('^');
    let mut chars = glob.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => {
                if chars.peek() == Some(&'*') {
                    chars.next();
                    regex.push_str("(.*)");
                } else {
                    regex.push_str("([^.]*)");
                }
            }
            '?' => regex.push_str("([^.])"),
            _ => regex.push_str(&regex::escape(&c.to_string())),
        }
    }
    regex.push('$');
    Regex::new(&regex)
        .map_err(|e| ProscribeError::parse(format!("Invalid class pattern '{glob}': {e}")))
}

/// A forbidden class-name pattern with its optional message.
#[derive(Debug)]
pub struct ClassPatternRule {
    glob: String,
    pattern: Regex,
    message: Option<String>,
}

impl ClassPatternRule {
    pub(crate) fn new(glob: &str, message: Option<&str>) -> Result<Self> {
        Ok(Self {
            glob: glob.to_string(),
            pattern: glob_to_regex(glob)?,
            message: message.map(str::to_string),
        })
    }

    pub fn matches(&self, class_name: &str) -> bool {
        self.pattern.is_match(class_name)
    }

    /// Printout for a matched class: the concrete name, with the rule message
    /// appended when one was given.
    pub fn printout(&self, class_name: &str) -> String {
        match &self.message {
            Some(message) => format!("{class_name} [{message}]"),
            None => class_name.to_string(),
        }
    }

    pub fn glob(&self) -> &str {
        &self.glob
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl PartialEq for ClassPatternRule {
    fn eq(&self, other: &Self) -> bool {
        self.glob == other.glob && self.message == other.message
    }
}

impl Eq for ClassPatternRule {}
