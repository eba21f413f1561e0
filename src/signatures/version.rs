//! Canonicalization of JDK version tokens in bundled ruleset names.
//!
//! Bundled JDK rulesets use the historical `1.x` numbering up to Java 8 and
//! plain major numbering from Java 9 on. References written either way are
//! rewritten to the canonical resource name before lookup.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ProscribeError, Result};

#[allow(clippy::unwrap_used)] // Static regex pattern is hardcoded and valid
fn jdk_sig_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(jdk-.*?-)(\d+)(\.\d+)?((?:\.\d+)*)$").unwrap())
}

#[allow(clippy::unwrap_used)] // Static regex pattern is hardcoded and valid
fn version_suffix_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^.*-\d+(?:\.\d+)*$").unwrap())
}

/// Returns true if a bundled name already ends in a version token.
pub(crate) fn has_version_suffix(name: &str) -> bool {
    version_suffix_pattern().is_match(name)
}

/// Rewrites the JDK version token of a bundled ruleset name to canonical
/// form. Names without a recognized version token pass through unchanged.
///
/// Canonical forms: `1.minor` for Java 1.1-1.8 (majors 2-8 are bridged to
/// `1.major`), bare `major` for Java 9+ feature releases, `major.minor` for
/// Java 9+ update releases. Everything else is rejected.
pub fn fix_target_version(name: &str) -> Result<String> {
    let invalid = || {
        ProscribeError::parse(format!(
            "Invalid bundled signature reference (JDK version is invalid): {name}"
        ))
    };
    let Some(caps) = jdk_sig_pattern().captures(name) else {
        return Ok(name.to_string());
    };
    if !caps[4].is_empty() {
        return Err(invalid());
    }
    let prefix = &caps[1];
    let major: u32 = caps[2].parse().map_err(|_| invalid())?;
    let minor: u32 = match caps.get(3) {
        Some(m) => m.as_str()[1..].parse().map_err(|_| invalid())?,
        None => 0,
    };
    if major == 1 && (1..9).contains(&minor) {
        Ok(format!("{prefix}1.{minor}"))
    } else if (2..9).contains(&major) && minor == 0 {
        Ok(format!("{prefix}1.{major}"))
    } else if major >= 9 && minor > 0 {
        Ok(format!("{prefix}{major}.{minor}"))
    } else if major >= 9 && minor == 0 {
        Ok(format!("{prefix}{major}"))
    } else {
        Err(invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_numbering_kept() {
        assert_eq!(fix_target_version("jdk-deprecated-1.7").unwrap(), "jdk-deprecated-1.7");
        assert_eq!(fix_target_version("jdk-unsafe-1.1").unwrap(), "jdk-unsafe-1.1");
    }

    #[test]
    fn test_pre_nine_majors_bridged() {
        assert_eq!(fix_target_version("jdk-deprecated-7").unwrap(), "jdk-deprecated-1.7");
        assert_eq!(fix_target_version("jdk-unsafe-8").unwrap(), "jdk-unsafe-1.8");
    }

    #[test]
    fn test_modern_numbering() {
        assert_eq!(fix_target_version("jdk-deprecated-9").unwrap(), "jdk-deprecated-9");
        assert_eq!(fix_target_version("jdk-deprecated-9.1").unwrap(), "jdk-deprecated-9.1");
        assert_eq!(fix_target_version("jdk-deprecated-11.0").unwrap(), "jdk-deprecated-11");
    }

    #[test]
    fn test_invalid_combinations() {
        assert!(fix_target_version("jdk-deprecated-2.5").is_err());
        assert!(fix_target_version("jdk-deprecated-1.0").is_err());
        assert!(fix_target_version("jdk-deprecated-1.9").is_err());
        assert!(fix_target_version("jdk-deprecated-1.7.1").is_err());
    }

    #[test]
    fn test_unversioned_names_pass_through() {
        assert_eq!(fix_target_version("jdk-system-out").unwrap(), "jdk-system-out");
        assert_eq!(fix_target_version("commons-io-unsafe-2").unwrap(), "commons-io-unsafe-2");
    }

    #[test]
    fn test_version_suffix_detection() {
        assert!(has_version_suffix("jdk-unsafe-1.8"));
        assert!(has_version_suffix("jdk-unsafe-9"));
        assert!(!has_version_suffix("jdk-unsafe"));
        assert!(!has_version_suffix("jdk-system-out"));
    }
}
