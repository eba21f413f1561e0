//! Line-oriented parser for signature corpora.
//!
//! A corpus comes from a bundled resource, an external stream, a file, or an
//! inline string. Each top-level entry point owns a fresh missing-class set,
//! threads it through recursive bundled includes, and batch-reports it once
//! at the end.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tracing::{info, warn};

use crate::error::{ProscribeError, Result};

use super::bundled;
use super::engine::SignatureEngine;
use super::glob::ClassPatternRule;
use super::resolver::{ResolvedSignature, UnresolvableReporting};
use super::version;

const BUNDLED_PREFIX: &str = "@includeBundled ";
const DEFAULT_MESSAGE_DIRECTIVE: &str = "@defaultMessage";
const DEFAULT_MESSAGE_PREFIX: &str = "@defaultMessage ";
const IGNORE_UNRESOLVABLE_LINE: &str = "@ignoreUnresolvable";
const IGNORE_MISSING_CLASSES_LINE: &str = "@ignoreMissingClasses";

impl SignatureEngine {
    /// Loads a bundled corpus by name, normalizing and, when a target JDK
    /// version is given, expanding the version token of unversioned `jdk-`
    /// references.
    pub fn add_bundled_signatures(
        &mut self,
        name: &str,
        jdk_target_version: Option<&str>,
    ) -> Result<()> {
        let mut missing = BTreeSet::new();
        self.add_bundled_inner(name, jdk_target_version, true, &mut missing)?;
        self.report_missing_classes(&missing);
        Ok(())
    }

    /// Parses user-supplied signatures from a stream.
    pub fn parse_signatures_stream<R: Read>(&mut self, reader: R, name: &str) -> Result<()> {
        info!("Reading API signatures: {name}");
        let mut missing = BTreeSet::new();
        self.parse_signatures(BufReader::new(reader), false, &mut missing)?;
        self.report_missing_classes(&missing);
        Ok(())
    }

    /// Parses user-supplied signatures from an inline string.
    pub fn parse_signatures_string(&mut self, signatures: &str) -> Result<()> {
        info!("Reading inline API signatures...");
        let mut missing = BTreeSet::new();
        self.parse_signatures(signatures.as_bytes(), false, &mut missing)?;
        self.report_missing_classes(&missing);
        Ok(())
    }

    /// Parses a signatures file from disk.
    pub fn parse_signatures_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        info!("Reading API signatures: {}", path.display());
        let mut missing = BTreeSet::new();
        let file = File::open(path)?;
        self.parse_signatures(BufReader::new(file), false, &mut missing)?;
        self.report_missing_classes(&missing);
        Ok(())
    }

    fn add_bundled_inner(
        &mut self,
        name: &str,
        jdk_target_version: Option<&str>,
        logging: bool,
        missing: &mut BTreeSet<String>,
    ) -> Result<()> {
        if !bundled::is_valid_name(name) {
            return Err(ProscribeError::parse(format!(
                "Invalid bundled signature reference: {name}"
            )));
        }
        if name == bundled::BS_JDK_NONPORTABLE {
            if logging {
                info!("Reading bundled API signatures: {name}");
            }
            self.files_parsed += 1;
            self.forbid_non_portable_runtime = true;
            return Ok(());
        }
        let mut name = version::fix_target_version(name)?;
        let mut text = bundled::lookup(&name);
        // Unversioned jdk-* references pick up the compiler's target version.
        if text.is_none() {
            if let Some(target) = jdk_target_version {
                if name.starts_with("jdk-") && !version::has_version_suffix(&name) {
                    name = version::fix_target_version(&format!("{name}-{target}"))?;
                    text = bundled::lookup(&name);
                }
            }
        }
        let Some(text) = text else {
            return Err(ProscribeError::resource_not_found(name));
        };
        if logging {
            info!("Reading bundled API signatures: {name}");
        }
        self.parse_signatures(text.as_bytes(), true, missing)
    }

    pub(crate) fn parse_signatures(
        &mut self,
        reader: impl BufRead,
        bundled_source: bool,
        missing: &mut BTreeSet<String>,
    ) -> Result<()> {
        self.files_parsed += 1;
        let mut default_message: Option<String> = None;
        let mut reporter = if self.fail_on_unresolvable {
            UnresolvableReporting::Fail
        } else {
            UnresolvableReporting::Warning
        };
        let mut local_ignore_missing = false;
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.starts_with('@') {
                if bundled_source && line.starts_with(BUNDLED_PREFIX) {
                    let name = line[BUNDLED_PREFIX.len()..].trim();
                    self.add_bundled_inner(name, None, false, missing)?;
                } else if line == DEFAULT_MESSAGE_DIRECTIVE {
                    // Bare directive clears the current default message.
                    default_message = None;
                } else if let Some(rest) = line.strip_prefix(DEFAULT_MESSAGE_PREFIX) {
                    let rest = rest.trim();
                    default_message = (!rest.is_empty()).then(|| rest.to_string());
                } else if line == IGNORE_UNRESOLVABLE_LINE {
                    reporter = if bundled_source {
                        UnresolvableReporting::Silent
                    } else {
                        warn!(
                            "'{IGNORE_UNRESOLVABLE_LINE}' inside signatures files is deprecated, \
                             prefer using '{IGNORE_MISSING_CLASSES_LINE}' to ignore signatures \
                             where the class is missing."
                        );
                        UnresolvableReporting::Warning
                    };
                } else if line == IGNORE_MISSING_CLASSES_LINE {
                    local_ignore_missing = true;
                } else {
                    return Err(ProscribeError::parse(format!(
                        "Invalid line in signature file: {line}"
                    )));
                }
            } else {
                self.add_signature(line, default_message.as_deref(), reporter, local_ignore_missing, missing)?;
            }
        }
        Ok(())
    }

    /// Splits off any `@ message` suffix, resolves the signature, and stores
    /// the result. A repeated rule for the same key overwrites the printout
    /// but leaves previously assigned severities alone.
    fn add_signature(
        &mut self,
        line: &str,
        default_message: Option<&str>,
        report: UnresolvableReporting,
        local_ignore_missing: bool,
        missing: &mut BTreeSet<String>,
    ) -> Result<()> {
        let (signature, message) = match line.find('@') {
            // An empty explicit message is treated as absent and falls back
            // to the current default message.
            Some(p) => {
                let explicit = line[p + 1..].trim();
                let message = if explicit.is_empty() { default_message } else { Some(explicit) };
                (line[..p].trim(), message)
            }
            None => (line, default_message),
        };
        let printout = match message {
            Some(m) => format!("{signature} [{m}]"),
            None => signature.to_string(),
        };
        match self.resolve_signature(signature, report, local_ignore_missing, missing)? {
            ResolvedSignature::Keys(keys) => {
                for key in keys {
                    self.signatures.insert(key, printout.clone());
                }
            }
            ResolvedSignature::ClassPattern(pattern) => {
                let rule = ClassPatternRule::new(&pattern, message)?;
                if !self.class_patterns.contains(&rule) {
                    self.class_patterns.push(rule);
                }
            }
            ResolvedSignature::Dropped => {}
        }
        Ok(())
    }

    fn report_missing_classes(&self, missing: &BTreeSet<String>) {
        if missing.is_empty() {
            return;
        }
        warn!("Some signatures were ignored because the following classes were not found on classpath:");
        warn!("{}", format_classes_abbreviated(missing));
    }
}

/// Comma-separated class list, truncated with a remainder count once the
/// line gets long.
pub(crate) fn format_classes_abbreviated(classes: &BTreeSet<String>) -> String {
    let mut out = String::new();
    for (count, class) in classes.iter().enumerate() {
        if count > 0 {
            out.push_str(", ");
        }
        out.push_str(class);
        if out.len() >= 70 && count + 1 < classes.len() {
            let remaining = classes.len() - count - 1;
            out.push_str(&format!(",... (and {remaining} more)."));
            break;
        }
    }
    out
}
