//! The signature rule store and violation classifier.

use std::collections::BTreeSet;
use std::sync::Arc;

use regex::Regex;
use rustc_hash::FxHashMap;
use tracing::info;

use crate::classpath::ClassLookup;
use crate::descriptor::{JavaType, MethodSig};
use crate::error::Result;

use super::glob::{self, ClassPatternRule};
use super::resolver::{ResolvedSignature, UnresolvableReporting};
use super::types::{Severity, SignatureKey, Violation};

/// Forbidden-API signature database: parsed rules, severity overrides, and
/// the classifier queries called by bytecode scanners.
///
/// Usage contract: all parse and severity-assignment calls complete first,
/// from one owner. After that the store is frozen by convention and the
/// `check_*` queries are side-effect-free, safe to call from parallel
/// scanner threads.
pub struct SignatureEngine {
    pub(crate) lookup: Arc<dyn ClassLookup>,
    pub(crate) ignore_missing_classes: bool,
    pub(crate) fail_on_unresolvable: bool,
    fail_on_violation: bool,
    /// Exact-key rules; the value is the printout reported on a match.
    pub(crate) signatures: FxHashMap<SignatureKey, String>,
    /// Class-name pattern rules, in declaration order.
    pub(crate) class_patterns: Vec<ClassPatternRule>,
    severity_by_key: FxHashMap<SignatureKey, Severity>,
    severity_by_pattern: Vec<(Regex, Severity)>,
    pub(crate) forbid_non_portable_runtime: bool,
    pub(crate) files_parsed: u32,
}

impl SignatureEngine {
    pub fn new(lookup: Arc<dyn ClassLookup>) -> Self {
        Self {
            lookup,
            ignore_missing_classes: false,
            fail_on_unresolvable: false,
            fail_on_violation: false,
            signatures: FxHashMap::default(),
            class_patterns: Vec::new(),
            severity_by_key: FxHashMap::default(),
            severity_by_pattern: Vec::new(),
            forbid_non_portable_runtime: false,
            files_parsed: 0,
        }
    }

    /// Silently drop rules whose referenced class is missing, in every corpus.
    #[must_use]
    pub fn with_ignore_missing_classes(mut self, ignore: bool) -> Self {
        self.ignore_missing_classes = ignore;
        self
    }

    /// Abort parsing on the first unresolvable signature instead of warning.
    #[must_use]
    pub fn with_fail_on_unresolvable(mut self, fail: bool) -> Self {
        self.fail_on_unresolvable = fail;
        self
    }

    /// Default matched violations to `ERROR` severity instead of `WARNING`.
    #[must_use]
    pub fn with_fail_on_violation(mut self, fail: bool) -> Self {
        self.fail_on_violation = fail;
        self
    }

    /// Attaches a severity to the key(s) or pattern a signature resolves to.
    ///
    /// Resolution runs silently: a severity override for a signature that
    /// cannot be resolved is a no-op, not an error.
    pub fn set_signature_severity(&mut self, signature: &str, severity: Severity) -> Result<()> {
        let mut missing = BTreeSet::new();
        match self.resolve_signature(signature, UnresolvableReporting::Silent, true, &mut missing)? {
            ResolvedSignature::Keys(keys) => {
                for key in keys {
                    self.severity_by_key.insert(key, severity);
                }
            }
            ResolvedSignature::ClassPattern(pattern) => {
                self.severity_by_pattern.push((glob::glob_to_regex(&pattern)?, severity));
            }
            ResolvedSignature::Dropped => {}
        }
        Ok(())
    }

    pub fn set_signatures_severity<I, S>(&mut self, signatures: I, severity: Severity) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        info!("Adjusting severity to {severity} for signatures...");
        for signature in signatures {
            self.set_signature_severity(signature.as_ref(), severity)?;
        }
        Ok(())
    }

    /// Classifies a type reference. Only object types can match; primitives
    /// and arrays pass immediately.
    pub fn check_type(&self, ty: &JavaType, what: &str) -> Option<Violation> {
        let internal = ty.internal_name()?;
        let key = SignatureKey::class(internal);
        if let Some(printout) = self.signatures.get(&key) {
            return Some(Violation {
                message: format!("Forbidden {what} use: {printout}"),
                severity: self.severity_for_key(&key),
            });
        }
        let binary_name = ty.class_name();
        for rule in &self.class_patterns {
            if rule.matches(&binary_name) {
                return Some(Violation {
                    message: format!("Forbidden {what} use: {}", rule.printout(&binary_name)),
                    severity: self.severity_for_class_name(&binary_name),
                });
            }
        }
        None
    }

    /// Classifies a method reference. Methods are matched by exact key only,
    /// never via class patterns.
    pub fn check_method(&self, internal_class_name: &str, method: &MethodSig) -> Option<Violation> {
        let key = SignatureKey::method(internal_class_name, method.clone());
        self.signatures.get(&key).map(|printout| Violation {
            message: format!("Forbidden method invocation: {printout}"),
            severity: self.severity_for_key(&key),
        })
    }

    /// Classifies a field access. Fields are matched by exact key only.
    pub fn check_field(&self, internal_class_name: &str, field: &str) -> Option<Violation> {
        let key = SignatureKey::field(internal_class_name, field);
        self.signatures.get(&key).map(|printout| Violation {
            message: format!("Forbidden field access: {printout}"),
            severity: self.severity_for_key(&key),
        })
    }

    /// Returns true if no rules at all were registered.
    pub fn has_no_signatures(&self) -> bool {
        self.signatures.is_empty()
            && self.class_patterns.is_empty()
            && !self.forbid_non_portable_runtime
    }

    /// Returns true if no signature corpora were parsed at all.
    pub fn no_signature_files_parsed(&self) -> bool {
        self.files_parsed == 0
    }

    /// Returns true if the non-portable runtime heuristics ruleset was
    /// requested.
    pub fn is_non_portable_runtime_forbidden(&self) -> bool {
        self.forbid_non_portable_runtime
    }

    fn default_severity(&self) -> Severity {
        if self.fail_on_violation {
            Severity::Error
        } else {
            Severity::Warning
        }
    }

    fn severity_for_key(&self, key: &SignatureKey) -> Severity {
        self.severity_by_key.get(key).copied().unwrap_or_else(|| self.default_severity())
    }

    fn severity_for_class_name(&self, class_name: &str) -> Severity {
        self.severity_by_pattern
            .iter()
            .find(|(pattern, _)| pattern.is_match(class_name))
            .map(|(_, severity)| *severity)
            .unwrap_or_else(|| self.default_severity())
    }
}
