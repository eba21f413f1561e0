//! Core types for the signature database.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::descriptor::MethodSig;

/// Severity attached to a matched violation.
///
/// Absent a per-rule override, the engine-wide default applies: `Error` when
/// the engine was built with fail-on-violation, else `Warning`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        })
    }
}

/// A matched forbidden-API reference: formatted message plus resolved severity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Violation {
    pub message: String,
    pub severity: Severity,
}

/// Canonical lookup key for one forbidden signature.
///
/// The enum tag keeps class, field, and method keys disjoint even when they
/// share textual components. Method keys always carry a concrete declared
/// descriptor; wildcard-argument rules are expanded to one key per matching
/// overload during resolution and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SignatureKey {
    Class { class: String },
    Field { class: String, field: String },
    Method { class: String, method: MethodSig },
}

impl SignatureKey {
    pub fn class<S: Into<String>>(class: S) -> Self {
        Self::Class { class: class.into() }
    }

    pub fn field<C: Into<String>, F: Into<String>>(class: C, field: F) -> Self {
        Self::Field { class: class.into(), field: field.into() }
    }

    pub fn method<C: Into<String>>(class: C, method: MethodSig) -> Self {
        Self::Method { class: class.into(), method }
    }
}
