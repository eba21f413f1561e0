//! Forbidden-API signature database.
//!
//! This module contains the rule language, its parser, the classpath-aware
//! resolver, and the violation classifier.
//!
//! # Structure
//! - `types`: Core type definitions (Severity, Violation, SignatureKey)
//! - `engine`: Rule store, severity overrides, classifier queries
//! - `parser`: Line-oriented corpus parsing and directives
//! - `resolver`: Signature-line resolution against classpath metadata
//! - `glob`: Class-name pattern compilation and matching
//! - `version`: JDK version-token canonicalization for bundled names
//! - `bundled`: Embedded bundled signature corpora

mod bundled;
mod engine;
mod glob;
mod parser;
mod resolver;
mod types;
mod version;

pub use bundled::{bundled_names, BS_JDK_NONPORTABLE};
pub use engine::SignatureEngine;
pub use glob::ClassPatternRule;
pub use types::{Severity, SignatureKey, Violation};
pub use version::fix_target_version;
