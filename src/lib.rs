//! proscribe - static forbidden-API policy engine for compiled JVM artifacts.
//!
//! This library answers one question for build-time tooling: given a corpus
//! of textual API rules, is a concrete symbol reference (type use, method
//! invocation, field access) forbidden, and with what message and severity?
//! Rule corpora are parsed against live classpath metadata supplied through
//! the [`ClassLookup`] collaborator; a bytecode scanner then drives the
//! `check_*` queries with the references it finds in a compiled artifact and
//! decides itself whether to abort or keep scanning.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use proscribe::{ClassMetadata, ClasspathIndex, MethodSig, SignatureEngine};
//!
//! let mut classpath = ClasspathIndex::new();
//! classpath.add(ClassMetadata::new("java/lang/System").with_method("exit", "(I)V"));
//!
//! let mut engine = SignatureEngine::new(Arc::new(classpath));
//! engine
//!     .parse_signatures_string("java.lang.System#exit(int) @ Use the exit handler instead")
//!     .unwrap();
//!
//! let violation = engine
//!     .check_method("java/lang/System", &MethodSig::new("exit", "(I)V"))
//!     .expect("forbidden");
//! assert!(violation.message.contains("exit(int)"));
//! ```

pub mod classpath;
pub mod descriptor;
pub mod error;
pub mod signatures;

pub use classpath::{ClassLookup, ClassMetadata, ClasspathIndex};
pub use descriptor::{JavaType, MethodSig};
pub use error::{ProscribeError, Result};
pub use signatures::{
    bundled_names, fix_target_version, Severity, SignatureEngine, SignatureKey, Violation,
    BS_JDK_NONPORTABLE,
};
