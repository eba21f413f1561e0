//! Classpath metadata collaborator interface.
//!
//! The signature engine never loads classes itself. During rule resolution it
//! asks a [`ClassLookup`] implementation whether a referenced class exists and
//! what members it declares. Build front ends back this with whatever they
//! have (a classloader, a jar index); [`ClasspathIndex`] is the in-memory
//! implementation used by tests and embedding tools.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::descriptor::MethodSig;

/// Declared surface of one class, as seen on the classpath.
#[derive(Debug, Clone)]
pub struct ClassMetadata {
    /// Canonical internal (slash-separated) class name.
    pub class_name: String,
    /// All declared methods, including bridge/covariant duplicates.
    pub methods: Vec<MethodSig>,
    /// Names of all declared fields.
    pub fields: FxHashSet<String>,
}

impl ClassMetadata {
    /// Creates empty metadata; accepts either the internal or the binary
    /// spelling of the class name.
    pub fn new<S: AsRef<str>>(class_name: S) -> Self {
        Self {
            class_name: class_name.as_ref().replace('.', "/"),
            methods: Vec::new(),
            fields: FxHashSet::default(),
        }
    }

    #[must_use]
    pub fn with_method<N: Into<String>, D: Into<String>>(mut self, name: N, desc: D) -> Self {
        self.methods.push(MethodSig::new(name, desc));
        self
    }

    #[must_use]
    pub fn with_field<S: Into<String>>(mut self, name: S) -> Self {
        self.fields.insert(name.into());
        self
    }

    /// Binary (dot-separated) class name.
    pub fn binary_name(&self) -> String {
        self.class_name.replace('/', ".")
    }
}

/// Answers "does class X exist, and what does it declare" during rule
/// resolution. Class names are passed as written in signature lines
/// (dot-separated binary names).
pub trait ClassLookup: Send + Sync {
    fn lookup_class(&self, class_name: &str) -> Option<Arc<ClassMetadata>>;
}

/// In-memory classpath index.
#[derive(Debug, Default)]
pub struct ClasspathIndex {
    classes: FxHashMap<String, Arc<ClassMetadata>>,
}

impl ClasspathIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a class under its binary name.
    pub fn add(&mut self, metadata: ClassMetadata) {
        self.classes.insert(metadata.binary_name(), Arc::new(metadata));
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClassLookup for ClasspathIndex {
    fn lookup_class(&self, class_name: &str) -> Option<Arc<ClassMetadata>> {
        self.classes.get(class_name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_lookup_by_binary_name() {
        let mut index = ClasspathIndex::new();
        index.add(
            ClassMetadata::new("java/lang/System")
                .with_method("exit", "(I)V")
                .with_field("out"),
        );

        let meta = index.lookup_class("java.lang.System").expect("registered");
        assert_eq!(meta.class_name, "java/lang/System");
        assert!(meta.fields.contains("out"));
        assert!(index.lookup_class("java.lang.Missing").is_none());
    }

    #[test]
    fn test_metadata_normalizes_dotted_names() {
        let meta = ClassMetadata::new("java.util.Locale");
        assert_eq!(meta.class_name, "java/util/Locale");
        assert_eq!(meta.binary_name(), "java.util.Locale");
    }
}
