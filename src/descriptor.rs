//! JVM type descriptors and method identities.
//!
//! Signature rules spell types in source form (`int`, `java.lang.String`,
//! `byte[][]`), while class metadata and bytecode scanners speak JVM
//! descriptors (`I`, `Ljava/lang/String;`, `[[B`). This module converts
//! between the two and defines the method identity used as part of lookup
//! keys.

use crate::error::{ProscribeError, Result};

/// A JVM type, in resolved form.
///
/// `Object` carries the internal (slash-separated) class name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JavaType {
    Void,
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Object(String),
    Array(Box<JavaType>),
}

impl JavaType {
    /// Builds an object type from either the internal or the binary spelling
    /// of a class name.
    pub fn object<S: AsRef<str>>(class_name: S) -> Self {
        Self::Object(class_name.as_ref().replace('.', "/"))
    }

    /// Parses a source-form type name as written in signature rules:
    /// a primitive name, a dot-separated class name, or either followed by
    /// one or more `[]` suffixes. Unqualified names denote default-package
    /// classes.
    pub fn from_source(name: &str) -> Result<Self> {
        let mut base = name.trim();
        let mut dims = 0usize;
        while let Some(stripped) = base.strip_suffix("[]") {
            base = stripped.trim_end();
            dims += 1;
        }
        let elem = match base {
            "void" => Self::Void,
            "boolean" => Self::Boolean,
            "byte" => Self::Byte,
            "char" => Self::Char,
            "short" => Self::Short,
            "int" => Self::Int,
            "long" => Self::Long,
            "float" => Self::Float,
            "double" => Self::Double,
            _ => {
                let valid = !base.is_empty()
                    && base
                        .chars()
                        .all(|c| c.is_alphanumeric() || c == '.' || c == '_' || c == '$');
                if !valid {
                    return Err(ProscribeError::parse(format!("Invalid type name: {name}")));
                }
                Self::Object(base.replace('.', "/"))
            }
        };
        Ok((0..dims).fold(elem, |t, _| Self::Array(Box::new(t))))
    }

    /// Parses a single complete JVM type descriptor.
    pub fn from_descriptor(desc: &str) -> Result<Self> {
        let (ty, rest) = read_type(desc)?;
        if !rest.is_empty() {
            return Err(ProscribeError::parse(format!(
                "Invalid type descriptor: {desc}"
            )));
        }
        Ok(ty)
    }

    /// Renders the JVM descriptor for this type.
    pub fn descriptor(&self) -> String {
        match self {
            Self::Void => "V".to_string(),
            Self::Boolean => "Z".to_string(),
            Self::Byte => "B".to_string(),
            Self::Char => "C".to_string(),
            Self::Short => "S".to_string(),
            Self::Int => "I".to_string(),
            Self::Long => "J".to_string(),
            Self::Float => "F".to_string(),
            Self::Double => "D".to_string(),
            Self::Object(name) => format!("L{name};"),
            Self::Array(elem) => format!("[{}", elem.descriptor()),
        }
    }

    /// Binary (dot-separated) name, with `[]` suffixes for arrays.
    pub fn class_name(&self) -> String {
        match self {
            Self::Void => "void".to_string(),
            Self::Boolean => "boolean".to_string(),
            Self::Byte => "byte".to_string(),
            Self::Char => "char".to_string(),
            Self::Short => "short".to_string(),
            Self::Int => "int".to_string(),
            Self::Long => "long".to_string(),
            Self::Float => "float".to_string(),
            Self::Double => "double".to_string(),
            Self::Object(name) => name.replace('/', "."),
            Self::Array(elem) => format!("{}[]", elem.class_name()),
        }
    }

    /// Internal class name for object types, `None` for primitives and arrays.
    pub fn internal_name(&self) -> Option<&str> {
        match self {
            Self::Object(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }
}

fn read_type(desc: &str) -> Result<(JavaType, &str)> {
    let mut chars = desc.chars();
    let ty = match chars.next() {
        Some('V') => JavaType::Void,
        Some('Z') => JavaType::Boolean,
        Some('B') => JavaType::Byte,
        Some('C') => JavaType::Char,
        Some('S') => JavaType::Short,
        Some('I') => JavaType::Int,
        Some('J') => JavaType::Long,
        Some('F') => JavaType::Float,
        Some('D') => JavaType::Double,
        Some('L') => {
            let rest = chars.as_str();
            let end = rest.find(';').ok_or_else(|| {
                ProscribeError::parse(format!("Invalid type descriptor: {desc}"))
            })?;
            if end == 0 {
                return Err(ProscribeError::parse(format!(
                    "Invalid type descriptor: {desc}"
                )));
            }
            return Ok((JavaType::Object(rest[..end].to_string()), &rest[end + 1..]));
        }
        Some('[') => {
            let (elem, rest) = read_type(chars.as_str())?;
            return Ok((JavaType::Array(Box::new(elem)), rest));
        }
        _ => {
            return Err(ProscribeError::parse(format!(
                "Invalid type descriptor: {desc}"
            )))
        }
    };
    Ok((ty, chars.as_str()))
}

/// Splits a JVM method descriptor into argument types and return type.
pub fn parse_method_descriptor(desc: &str) -> Result<(Vec<JavaType>, JavaType)> {
    let invalid = || ProscribeError::parse(format!("Invalid method descriptor: {desc}"));
    let inner = desc.strip_prefix('(').ok_or_else(invalid)?;
    let (mut args_str, ret_str) = inner.split_once(')').ok_or_else(invalid)?;
    let mut args = Vec::new();
    while !args_str.is_empty() {
        let (ty, rest) = read_type(args_str)?;
        if ty == JavaType::Void {
            return Err(invalid());
        }
        args.push(ty);
        args_str = rest;
    }
    Ok((args, JavaType::from_descriptor(ret_str)?))
}

/// A declared method identity: name plus full JVM descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSig {
    pub name: String,
    pub desc: String,
}

impl MethodSig {
    pub fn new<N: Into<String>, D: Into<String>>(name: N, desc: D) -> Self {
        Self { name: name.into(), desc: desc.into() }
    }

    /// Argument types parsed from the descriptor.
    pub fn argument_types(&self) -> Result<Vec<JavaType>> {
        parse_method_descriptor(&self.desc).map(|(args, _)| args)
    }
}
