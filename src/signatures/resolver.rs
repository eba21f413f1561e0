//! Resolution of textual signature lines into lookup keys.
//!
//! One line resolves to zero or more concrete keys (one per matching declared
//! overload), to a class-name pattern, or to nothing when the active
//! reporting policy drops it.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use crate::descriptor::JavaType;
use crate::error::{ProscribeError, Result};

use super::engine::SignatureEngine;
use super::glob;
use super::types::SignatureKey;

/// How resolution failures (unknown class, member not found) are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnresolvableReporting {
    /// Abort the whole parse with a parse error.
    Fail,
    /// Log a warning and drop the line.
    Warning,
    /// Drop the line without output.
    Silent,
}

impl UnresolvableReporting {
    /// Class-not-found goes through [`Self::parse_failed`] in Fail and Silent
    /// modes; Warning mode records the class for the end-of-parse batch
    /// report instead.
    pub(crate) fn report_class_not_found(self) -> bool {
        !matches!(self, Self::Warning)
    }

    pub(crate) fn parse_failed(self, message: &str, signature: &str) -> Result<()> {
        match self {
            Self::Fail => Err(ProscribeError::parse(format!(
                "{message} while parsing signature: {signature}"
            ))),
            Self::Warning => {
                warn!("{message} while parsing signature: {signature} [signature ignored]");
                Ok(())
            }
            Self::Silent => Ok(()),
        }
    }
}

/// Outcome of resolving one signature line.
pub(crate) enum ResolvedSignature {
    /// Concrete keys, one per matching declared member.
    Keys(Vec<SignatureKey>),
    /// The class position was a glob; to be registered as a pattern rule.
    ClassPattern(String),
    /// Dropped under the active reporting policy.
    Dropped,
}

enum MemberRequest<'a> {
    None,
    Field(&'a str),
    Method { name: &'a str, args: ArgSpec },
}

/// Requested argument list of a method signature.
enum ArgSpec {
    /// `(**)`: any argument list.
    Any,
    /// Exact argument types; holds the rendered argument descriptor,
    /// parentheses included.
    Exact(String),
}

impl ArgSpec {
    /// A full method descriptor starts with its argument descriptor, so a
    /// prefix test against `(...)` compares argument types exactly.
    fn matches(&self, desc: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(args) => desc.starts_with(args.as_str()),
        }
    }
}

#[allow(clippy::unwrap_used)] // Static regex pattern is hardcoded and valid
fn wildcard_args_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\(\s*\*\*\s*\)$").unwrap())
}

fn parse_args(args: &str, signature: &str) -> Result<ArgSpec> {
    if wildcard_args_pattern().is_match(args) {
        return Ok(ArgSpec::Any);
    }
    let invalid = || ProscribeError::parse(format!("Invalid method signature: {signature}"));
    let inner = args
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(invalid)?;
    let mut rendered = String::from("(");
    if !inner.trim().is_empty() {
        for arg in inner.split(',') {
            let ty = JavaType::from_source(arg).map_err(|_| invalid())?;
            rendered.push_str(&ty.descriptor());
        }
    }
    rendered.push(')');
    Ok(ArgSpec::Exact(rendered))
}

fn parse_member<'a>(member: Option<&'a str>, signature: &str) -> Result<MemberRequest<'a>> {
    let Some(member) = member else {
        return Ok(MemberRequest::None);
    };
    match member.find('(') {
        Some(0) => Err(ProscribeError::parse(format!(
            "Invalid method signature (method name missing): {signature}"
        ))),
        Some(p) => Ok(MemberRequest::Method {
            name: member[..p].trim(),
            args: parse_args(&member[p..], signature)?,
        }),
        None => Ok(MemberRequest::Field(member)),
    }
}

impl SignatureEngine {
    /// Resolves one signature (the line with any `@ message` already split
    /// off) against the classpath metadata collaborator.
    pub(crate) fn resolve_signature(
        &self,
        signature: &str,
        report: UnresolvableReporting,
        local_ignore_missing: bool,
        missing: &mut BTreeSet<String>,
    ) -> Result<ResolvedSignature> {
        if signature.is_empty() {
            return Err(ProscribeError::parse("Empty signature"));
        }
        let (clazz, member) = match signature.find('#') {
            Some(p) => (&signature[..p], Some(&signature[p + 1..])),
            None => (signature, None),
        };
        let request = parse_member(member, signature)?;

        if glob::is_glob(clazz) {
            if !matches!(request, MemberRequest::None) {
                return Err(ProscribeError::parse(format!(
                    "Class level glob pattern cannot be combined with methods/fields: {signature}"
                )));
            }
            return Ok(ResolvedSignature::ClassPattern(clazz.to_string()));
        }

        let Some(meta) = self.lookup.lookup_class(clazz) else {
            if self.ignore_missing_classes || local_ignore_missing {
                return Ok(ResolvedSignature::Dropped);
            }
            if report.report_class_not_found() {
                report.parse_failed(
                    &format!("Class '{clazz}' not found on classpath"),
                    signature,
                )?;
            } else {
                missing.insert(clazz.to_string());
            }
            return Ok(ResolvedSignature::Dropped);
        };

        match request {
            MemberRequest::Method { name, args } => {
                // Collect every matching overload; covariant overrides leave
                // more than one declared method with the same logical
                // signature, and all of them must be keyed.
                let keys: Vec<SignatureKey> = meta
                    .methods
                    .iter()
                    .filter(|m| m.name == name && args.matches(&m.desc))
                    .map(|m| SignatureKey::method(meta.class_name.clone(), m.clone()))
                    .collect();
                if keys.is_empty() {
                    report.parse_failed("Method not found", signature)?;
                    return Ok(ResolvedSignature::Dropped);
                }
                Ok(ResolvedSignature::Keys(keys))
            }
            MemberRequest::Field(field) => {
                if !meta.fields.contains(field) {
                    report.parse_failed("Field not found", signature)?;
                    return Ok(ResolvedSignature::Dropped);
                }
                Ok(ResolvedSignature::Keys(vec![SignatureKey::field(
                    meta.class_name.clone(),
                    field,
                )]))
            }
            MemberRequest::None => Ok(ResolvedSignature::Keys(vec![SignatureKey::class(
                meta.class_name.clone(),
            )])),
        }
    }
}
