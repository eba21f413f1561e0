//! Bundled signature corpora shipped with the crate.
//!
//! The texts are embedded at compile time and looked up by canonical name.
//! One reserved name carries no text at all: it only switches on the
//! non-portable-runtime heuristics.

/// Reserved bundled name that enables the non-portable runtime heuristics
/// instead of loading a signatures file.
pub const BS_JDK_NONPORTABLE: &str = "jdk-non-portable";

static BUNDLED_SIGNATURES: &[(&str, &str)] = &[
    ("jdk-deprecated-1.8", include_str!("bundled/jdk-deprecated-1.8.txt")),
    ("jdk-system-out", include_str!("bundled/jdk-system-out.txt")),
    ("jdk-unsafe-1.7", include_str!("bundled/jdk-unsafe-1.7.txt")),
    ("jdk-unsafe-1.8", include_str!("bundled/jdk-unsafe-1.8.txt")),
];

/// Text of a bundled corpus, by canonical name.
pub(crate) fn lookup(name: &str) -> Option<&'static str> {
    BUNDLED_SIGNATURES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, text)| *text)
}

/// Bundled names are restricted to a safe character set so they can never
/// escape the internal resource namespace.
pub(crate) fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
}

/// All recognized bundled names, the reserved flag-only name included.
/// Front ends use this for help output and error hints.
pub fn bundled_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = BUNDLED_SIGNATURES.iter().map(|(n, _)| *n).collect();
    names.push(BS_JDK_NONPORTABLE);
    names.sort_unstable();
    names
}
