//! End-to-end test of bundled ruleset loading via the public API.

use std::sync::Arc;

use proscribe::{bundled_names, ClassMetadata, ClasspathIndex, MethodSig, SignatureEngine};

fn jdk_classpath() -> Arc<ClasspathIndex> {
    let mut index = ClasspathIndex::new();
    index.add(
        ClassMetadata::new("java/lang/String")
            .with_method("toLowerCase", "()Ljava/lang/String;")
            .with_method("toUpperCase", "()Ljava/lang/String;")
            .with_method("getBytes", "()[B")
            .with_method("format", "(Ljava/lang/String;[Ljava/lang/Object;)Ljava/lang/String;"),
    );
    index.add(ClassMetadata::new("java/io/InputStreamReader").with_method("<init>", "(Ljava/io/InputStream;)V"));
    index.add(ClassMetadata::new("java/io/OutputStreamWriter").with_method("<init>", "(Ljava/io/OutputStream;)V"));
    index.add(ClassMetadata::new("java/util/Formatter").with_method("<init>", "()V"));
    Arc::new(index)
}

#[test]
fn test_bundled_unsafe_rules_flag_locale_dependent_calls() {
    let mut engine = SignatureEngine::new(jdk_classpath());
    engine.add_bundled_signatures("jdk-unsafe", Some("8")).unwrap();

    let violation = engine
        .check_method("java/lang/String", &MethodSig::new("getBytes", "()[B"))
        .expect("locale-dependent call");
    assert!(violation.message.contains("Forbidden method invocation"));
    assert!(engine
        .check_method(
            "java/io/InputStreamReader",
            &MethodSig::new("<init>", "(Ljava/io/InputStream;)V"),
        )
        .is_some());
}

#[test]
fn test_reserved_and_regular_names_listed() {
    let names = bundled_names();
    assert!(names.contains(&"jdk-non-portable"));
    assert!(names.contains(&"jdk-unsafe-1.8"));
}
