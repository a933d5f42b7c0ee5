//! Integration test: validate the fixture collection under
//! `tests/fixtures/essential/`, laid out as `<lang>/<name>.{yaml,json}`,
//! and check that every document under `tests/fixtures/invalid/` is
//! rejected.

use std::path::{Path, PathBuf};

use essential_core::{
    create_is_lang_entry, is_class_entry, is_english_entry, is_facet_entry,
    is_simple_instance_entry, is_slot_entry, EssentialEntry, FrameType,
};
use essential_schema::{FrameValidationError, FrameValidator};

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Recursively find frame documents, sorted.
fn find_documents(dir: &Path) -> Vec<PathBuf> {
    let mut documents = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                documents.extend(find_documents(&path));
            } else if matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("yaml" | "yml" | "json")
            ) {
                documents.push(path);
            }
        }
    }
    documents.sort();
    documents
}

fn slug_for(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap().with_extension("");
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn load_collection(validator: &FrameValidator) -> Vec<EssentialEntry> {
    let root = fixtures().join("essential");
    find_documents(&root)
        .iter()
        .map(|path| {
            let frame = validator
                .validate_file(path)
                .unwrap_or_else(|e| panic!("{}: {e}", path.display()));
            EssentialEntry::new(slug_for(&root, path), frame)
        })
        .collect()
}

#[test]
fn test_fixture_collection_validates() {
    let validator = FrameValidator::new().unwrap();
    let entries = load_collection(&validator);
    assert_eq!(entries.len(), 7);
}

#[test]
fn test_fixture_frametypes_resolved() {
    let validator = FrameValidator::new().unwrap();
    let entries = load_collection(&validator);
    let find = |slug: &str| {
        entries
            .iter()
            .find(|e| e.slug() == slug)
            .unwrap_or_else(|| panic!("missing entry {slug}"))
    };

    assert!(is_class_entry(find("en/Person")));
    assert!(is_slot_entry(find("en/hasName")));
    assert!(is_slot_entry(find("en/hasAge")));
    assert!(is_facet_entry(find("en/maxCardinality")));
    assert!(is_simple_instance_entry(find("en/alice")));
    assert_eq!(find("en/Thing").frametype(), FrameType::Frame);
    assert!(is_class_entry(find("de/Person")));
}

#[test]
fn test_partition_by_locale() {
    let validator = FrameValidator::new().unwrap();
    let entries = load_collection(&validator);

    let english = entries.iter().filter(|e| is_english_entry(e.slug())).count();
    let is_german = create_is_lang_entry("de");
    let german = entries.iter().filter(|e| is_german(e.slug())).count();

    assert_eq!(english, 6);
    assert_eq!(german, 1);
}

#[test]
fn test_class_template_fields_preserved() {
    let validator = FrameValidator::new().unwrap();
    let frame = validator
        .validate_file(&fixtures().join("essential/en/Person.yaml"))
        .unwrap();
    let class = frame.as_class().expect("Person is a class");
    assert_eq!(
        class.template_slot.as_deref(),
        Some(&["hasName".to_string(), "hasAge".to_string()][..])
    );
    let facets = class.template_facet_value.as_ref().unwrap();
    assert_eq!(facets[0].facet_reference, ":MAXIMUM-CARDINALITY");
    assert_eq!(facets[0].value[0].value_content, "1");
    let documentation = &class.own_slot_value.as_ref().unwrap()[0];
    assert_eq!(documentation.value.len(), 2);
}

#[test]
fn test_invalid_fixtures_rejected() {
    let validator = FrameValidator::new().unwrap();
    let documents = find_documents(&fixtures().join("invalid"));
    assert_eq!(documents.len(), 3);

    for path in &documents {
        let result = validator.validate_file(path);
        assert!(result.is_err(), "{} should be rejected", path.display());
    }
}

#[test]
fn test_invalid_fixture_error_kinds() {
    let validator = FrameValidator::new().unwrap();
    let invalid = fixtures().join("invalid");

    let err = validator
        .validate_file(&invalid.join("unknown_frametype.yaml"))
        .unwrap_err();
    assert!(matches!(err, FrameValidationError::NoMatchingShape { .. }), "{err}");

    let err = validator
        .validate_file(&invalid.join("missing_supertype.json"))
        .unwrap_err();
    match err {
        FrameValidationError::ShapeMismatch { shape, violations } => {
            assert_eq!(shape, FrameType::Class);
            assert!(violations
                .violations()
                .iter()
                .any(|v| v.message.contains("supertype")));
        }
        other => panic!("Expected ShapeMismatch, got: {other}"),
    }

    let err = validator
        .validate_file(&invalid.join("extra_field.yaml"))
        .unwrap_err();
    assert!(err.to_string().contains("extra"), "{err}");
}
