//! Property tests for frame validation: resolved frames re-validate to
//! themselves, and record shape errors are always rejected.

use essential_core::{Frame, FrameType};
use essential_schema::{FrameValidationError, FrameValidator};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn frametype_literal() -> impl Strategy<Value = Option<&'static str>> {
    prop_oneof![
        Just(None),
        Just(Some("frame")),
        Just(Some("class")),
        Just(Some("slot")),
        Just(Some("facet")),
        Just(Some("simple_instance")),
    ]
}

fn names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-Za-z:_-]{1,12}", 0..4)
}

fn value_components() -> impl Strategy<Value = Value> {
    prop::collection::vec(("[a-z]{1,8}", "[ -~]{0,16}"), 1..3).prop_map(|pairs| {
        Value::Array(
            pairs
                .into_iter()
                .map(|(t, c)| json!({"value_type": t, "value_content": c}))
                .collect(),
        )
    })
}

/// Records that satisfy one of the five shapes.
fn valid_record() -> impl Strategy<Value = Value> {
    (
        frametype_literal(),
        "[A-Za-z]{1,12}",
        "[A-Za-z:-]{1,16}",
        names(),
        prop::option::of(names()),
        prop::option::of(names()),
        prop::option::of(("[a-z]{1,8}", value_components())),
        prop::option::of(("[a-z]{1,8}", "[A-Z:-]{1,12}", value_components())),
    )
        .prop_map(
            |(frametype, name, ty, supertype, superclass, template_slot, own, facet)| {
                let mut record = Map::new();
                if let Some(ft) = frametype {
                    record.insert("frametype".into(), json!(ft));
                }
                record.insert("name".into(), json!(name));
                record.insert("type".into(), json!(ty));
                record.insert("supertype".into(), json!(supertype));
                if let Some(sc) = superclass {
                    record.insert("superclass".into(), json!(sc));
                }
                if let Some(ts) = template_slot {
                    record.insert("template_slot".into(), json!(ts));
                }
                if let Some((slot, value)) = own {
                    record.insert(
                        "own_slot_value".into(),
                        json!([{"slot_reference": slot, "value": value}]),
                    );
                }
                if let Some((slot, facet, value)) = facet {
                    record.insert(
                        "template_facet_value".into(),
                        json!([{"slot_reference": slot, "facet_reference": facet, "value": value}]),
                    );
                }
                Value::Object(record)
            },
        )
}

proptest! {
    /// Validating the record form of a validated frame yields the same frame.
    #[test]
    fn validation_is_idempotent(record in valid_record()) {
        let validator = FrameValidator::new().unwrap();
        let frame = validator.validate(&record).unwrap();
        let resolved = frame.to_record().unwrap();
        let again = validator.validate(&resolved).unwrap();
        prop_assert_eq!(frame, again);
    }

    /// Missing `frametype` always resolves to the base frame.
    #[test]
    fn absent_frametype_resolves_to_frame(record in valid_record()) {
        let validator = FrameValidator::new().unwrap();
        let frame = validator.validate(&record).unwrap();
        let expected = match record.get("frametype").and_then(Value::as_str) {
            None => FrameType::Frame,
            Some(s) => s.parse().unwrap(),
        };
        prop_assert_eq!(frame.frametype(), expected);
    }

    /// Exactly one type guard holds, except for base frames where none do.
    #[test]
    fn type_guards_are_exclusive(record in valid_record()) {
        let frame: Frame = FrameValidator::new().unwrap().validate(&record).unwrap();
        let held = [
            frame.is_class(),
            frame.is_slot(),
            frame.is_facet(),
            frame.is_simple_instance(),
        ]
        .iter()
        .filter(|b| **b)
        .count();
        let expected = usize::from(frame.frametype() != FrameType::Frame);
        prop_assert_eq!(held, expected);
    }

    /// Removing a required field is always a shape mismatch.
    #[test]
    fn missing_required_field_rejected(
        record in valid_record(),
        field in prop_oneof![Just("name"), Just("type"), Just("supertype")]
    ) {
        let mut record = record;
        record.as_object_mut().unwrap().remove(field);
        let err = FrameValidator::new().unwrap().validate(&record).unwrap_err();
        let is_shape_mismatch = matches!(err, FrameValidationError::ShapeMismatch { .. });
        prop_assert!(is_shape_mismatch);
    }

    /// Any undeclared top-level field is rejected.
    #[test]
    fn undeclared_field_rejected(record in valid_record(), key in "x_[a-z]{1,8}") {
        let mut record = record;
        record.as_object_mut().unwrap().insert(key, json!("oops"));
        prop_assert!(FrameValidator::new().unwrap().validate(&record).is_err());
    }

    /// A `frametype` outside the five literals never validates.
    #[test]
    fn unknown_frametype_rejected(record in valid_record(), ft in "[a-z_]{1,16}") {
        prop_assume!(ft.parse::<FrameType>().is_err());
        let mut record = record;
        record.as_object_mut().unwrap().insert("frametype".into(), json!(ft));
        let err = FrameValidator::new().unwrap().validate(&record).unwrap_err();
        let is_union_failure = matches!(err, FrameValidationError::NoMatchingShape { .. });
        prop_assert!(is_union_failure);
    }
}
