use blueprint_core::{
    parse, verify, verify_values, verify_with_options, Constraint, Kind, ParseError, ParseOptions,
    ValidationError, ValidationErrorKind, VerifyError,
};

/// Helper: run `verify` and return the validation error, panicking if the
/// documents failed to parse or validation passed.
fn validation_error(schema: &str, data: &str) -> ValidationError {
    match verify(schema, data) {
        Err(VerifyError::Validation(e)) => e,
        other => panic!("expected validation error, got {other:?}"),
    }
}

fn assert_valid(schema: &str, data: &str) {
    if let Err(e) = verify(schema, data) {
        panic!("expected valid:\n  schema: {schema}\n  data:   {data}\n  error:  {e}");
    }
}

const NUMBER_MIN_5: &str = r#"{"constraints":[{"MIN_VALUE":5}]}"#;

// ============================================================================
// Parse failures are reported per side
// ============================================================================

#[test]
fn invalid_schema_text() {
    let err = verify("{", "1").unwrap_err();
    assert!(matches!(
        err,
        VerifyError::InvalidSchema(ParseError::UnexpectedEof { .. })
    ));
    assert!(err.to_string().starts_with("invalid schema:"));
}

#[test]
fn invalid_data_text() {
    let err = verify(NUMBER_MIN_5, "[1,").unwrap_err();
    assert!(matches!(err, VerifyError::InvalidData(_)));
    assert!(err.to_string().starts_with("invalid data:"));
}

#[test]
fn schema_root_must_be_object() {
    let err = validation_error("[]", "1");
    assert_eq!(err.kind, ValidationErrorKind::SchemaNotObject { found: Kind::Array });
    assert_eq!(err.path, "$");
}

// ============================================================================
// MIN_VALUE / MAX_VALUE
// ============================================================================

#[test]
fn min_value_fails_below_limit() {
    let err = validation_error(NUMBER_MIN_5, "3");
    assert_eq!(
        err.kind,
        ValidationErrorKind::BelowMinimum {
            value: "3".to_string(),
            limit: "5".to_string()
        }
    );
    assert!(err.to_string().contains("3 < 5"), "{err}");
}

#[test]
fn min_value_passes_at_and_above_limit() {
    assert_valid(NUMBER_MIN_5, "7");
    assert_valid(NUMBER_MIN_5, "5");
    assert_valid(NUMBER_MIN_5, "5.5");
}

#[test]
fn max_value() {
    let schema = r#"{"constraints":[{"MAX_VALUE":10}]}"#;
    assert_valid(schema, "10");
    assert_valid(schema, "-3");
    let err = validation_error(schema, "10.5");
    assert!(err.to_string().contains("10.5 > 10"), "{err}");
}

#[test]
fn min_and_max_value_range() {
    let schema = r#"{"constraints":[{"MIN_VALUE":1},{"MAX_VALUE":5}]}"#;
    assert_valid(schema, "1");
    assert_valid(schema, "5");
    assert!(verify(schema, "0").is_err());
    assert!(verify(schema, "6").is_err());
}

#[test]
fn min_value_on_string_is_type_mismatch() {
    let err = validation_error(NUMBER_MIN_5, "\"7\"");
    assert_eq!(
        err.kind,
        ValidationErrorKind::TypeMismatch {
            constraint: Constraint::MinValue,
            found: Kind::String
        }
    );
}

#[test]
fn min_value_with_non_numeric_parameter() {
    let err = validation_error(r#"{"constraints":[{"MIN_VALUE":"5"}]}"#, "7");
    assert!(matches!(
        err.kind,
        ValidationErrorKind::InvalidParameter {
            constraint: Constraint::MinValue,
            ..
        }
    ));
}

// ============================================================================
// MIN_LENGTH / MAX_LENGTH
// ============================================================================

#[test]
fn string_length_counts_characters_between_quotes() {
    let schema = r#"{"constraints":[{"MIN_LENGTH":2},{"MAX_LENGTH":3}]}"#;
    assert_valid(schema, "\"ab\"");
    assert_valid(schema, "\"abc\"");
    assert_valid(schema, "\"\u{e9}t\u{e9}\"");
    assert_eq!(
        validation_error(schema, "\"a\"").kind,
        ValidationErrorKind::TooShort {
            length: 1,
            limit: 2
        }
    );
    assert_eq!(
        validation_error(schema, "\"abcd\"").kind,
        ValidationErrorKind::TooLong {
            length: 4,
            limit: 3
        }
    );
}

#[test]
fn length_on_number_is_type_mismatch() {
    let err = validation_error(r#"{"constraints":[{"MIN_LENGTH":1}]}"#, "12");
    assert_eq!(
        err.kind,
        ValidationErrorKind::TypeMismatch {
            constraint: Constraint::MinLength,
            found: Kind::Number
        }
    );
}

#[test]
fn length_parameter_must_be_non_negative_integer() {
    for param in ["-1", "1.5", "\"2\"", "null"] {
        let schema = format!(r#"{{"constraints":[{{"MAX_LENGTH":{param}}}]}}"#);
        let err = validation_error(&schema, "\"x\"");
        assert!(
            matches!(err.kind, ValidationErrorKind::InvalidParameter { .. }),
            "{param}: {err}"
        );
    }
}

#[test]
fn multi_key_constraint_object_applies_each_key() {
    let schema = r#"{"constraints":[{"MIN_LENGTH":3,"MAX_LENGTH":3}]}"#;
    assert_valid(schema, "\"abc\"");
    assert!(verify(schema, "\"ab\"").is_err());
    assert!(verify(schema, "\"abcd\"").is_err());
}

// ============================================================================
// Arrays
// ============================================================================

const ARRAY_SCHEMA: &str =
    r#"{"constraints":[{"MIN_LENGTH":2}],"data":{"constraints":[{"MIN_VALUE":0}]}}"#;

#[test]
fn array_schema_passes() {
    assert_valid(ARRAY_SCHEMA, "[1,2,3]");
}

#[test]
fn array_length_checked_before_elements() {
    // [-1] violates both MIN_LENGTH and the element MIN_VALUE; the container
    // check runs first.
    let err = validation_error(ARRAY_SCHEMA, "[-1]");
    assert_eq!(
        err.kind,
        ValidationErrorKind::TooShort {
            length: 1,
            limit: 2
        }
    );
    assert_eq!(err.path, "$");
}

#[test]
fn array_element_failure_reports_index() {
    let err = validation_error(ARRAY_SCHEMA, "[1, 2, -4, -5]");
    assert_eq!(err.path, "$[2]");
    assert!(err.to_string().contains("-4 < 0"), "{err}");
}

#[test]
fn array_schema_requires_data_field() {
    let err = validation_error(r#"{"constraints":[]}"#, "[1]");
    assert_eq!(
        err.kind,
        ValidationErrorKind::MissingField { field: "data" }
    );
}

#[test]
fn array_schema_data_must_be_object() {
    let err = validation_error(r#"{"constraints":[],"data":[]}"#, "[1]");
    assert_eq!(
        err.kind,
        ValidationErrorKind::WrongFieldType {
            field: "data",
            expected: Kind::Object,
            found: Kind::Array
        }
    );
}

#[test]
fn empty_array_against_min_length() {
    let schema = r#"{"constraints":[{"MIN_LENGTH":1}],"data":{"constraints":[]}}"#;
    assert!(verify(schema, "[]").is_err());
}

#[test]
fn nested_arrays() {
    let schema = r#"{"constraints":[],"data":{"constraints":[{"MAX_LENGTH":2}],"data":{"constraints":[]}}}"#;
    assert_valid(schema, "[[1,2],[3]]");
    let err = validation_error(schema, "[[1],[1,2,3]]");
    assert_eq!(err.path, "$[1]");
}

// ============================================================================
// ENUM / VALUES
// ============================================================================

#[test]
fn enum_on_strings() {
    let schema = r#"{"constraints":[{"ENUM":["red","green"]}]}"#;
    assert_valid(schema, "\"red\"");
    let err = validation_error(schema, "\"blue\"");
    assert_eq!(
        err.kind,
        ValidationErrorKind::NotInEnum {
            value: "\"blue\"".to_string(),
            allowed: r#"["red","green"]"#.to_string()
        }
    );
}

#[test]
fn enum_compares_renderings() {
    let schema = r#"{"constraints":[{"ENUM":[1, "1", null]}]}"#;
    assert_valid(schema, "1");
    assert_valid(schema, "\"1\"");
    assert_valid(schema, "null");
    // 1.0 renders differently from 1.
    assert!(verify(schema, "1.0").is_err());
}

#[test]
fn enum_parameter_must_be_array() {
    let err = validation_error(r#"{"constraints":[{"ENUM":"red"}]}"#, "\"red\"");
    assert!(matches!(
        err.kind,
        ValidationErrorKind::InvalidParameter {
            constraint: Constraint::Enum,
            ..
        }
    ));
}

#[test]
fn values_on_number_uses_numeric_equality() {
    let schema = r#"{"constraints":[{"VALUES":[1,2,3]}]}"#;
    assert_valid(schema, "2");
    assert_valid(schema, "2.0");
    let err = validation_error(schema, "4");
    assert!(matches!(err.kind, ValidationErrorKind::NotInValues { .. }));
}

#[test]
fn values_on_array_is_subset_check() {
    let schema = r#"{"constraints":[{"VALUES":[1,2,3]}],"data":{"constraints":[]}}"#;
    assert_valid(schema, "[1,2,3]");
    assert_valid(schema, "[3,3,1]");
    assert_valid(schema, "[]");
    let err = validation_error(schema, "[1,2,4]");
    assert_eq!(
        err.kind,
        ValidationErrorKind::NotInValues {
            value: "4".to_string(),
            allowed: "[1,2,3]".to_string()
        }
    );
}

#[test]
fn values_on_string_is_type_mismatch() {
    let err = validation_error(r#"{"constraints":[{"VALUES":["a"]}]}"#, "\"a\"");
    assert_eq!(
        err.kind,
        ValidationErrorKind::TypeMismatch {
            constraint: Constraint::Values,
            found: Kind::String
        }
    );
}

// ============================================================================
// Objects
// ============================================================================

const PERSON_SCHEMA: &str = r#"{
    "constraints": [],
    "data": {
        "name": {"constraints": [{"MIN_LENGTH": 1}, {"MAX_LENGTH": 5}]},
        "age": {"constraints": [{"MIN_VALUE": 1}, {"MAX_VALUE": 120}]}
    }
}"#;

#[test]
fn object_schema_passes() {
    assert_valid(PERSON_SCHEMA, r#"{"name": "Ada", "age": 36}"#);
}

#[test]
fn empty_object_against_empty_schema() {
    assert_valid(r#"{"constraints":[],"data":{}}"#, "{}");
}

#[test]
fn object_property_failure_reports_key() {
    let err = validation_error(PERSON_SCHEMA, r#"{"name": "Ada", "age": 0}"#);
    assert_eq!(err.path, "$.age");
    assert!(err.to_string().contains("0 < 1"), "{err}");
}

#[test]
fn undeclared_property_fails() {
    let err = validation_error(PERSON_SCHEMA, r#"{"name": "Ada", "email": "a@b"}"#);
    assert_eq!(
        err.kind,
        ValidationErrorKind::UnknownProperty {
            key: "email".to_string()
        }
    );
    assert_eq!(err.path, "$.email");
}

#[test]
fn absent_optional_property_is_skipped() {
    assert_valid(PERSON_SCHEMA, r#"{"name": "Ada"}"#);
    assert_valid(PERSON_SCHEMA, "{}");
}

#[test]
fn object_schema_requires_data_mapping() {
    let err = validation_error(r#"{"constraints":[]}"#, r#"{"a":1}"#);
    assert_eq!(
        err.kind,
        ValidationErrorKind::MissingField { field: "data" }
    );
}

#[test]
fn object_level_enum_compares_rendering() {
    let schema = r#"{"constraints":[{"ENUM":[{"a":1}]}],"data":{"a":{"constraints":[]}}}"#;
    assert_valid(schema, r#"{"a":1}"#);
    assert!(verify(schema, r#"{"a":2}"#).is_err());
}

#[test]
fn deeply_nested_path() {
    let schema = r#"{
        "constraints": [],
        "data": {
            "users": {
                "constraints": [],
                "data": {
                    "constraints": [],
                    "data": {"age": {"constraints": [{"MIN_VALUE": 18}]}}
                }
            }
        }
    }"#;
    let err = validation_error(schema, r#"{"users": [{"age": 20}, {"age": 12}]}"#);
    assert_eq!(err.path, "$.users[1].age");
}

// ============================================================================
// REQUIRED
// ============================================================================

const REQUIRED_SCHEMA: &str = r#"{
    "constraints": [],
    "data": {
        "id": {"constraints": [{"REQUIRED": true}, {"MIN_VALUE": 1}]},
        "nickname": {"constraints": [{"REQUIRED": false}]}
    }
}"#;

#[test]
fn required_property_present() {
    assert_valid(REQUIRED_SCHEMA, r#"{"id": 3}"#);
    assert_valid(REQUIRED_SCHEMA, r#"{"id": 3, "nickname": "x"}"#);
}

#[test]
fn required_property_missing() {
    let err = validation_error(REQUIRED_SCHEMA, r#"{"nickname": "x"}"#);
    assert_eq!(
        err.kind,
        ValidationErrorKind::MissingRequired {
            key: "id".to_string()
        }
    );
    assert_eq!(err.path, "$");
}

#[test]
fn required_checked_before_present_properties() {
    let schema = r#"{
        "constraints": [],
        "data": {
            "a": {"constraints": [{"MIN_VALUE": 100}]},
            "b": {"constraints": [{"REQUIRED": true}]}
        }
    }"#;
    // "a" would fail, but the missing "b" is reported first.
    let err = validation_error(schema, r#"{"a": 1}"#);
    assert!(matches!(
        err.kind,
        ValidationErrorKind::MissingRequired { .. }
    ));
}

#[test]
fn required_parameter_must_be_boolean() {
    let schema = r#"{"constraints":[],"data":{"id":{"constraints":[{"REQUIRED":"yes"}]}}}"#;
    let err = validation_error(schema, "{}");
    assert!(matches!(
        err.kind,
        ValidationErrorKind::InvalidParameter {
            constraint: Constraint::Required,
            ..
        }
    ));
}

#[test]
fn required_on_root_value_passes() {
    assert_valid(r#"{"constraints":[{"REQUIRED":true}]}"#, "1");
}

// ============================================================================
// Schema-shape errors
// ============================================================================

#[test]
fn unknown_constraint_always_fails() {
    let schema = r#"{"constraints":[{"MAX_WIDTH":3}]}"#;
    for data in ["1", "\"s\"", "null", "true"] {
        let err = validation_error(schema, data);
        assert_eq!(
            err.kind,
            ValidationErrorKind::UnknownConstraint {
                name: "MAX_WIDTH".to_string()
            }
        );
        assert!(err.to_string().contains("MAX_WIDTH"));
    }
}

#[test]
fn missing_constraints_field() {
    let err = validation_error("{}", "1");
    assert_eq!(
        err.kind,
        ValidationErrorKind::MissingField {
            field: "constraints"
        }
    );
}

#[test]
fn constraints_field_must_be_array() {
    let err = validation_error(r#"{"constraints":{}}"#, "1");
    assert_eq!(
        err.kind,
        ValidationErrorKind::WrongFieldType {
            field: "constraints",
            expected: Kind::Array,
            found: Kind::Object
        }
    );
}

#[test]
fn constraint_entry_must_be_object() {
    let err = validation_error(r#"{"constraints":[{"MIN_VALUE":1}, "MAX_VALUE"]}"#, "2");
    assert_eq!(
        err.kind,
        ValidationErrorKind::ConstraintNotObject {
            index: 1,
            found: Kind::String
        }
    );
}

#[test]
fn property_schema_must_be_object() {
    let err = validation_error(r#"{"constraints":[],"data":{"a":5}}"#, r#"{"a":1}"#);
    assert_eq!(
        err.kind,
        ValidationErrorKind::SchemaNotObject { found: Kind::Number }
    );
    assert_eq!(err.path, "$.a");
}

#[test]
fn first_failing_constraint_wins() {
    let schema = r#"{"constraints":[{"MAX_VALUE":1},{"MIN_VALUE":10}]}"#;
    let err = validation_error(schema, "5");
    assert!(matches!(err.kind, ValidationErrorKind::AboveMaximum { .. }));
}

// ============================================================================
// Idempotence and pre-parsed trees
// ============================================================================

#[test]
fn verify_is_idempotent() {
    let first = verify(PERSON_SCHEMA, r#"{"age": 200}"#);
    let second = verify(PERSON_SCHEMA, r#"{"age": 200}"#);
    assert_eq!(first, second);
    assert_eq!(
        first.unwrap_err().to_string(),
        second.unwrap_err().to_string()
    );
}

#[test]
fn verify_values_reuses_parsed_schema() {
    let schema = parse(ARRAY_SCHEMA).unwrap();
    let good = parse("[0, 1]").unwrap();
    let bad = parse("[0, -1]").unwrap();
    assert!(verify_values(&schema, &good).is_ok());
    assert_eq!(verify_values(&schema, &bad).unwrap_err().path, "$[1]");
}

#[test]
fn verify_with_depth_limit() {
    let options = ParseOptions::new().with_max_depth(1);
    let err = verify_with_options(ARRAY_SCHEMA, "[1]", &options).unwrap_err();
    // The schema itself nests two levels and is rejected first.
    assert!(matches!(
        err,
        VerifyError::InvalidSchema(ParseError::NestingTooDeep { limit: 1, .. })
    ));
}
