//! Tests for rule evaluation order, short-circuits, and form aggregation.

use regex::Regex;
use rstest::rstest;
use serde_json::json;

use super::*;

fn pattern(raw: &str) -> Regex {
    Regex::new(raw).expect("test pattern compiles")
}

#[rstest]
#[case(FieldValue::Missing)]
#[case(FieldValue::from(""))]
#[case(FieldValue::from("   "))]
fn required_rejects_absent_and_blank_values(#[case] value: FieldValue) {
    let rule = ValidationRule::new().required();
    let err = validate_field(&value, &rule, "email").expect("absent value must fail");
    assert_eq!(err.field(), "email");
    assert_eq!(err.code(), ErrorCode::VALIDATION_REQUIRED_FIELD);
    assert_eq!(err.message(), "email is required");
}

#[rstest]
fn optional_empty_values_skip_every_other_rule() {
    let rule = ValidationRule::new()
        .min_length(10)
        .email()
        .pattern(pattern("^never-matches$"));
    for value in [FieldValue::Missing, FieldValue::from("")] {
        assert!(validate_field(&value, &rule, "nickname").is_none());
    }
}

#[rstest]
fn numbers_are_never_empty() {
    let rule = ValidationRule::new().required();
    assert!(validate_field(&FieldValue::from(0.0), &rule, "amount").is_none());
}

#[rstest]
#[case("test@example.com", None)]
#[case("a@b.c", None)]
#[case("invalid-email", Some(ErrorCode::VALIDATION_INVALID_FORMAT))]
#[case("no@dot", Some(ErrorCode::VALIDATION_INVALID_FORMAT))]
#[case("two@@ats.com", Some(ErrorCode::VALIDATION_INVALID_FORMAT))]
fn email_rule_is_permissive_but_shaped(#[case] input: &str, #[case] expected: Option<ErrorCode>) {
    let rule = ValidationRule::new().required().email();
    let result = validate_field(&FieldValue::from(input), &rule, "email");
    match expected {
        None => assert!(result.is_none()),
        Some(code) => {
            let err = result.expect("shape violation must fail");
            assert_eq!(err.code(), code);
            assert_eq!(err.message(), "email must be a valid email address");
        }
    }
}

#[rstest]
fn min_length_failure_reports_out_of_range() {
    let rule = ValidationRule::new().min_length(5);
    let err =
        validate_field(&FieldValue::from("abc"), &rule, "password").expect("too short must fail");
    assert_eq!(err.field(), "password");
    assert_eq!(err.code(), ErrorCode::VALIDATION_OUT_OF_RANGE);
    assert_eq!(err.message(), "password must be at least 5 characters");
}

#[rstest]
fn max_length_failure_reports_out_of_range() {
    let rule = ValidationRule::new().max_length(3);
    let err =
        validate_field(&FieldValue::from("abcd"), &rule, "code").expect("too long must fail");
    assert_eq!(err.message(), "code must not exceed 3 characters");
    assert_eq!(err.code(), ErrorCode::VALIDATION_OUT_OF_RANGE);
}

#[rstest]
fn lengths_count_characters_not_bytes() {
    let rule = ValidationRule::new().max_length(4);
    assert!(validate_field(&FieldValue::from("héllo"), &rule, "word").is_some());
    let rule = ValidationRule::new().max_length(5);
    assert!(validate_field(&FieldValue::from("héllo"), &rule, "word").is_none());
}

#[rstest]
fn pattern_failure_reports_invalid_format() {
    let rule = ValidationRule::new().pattern(pattern(r"^\d+$"));
    let err = validate_field(&FieldValue::from("12a"), &rule, "reference")
        .expect("pattern mismatch must fail");
    assert_eq!(err.message(), "reference format is invalid");
    assert_eq!(err.code(), ErrorCode::VALIDATION_INVALID_FORMAT);
}

#[rstest]
#[case(5.0, Some("amount must be at least 10"))]
#[case(10.0, None)]
#[case(25.0, None)]
fn numeric_min_bound_is_inclusive(#[case] input: f64, #[case] expected: Option<&str>) {
    let rule = ValidationRule::new().min(10.0);
    let result = validate_field(&FieldValue::from(input), &rule, "amount");
    assert_eq!(result.map(|e| e.message().to_owned()), expected.map(str::to_owned));
}

#[rstest]
fn numeric_max_bound_is_inclusive() {
    let rule = ValidationRule::new().max(20.0);
    let err =
        validate_field(&FieldValue::from(21.0), &rule, "pumpNumber").expect("over max must fail");
    assert_eq!(err.message(), "pumpNumber must not exceed 20");
    assert_eq!(err.code(), ErrorCode::VALIDATION_OUT_OF_RANGE);
}

#[rstest]
fn numeric_bounds_ignore_text_values() {
    let rule = ValidationRule::new().min(10.0).max(20.0);
    assert!(validate_field(&FieldValue::from("not a number"), &rule, "amount").is_none());
}

#[rstest]
fn custom_predicate_message_is_used_verbatim() {
    let rule = ValidationRule::new().custom(|value| match value {
        FieldValue::Text(text) if text.contains(' ') => {
            Some("username must not contain spaces".to_owned())
        }
        _ => None,
    });
    let err = validate_field(&FieldValue::from("ada lovelace"), &rule, "username")
        .expect("custom rejection must fail");
    assert_eq!(err.message(), "username must not contain spaces");
    assert_eq!(err.code(), ErrorCode::VALIDATION_INVALID_FORMAT);
}

#[rstest]
fn first_failing_rule_wins_in_priority_order() {
    // Violates the email shape, the minimum length, and the pattern at
    // once; the email failure is the one reported.
    let rule = ValidationRule::new()
        .email()
        .min_length(10)
        .pattern(pattern("^x"))
        .custom(|_| Some("custom should not run".to_owned()));
    let err = validate_field(&FieldValue::from("no-at"), &rule, "email").expect("must fail");
    assert_eq!(err.message(), "email must be a valid email address");

    // With the email rule satisfied the next violated rule reports.
    let rule = ValidationRule::new().email().min_length(32);
    let err = validate_field(&FieldValue::from("a@b.co"), &rule, "email").expect("must fail");
    assert_eq!(err.code(), ErrorCode::VALIDATION_OUT_OF_RANGE);
}

#[rstest]
fn validate_form_accepts_correct_data() {
    let data = FormData::new()
        .set("email", "test@example.com")
        .set("password", "password123");
    let rules = RuleSet::new()
        .field("email", ValidationRule::new().required().email())
        .field("password", ValidationRule::new().required().min_length(6));

    let result = validate_form(&data, &rules);
    assert!(result.is_valid());
    assert!(result.errors().is_empty());
}

#[rstest]
fn validate_form_reports_errors_in_declaration_order() {
    let data = FormData::new()
        .set("email", "invalid-email")
        .set("password", "123");
    let rules = RuleSet::new()
        .field("email", ValidationRule::new().required().email())
        .field("password", ValidationRule::new().required().min_length(6));

    let result = validate_form(&data, &rules);
    assert!(!result.is_valid());
    assert_eq!(result.errors().len(), 2);
    assert_eq!(result.errors()[0].field(), "email");
    assert_eq!(result.errors()[1].field(), "password");
    assert_eq!(
        result.first_error().map(ValidationError::field),
        Some("email")
    );
}

#[rstest]
fn data_fields_without_rules_are_ignored() {
    let data = FormData::new()
        .set("email", "test@example.com")
        .set("unvalidated", "anything at all");
    let rules = RuleSet::new().field("email", ValidationRule::new().required().email());

    let result = validate_form(&data, &rules);
    assert!(result.is_valid());
}

#[rstest]
fn missing_data_for_a_required_rule_is_reported() {
    let data = FormData::new();
    let rules = RuleSet::new().field("email", ValidationRule::new().required());

    let result = validate_form(&data, &rules);
    assert_eq!(result.errors().len(), 1);
    assert_eq!(result.errors()[0].code(), ErrorCode::VALIDATION_REQUIRED_FIELD);
}

#[rstest]
fn validation_errors_serialise_for_the_ui() {
    let err = ValidationError::new(
        "email",
        "email is required",
        ErrorCode::VALIDATION_REQUIRED_FIELD,
    );
    let value = serde_json::to_value(&err).expect("serialise validation error");
    assert_eq!(
        value,
        json!({
            "field": "email",
            "message": "email is required",
            "code": 1104,
        })
    );
}
