//! Tests for the shared field presets.

use rstest::rstest;

use super::*;
use crate::domain::error::ErrorCode;
use crate::domain::validation::validate_field;

#[rstest]
fn email_preset_matches_the_documented_shape() {
    let rules = common_rules();
    assert!(rules.email.required);
    assert!(rules.email.email);
    assert_eq!(rules.email.max_length, Some(255));
}

#[rstest]
fn password_preset_matches_the_documented_shape() {
    let rules = common_rules();
    assert!(rules.password.required);
    assert_eq!(rules.password.min_length, Some(8));
    assert!(rules.password.custom.is_some());
}

#[rstest]
#[case("Secret12", None)]
#[case("correct Horse 1", None)]
#[case("alllowercase1", Some("password format is invalid"))]
#[case("ALLUPPERCASE1", Some("password format is invalid"))]
#[case("NoDigitsHere", Some("password format is invalid"))]
fn password_preset_requires_mixed_case_and_a_digit(
    #[case] input: &str,
    #[case] expected: Option<&str>,
) {
    let rules = common_rules();
    let result = validate_field(&FieldValue::from(input), &rules.password, "password");
    match expected {
        None => assert!(result.is_none()),
        Some(message) => {
            let err = result.expect("complexity violation must fail");
            assert_eq!(err.message(), message);
            assert_eq!(err.code(), ErrorCode::VALIDATION_INVALID_FORMAT);
        }
    }
}

#[rstest]
fn short_passwords_fail_on_length_before_complexity() {
    let rules = common_rules();
    let err = validate_field(&FieldValue::from("Ab1"), &rules.password, "password")
        .expect("short password must fail");
    assert_eq!(err.code(), ErrorCode::VALIDATION_OUT_OF_RANGE);
    assert_eq!(err.message(), "password must be at least 8 characters");
}

#[rstest]
#[case("+44 1234 567890", true)]
#[case("(020) 7946-0958", true)]
#[case("12345", false)]
#[case("phone-number-xx", false)]
fn phone_preset_accepts_loose_international_shapes(#[case] input: &str, #[case] valid: bool) {
    let rules = common_rules();
    let result = validate_field(&FieldValue::from(input), &rules.phone, "phone");
    assert_eq!(result.is_none(), valid);
}

#[rstest]
#[case(0.01, true)]
#[case(999_999.99, true)]
#[case(0.0, false)]
#[case(1_000_000.0, false)]
fn amount_preset_bounds_are_inclusive(#[case] input: f64, #[case] valid: bool) {
    let rules = common_rules();
    let result = validate_field(&FieldValue::from(input), &rules.amount, "amount");
    assert_eq!(result.is_none(), valid);
}

#[rstest]
#[case("Ada Lovelace", true)]
#[case("A", false)]
#[case("R2-D2", false)]
fn name_preset_allows_letters_and_spaces_only(#[case] input: &str, #[case] valid: bool) {
    let rules = common_rules();
    let result = validate_field(&FieldValue::from(input), &rules.name, "name");
    assert_eq!(result.is_none(), valid);
}

#[rstest]
#[case(1.0, true)]
#[case(20.0, true)]
#[case(0.0, false)]
#[case(21.0, false)]
fn pump_number_preset_covers_the_forecourt(#[case] input: f64, #[case] valid: bool) {
    let rules = common_rules();
    let result = validate_field(&FieldValue::from(input), &rules.pump_number, "pumpNumber");
    assert_eq!(result.is_none(), valid);
}

#[rstest]
fn presets_are_copy_on_read() {
    let mut mine = common_rules();
    mine.email.max_length = Some(64);
    mine.phone.required = false;

    let fresh = common_rules();
    assert_eq!(fresh.email.max_length, Some(255));
    assert!(fresh.phone.required);
}
