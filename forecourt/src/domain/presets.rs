//! Preset rule sets for the field types the product forms share.
//!
//! Every call hands back owned rules, so a caller can override any field of
//! the result without affecting other callers.

use std::sync::OnceLock;

use regex::Regex;

use super::validation::{FieldValue, ValidationRule};

static PHONE_RE: OnceLock<Regex> = OnceLock::new();
static NAME_RE: OnceLock<Regex> = OnceLock::new();

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        Regex::new(r"^\+?[\d\s()\-]{10,15}$")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

fn name_regex() -> &'static Regex {
    NAME_RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z\s]+$")
            .unwrap_or_else(|error| panic!("name regex failed to compile: {error}"))
    })
}

/// Rules for the common field types.
#[derive(Debug, Clone)]
pub struct CommonRules {
    /// Required, email-shaped, at most 255 characters.
    pub email: ValidationRule,
    /// Required, at least 8 characters, mixed-case plus a digit.
    pub password: ValidationRule,
    /// Required, loose international phone shape, 10–15 characters.
    pub phone: ValidationRule,
    /// Required monetary amount in [0.01, 999999.99].
    pub amount: ValidationRule,
    /// Required personal name, 2–100 characters, letters and spaces.
    pub name: ValidationRule,
    /// Required pump selector in [1, 20].
    pub pump_number: ValidationRule,
}

/// Fresh copy of the preset rules.
///
/// # Examples
/// ```
/// use forecourt::domain::common_rules;
///
/// // Overriding a copy never touches the shared presets.
/// let mut email = common_rules().email;
/// email.max_length = Some(64);
/// assert_eq!(email.max_length, Some(64));
/// assert_eq!(common_rules().email.max_length, Some(255));
/// ```
pub fn common_rules() -> CommonRules {
    CommonRules {
        email: ValidationRule::new().required().email().max_length(255),
        password: ValidationRule::new()
            .required()
            .min_length(8)
            .custom(password_complexity),
        phone: ValidationRule::new()
            .required()
            .pattern(phone_regex().clone()),
        amount: ValidationRule::new().required().min(0.01).max(999_999.99),
        name: ValidationRule::new()
            .required()
            .min_length(2)
            .max_length(100)
            .pattern(name_regex().clone()),
        pump_number: ValidationRule::new().required().min(1.0).max(20.0),
    }
}

// `regex` has no look-around, so the complexity requirement is a predicate
// rather than a pattern.
fn password_complexity(value: &FieldValue) -> Option<String> {
    let FieldValue::Text(text) = value else {
        return None;
    };
    let has_lower = text.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = text.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = text.chars().any(|c| c.is_ascii_digit());
    if has_lower && has_upper && has_digit {
        None
    } else {
        Some("password format is invalid".to_owned())
    }
}

#[cfg(test)]
mod tests;
