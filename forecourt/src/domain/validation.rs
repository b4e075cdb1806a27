//! Declarative form validation.
//!
//! A [`ValidationRule`] is pure configuration; evaluation is deterministic,
//! side-effect free, and never panics. Every invalid input path returns a
//! value rather than an error, so callers aggregate and render failures
//! without any unwinding.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::error::ErrorCode;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

// Deliberately permissive; accepts syntactically loose addresses and must
// not be tightened without a product decision.
fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// A single form field value.
///
/// Text-shaped rules (email, lengths, pattern) apply to [`FieldValue::Text`];
/// numeric bounds apply to [`FieldValue::Number`]; a custom predicate sees
/// any present value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Free-form text input.
    Text(String),
    /// Numeric input.
    Number(f64),
    /// The field was not supplied.
    Missing,
}

impl FieldValue {
    /// Whether the value counts as absent for required/short-circuit checks.
    ///
    /// Blank text is absent; a number is always present.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Missing => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Number(_) => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Predicate evaluated last in the rule chain.
///
/// Returns `None` for valid input or a message used verbatim in the
/// resulting error.
pub type CustomRule = Arc<dyn Fn(&FieldValue) -> Option<String> + Send + Sync>;

/// Declarative constraint set for one field.
///
/// Constraints are evaluated in a fixed priority order (see
/// [`validate_field`]); the struct itself carries no behaviour beyond
/// configuration. Fields are public so a preset can be copied and
/// overridden without touching shared state.
#[derive(Clone, Default)]
pub struct ValidationRule {
    /// Reject absent or blank values.
    pub required: bool,
    /// Apply the permissive email shape check.
    pub email: bool,
    /// Minimum text length in characters.
    pub min_length: Option<usize>,
    /// Maximum text length in characters.
    pub max_length: Option<usize>,
    /// Full-match pattern for text values.
    pub pattern: Option<Regex>,
    /// Lower numeric bound, inclusive.
    pub min: Option<f64>,
    /// Upper numeric bound, inclusive.
    pub max: Option<f64>,
    /// Caller-supplied predicate, evaluated last.
    pub custom: Option<CustomRule>,
}

impl ValidationRule {
    /// Empty rule set; everything passes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the field required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Enable the email shape check.
    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    /// Require at least `length` characters.
    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    /// Require at most `length` characters.
    pub fn max_length(mut self, length: usize) -> Self {
        self.max_length = Some(length);
        self
    }

    /// Require text to match `pattern`.
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Require numbers to be at least `bound`.
    pub fn min(mut self, bound: f64) -> Self {
        self.min = Some(bound);
        self
    }

    /// Require numbers to be at most `bound`.
    pub fn max(mut self, bound: f64) -> Self {
        self.max = Some(bound);
        self
    }

    /// Attach a custom predicate, evaluated after every built-in rule.
    pub fn custom(
        mut self,
        predicate: impl Fn(&FieldValue) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.custom = Some(Arc::new(predicate));
        self
    }
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("required", &self.required)
            .field("email", &self.email)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("min", &self.min)
            .field("max", &self.max)
            .field("custom", &self.custom.as_ref().map(|_| "<predicate>"))
            .finish()
    }
}

/// Immutable description of one failed constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    field: String,
    message: String,
    code: ErrorCode,
}

impl ValidationError {
    /// Build an error for `field` with a rendered message and taxonomy code.
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code,
        }
    }

    /// Field the failure belongs to.
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Message suitable for inline rendering.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Taxonomy code, always in the Validation band for built-in rules.
    pub fn code(&self) -> ErrorCode {
        self.code
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Outcome of validating a whole form.
///
/// Errors appear in rule declaration order, so the first entry is the one a
/// caller surfaces when only a single message is shown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// True when no rule failed.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Failures in rule declaration order.
    pub fn errors(&self) -> &[ValidationError] {
        self.errors.as_slice()
    }

    /// First failure in declaration order, if any.
    pub fn first_error(&self) -> Option<&ValidationError> {
        self.errors.first()
    }
}

/// Form state handed in by the caller: field name → value.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    values: HashMap<String, FieldValue>,
}

impl FormData {
    /// Empty form state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field value, replacing any previous entry.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Value for `name`; absent entries read as [`FieldValue::Missing`].
    pub fn get(&self, name: &str) -> FieldValue {
        self.values
            .get(name)
            .cloned()
            .unwrap_or(FieldValue::Missing)
    }
}

/// Ordered map of field name → rule.
///
/// Declaration order matters: it fixes the order of reported errors.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<(String, ValidationRule)>,
}

impl RuleSet {
    /// Empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field rule, preserving declaration order.
    pub fn field(mut self, name: impl Into<String>, rule: ValidationRule) -> Self {
        self.rules.push((name.into(), rule));
        self
    }

    /// Iterate rules in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationRule)> {
        self.rules
            .iter()
            .map(|(name, rule)| (name.as_str(), rule))
    }

    /// Number of declared field rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rules are declared.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Validate a single field against its rule.
///
/// Evaluation order is fixed: required, then (for present values) email →
/// min_length → max_length → pattern → min → max → custom. The first
/// failing constraint wins and later ones are not evaluated. Absent values
/// on optional fields short-circuit to `None` by design.
///
/// # Examples
/// ```
/// use forecourt::domain::{validate_field, FieldValue, ValidationRule};
///
/// let rule = ValidationRule::new().required().email();
/// let ok = validate_field(&FieldValue::from("test@example.com"), &rule, "email");
/// assert!(ok.is_none());
/// ```
pub fn validate_field(
    value: &FieldValue,
    rule: &ValidationRule,
    field_name: &str,
) -> Option<ValidationError> {
    if rule.required && value.is_empty() {
        return Some(ValidationError::new(
            field_name,
            format!("{field_name} is required"),
            ErrorCode::VALIDATION_REQUIRED_FIELD,
        ));
    }

    // Absence is valid for optional fields; remaining rules are skipped.
    if value.is_empty() {
        return None;
    }

    if rule.email {
        if let FieldValue::Text(text) = value {
            if !email_regex().is_match(text) {
                return Some(ValidationError::new(
                    field_name,
                    format!("{field_name} must be a valid email address"),
                    ErrorCode::VALIDATION_INVALID_FORMAT,
                ));
            }
        }
    }

    if let Some(min_length) = rule.min_length {
        if let FieldValue::Text(text) = value {
            if text.chars().count() < min_length {
                return Some(ValidationError::new(
                    field_name,
                    format!("{field_name} must be at least {min_length} characters"),
                    ErrorCode::VALIDATION_OUT_OF_RANGE,
                ));
            }
        }
    }

    if let Some(max_length) = rule.max_length {
        if let FieldValue::Text(text) = value {
            if text.chars().count() > max_length {
                return Some(ValidationError::new(
                    field_name,
                    format!("{field_name} must not exceed {max_length} characters"),
                    ErrorCode::VALIDATION_OUT_OF_RANGE,
                ));
            }
        }
    }

    if let Some(pattern) = &rule.pattern {
        if let FieldValue::Text(text) = value {
            if !pattern.is_match(text) {
                return Some(ValidationError::new(
                    field_name,
                    format!("{field_name} format is invalid"),
                    ErrorCode::VALIDATION_INVALID_FORMAT,
                ));
            }
        }
    }

    if let Some(min) = rule.min {
        if let FieldValue::Number(number) = value {
            if *number < min {
                return Some(ValidationError::new(
                    field_name,
                    format!("{field_name} must be at least {min}"),
                    ErrorCode::VALIDATION_OUT_OF_RANGE,
                ));
            }
        }
    }

    if let Some(max) = rule.max {
        if let FieldValue::Number(number) = value {
            if *number > max {
                return Some(ValidationError::new(
                    field_name,
                    format!("{field_name} must not exceed {max}"),
                    ErrorCode::VALIDATION_OUT_OF_RANGE,
                ));
            }
        }
    }

    if let Some(custom) = &rule.custom {
        if let Some(message) = custom(value) {
            return Some(ValidationError::new(
                field_name,
                message,
                ErrorCode::VALIDATION_INVALID_FORMAT,
            ));
        }
    }

    None
}

/// Validate a whole form against an ordered rule set.
///
/// Rules are evaluated in declaration order; data fields without a rule are
/// ignored entirely.
pub fn validate_form(data: &FormData, rules: &RuleSet) -> ValidationResult {
    let mut errors = Vec::new();
    for (field_name, rule) in rules.iter() {
        let value = data.get(field_name);
        if let Some(error) = validate_field(&value, rule, field_name) {
            errors.push(error);
        }
    }
    ValidationResult::from_errors(errors)
}

#[cfg(test)]
mod tests;
