//! Domain primitives and services.
//!
//! Purpose: define the validation rule engine, the numeric error taxonomy
//! with its boundary classifier, and the account flows behind injected
//! ports. Types are immutable value objects wherever possible; invariants
//! and serialisation contracts (serde) live in each type's Rustdoc.
//!
//! Public surface:
//! - `validate_field` / `validate_form` — declarative rule evaluation.
//! - `ErrorCode` / `ApiError` / `ErrorClassifier` — taxonomy and boundary
//!   classification.
//! - `AccountService` — registration, login, and password reset over an
//!   injected [`AccountRepository`].

pub mod account;
pub mod auth;
pub mod classify;
pub mod error;
pub mod ports;
pub mod presets;
pub mod sanitize;
pub mod validation;

pub use self::account::{
    Account, AccountError, AccountService, AccountSummary, NewAccount, PasswordDigest,
};
pub use self::auth::{CredentialValidationError, Credentials};
pub use self::classify::{
    extract_code, log_error, user_message, ErrorClassifier, Failure, TransportFailure,
};
pub use self::error::{
    ApiError, ApiErrorValidationError, ErrorCategory, ErrorCode, ErrorCodeRangeError,
    ERROR_CODE_MAX, ERROR_CODE_MIN,
};
pub use self::ports::{AccountRepository, AccountStoreError};
pub use self::presets::{common_rules, CommonRules};
pub use self::sanitize::sanitize_message;
pub use self::validation::{
    validate_field, validate_form, FieldValue, FormData, RuleSet, ValidationError,
    ValidationResult, ValidationRule,
};
