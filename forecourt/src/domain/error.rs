//! Error taxonomy shared by validation, classification, and account flows.
//!
//! Codes are numeric and partitioned into fixed hundred-wide bands so that
//! category membership is a pure function of the value, never of message
//! text. Adapters serialise [`ApiError`] as the standard failure envelope.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Category band an [`ErrorCode`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Authentication and authorisation failures (1000–1099).
    Authentication,
    /// Input validation failures (1100–1199).
    Validation,
    /// Business rule violations (1200–1299).
    Business,
    /// Infrastructure and unexpected failures (1300–1399).
    System,
}

/// Lowest value admitted into the taxonomy.
pub const ERROR_CODE_MIN: u16 = 1000;
/// Highest value admitted into the taxonomy.
pub const ERROR_CODE_MAX: u16 = 1399;

/// Stable numeric error code.
///
/// ## Invariants
/// - The value lies within [`ERROR_CODE_MIN`]..=[`ERROR_CODE_MAX`], so every
///   code belongs to exactly one [`ErrorCategory`].
///
/// Servers may emit in-range codes this crate has no named constant for;
/// those still construct and classify correctly.
///
/// # Examples
/// ```
/// use forecourt::domain::{ErrorCategory, ErrorCode};
///
/// let code = ErrorCode::AUTH_INVALID_CREDENTIALS;
/// assert_eq!(code.category(), ErrorCategory::Authentication);
/// assert!(ErrorCode::try_new(999).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct ErrorCode(u16);

impl ErrorCode {
    // Authentication (1000–1099)
    pub const AUTH_INVALID_CREDENTIALS: Self = Self(1001);
    pub const AUTH_ACCOUNT_LOCKED: Self = Self(1002);
    pub const AUTH_EMAIL_TAKEN: Self = Self(1003);
    pub const AUTH_SESSION_EXPIRED: Self = Self(1004);
    pub const AUTH_VERIFICATION_REQUIRED: Self = Self(1005);
    pub const AUTH_FORBIDDEN: Self = Self(1006);
    pub const AUTH_USER_NOT_FOUND: Self = Self(1007);

    // Validation (1100–1199)
    pub const VALIDATION_INVALID_EMAIL: Self = Self(1101);
    pub const VALIDATION_PASSWORD_TOO_SHORT: Self = Self(1102);
    pub const VALIDATION_INVALID_PHONE: Self = Self(1103);
    pub const VALIDATION_REQUIRED_FIELD: Self = Self(1104);
    pub const VALIDATION_INVALID_AMOUNT: Self = Self(1105);
    pub const VALIDATION_INVALID_PUMP: Self = Self(1106);
    pub const VALIDATION_INVALID_FORMAT: Self = Self(1107);
    pub const VALIDATION_OUT_OF_RANGE: Self = Self(1108);

    // Business (1200–1299)
    pub const PUMP_OUT_OF_SERVICE: Self = Self(1201);
    pub const INVENTORY_LOW_STOCK: Self = Self(1202);
    pub const TRANSACTION_LIMIT_EXCEEDED: Self = Self(1203);
    pub const TRANSACTION_INVALID_REFERENCE: Self = Self(1204);
    pub const PUMP_IN_USE: Self = Self(1205);
    pub const FUEL_GRADE_UNAVAILABLE: Self = Self(1206);
    pub const PUMP_NOT_FOUND: Self = Self(1207);
    pub const TRANSACTION_INVALID_AMOUNT: Self = Self(1208);
    pub const CREDIT_LIMIT_EXCEEDED: Self = Self(1209);

    // System (1300–1399)
    pub const SYSTEM_INTERNAL_ERROR: Self = Self(1300);
    pub const SYSTEM_DATABASE_ERROR: Self = Self(1301);
    pub const SYSTEM_PAYMENT_UNAVAILABLE: Self = Self(1302);
    pub const SYSTEM_BACKUP_RUNNING: Self = Self(1303);
    pub const SYSTEM_MAINTENANCE: Self = Self(1304);
    pub const SYSTEM_OVERLOADED: Self = Self(1305);
    pub const SYSTEM_UNCLASSIFIED: Self = Self(1399);

    /// Admit a numeric code after checking it falls inside the taxonomy.
    pub fn try_new(value: u16) -> Result<Self, ErrorCodeRangeError> {
        if (ERROR_CODE_MIN..=ERROR_CODE_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ErrorCodeRangeError { value })
        }
    }

    /// Raw numeric value.
    pub fn value(self) -> u16 {
        self.0
    }

    /// Category derived from the value's hundred band.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            1000..=1099 => ErrorCategory::Authentication,
            1100..=1199 => ErrorCategory::Validation,
            1200..=1299 => ErrorCategory::Business,
            _ => ErrorCategory::System,
        }
    }

    /// True when the code sits in the Authentication band.
    pub fn is_authentication(self) -> bool {
        self.category() == ErrorCategory::Authentication
    }

    /// True when the code sits in the Validation band.
    pub fn is_validation(self) -> bool {
        self.category() == ErrorCategory::Validation
    }

    /// True when the code sits in the Business band.
    pub fn is_business(self) -> bool {
        self.category() == ErrorCategory::Business
    }

    /// True when the code sits in the System band.
    pub fn is_system(self) -> bool {
        self.category() == ErrorCategory::System
    }

    /// Fixed user-facing message for catalogued codes.
    ///
    /// Codes without a catalogue entry (including novel in-range codes from
    /// a server) return `None`; callers fall back to the carried message.
    pub fn canned_message(self) -> Option<&'static str> {
        let message = match self.0 {
            1001 => "Invalid email or password",
            1002 => "Account has been locked due to multiple failed attempts",
            1003 => "Email address is already registered",
            1004 => "Session has expired. Please login again",
            1005 => "Account verification required",
            1006 => "Insufficient permissions to access this resource",
            1007 => "User account not found",
            1101 => "Invalid email address format",
            1102 => "Password must be at least 6 characters long",
            1103 => "Phone number format is invalid",
            1104 => "Required field is missing",
            1105 => "Invalid amount entered",
            1106 => "Pump number must be between 1 and 20",
            1201 => "Pump is currently out of service",
            1202 => "Insufficient fuel in selected pump",
            1203 => "Transaction limit exceeded for today",
            1204 => "Invalid transaction reference",
            1205 => "Pump is already in use",
            1206 => "Fuel grade not available",
            1207 => "Pump not found",
            1208 => "Invalid transaction amount",
            1209 => "Credit limit exceeded",
            1301 => "Database connection failed",
            1302 => "External payment service unavailable",
            1303 => "Backup system is running",
            1304 => "Maintenance mode is active",
            1305 => "Server overloaded. Please try again later",
            _ => return None,
        };
        Some(message)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = ErrorCodeRangeError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<ErrorCode> for u16 {
    fn from(value: ErrorCode) -> Self {
        value.0
    }
}

/// Rejection raised when a numeric code falls outside the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorCodeRangeError {
    /// The offending value.
    pub value: u16,
}

impl fmt::Display for ErrorCodeRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error code {} is outside the {ERROR_CODE_MIN}..={ERROR_CODE_MAX} taxonomy",
            self.value
        )
    }
}

impl std::error::Error for ErrorCodeRangeError {}

/// Canonical failure payload surfaced to callers and rendered by the UI.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
/// - Constructed once at the boundary where a failure is first observed and
///   never mutated afterwards.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use forecourt::domain::{ApiError, ErrorCode};
///
/// let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
/// let err = ApiError::new(404, ErrorCode::PUMP_NOT_FOUND, "missing", at);
/// assert_eq!(err.status(), 404);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
#[serde(try_from = "ApiErrorDto", into = "ApiErrorDto")]
pub struct ApiError {
    status: u16,
    message: String,
    code: ErrorCode,
    details: Option<Value>,
    timestamp: DateTime<Utc>,
}

/// Validation failures raised when constructing an [`ApiError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorValidationError {
    /// Message was empty once trimmed.
    EmptyMessage,
}

impl fmt::Display for ApiErrorValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "error message must not be empty"),
        }
    }
}

impl std::error::Error for ApiErrorValidationError {}

impl ApiError {
    /// Create a new error, panicking if validation fails.
    pub fn new(
        status: u16,
        code: ErrorCode,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        match Self::try_new(status, code, message, timestamp) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(
        status: u16,
        code: ErrorCode,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, ApiErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ApiErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            status,
            message,
            code,
            details: None,
            timestamp,
        })
    }

    /// Attach structured details to the error.
    ///
    /// Details carry log-only context such as the original failure text and
    /// are never rendered verbatim to a user.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// HTTP-equivalent status the failure maps to.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary details for logging.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Instant at which the failure was first observed.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiErrorDto {
    status: u16,
    message: String,
    code: ErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
    timestamp: DateTime<Utc>,
}

impl From<ApiError> for ApiErrorDto {
    fn from(value: ApiError) -> Self {
        Self {
            status: value.status,
            message: value.message,
            code: value.code,
            details: value.details,
            timestamp: value.timestamp,
        }
    }
}

impl TryFrom<ApiErrorDto> for ApiError {
    type Error = ApiErrorValidationError;

    fn try_from(value: ApiErrorDto) -> Result<Self, Self::Error> {
        let ApiErrorDto {
            status,
            message,
            code,
            details,
            timestamp,
        } = value;

        let mut error = ApiError::try_new(status, code, message, timestamp)?;
        error.details = details;
        Ok(error)
    }
}
