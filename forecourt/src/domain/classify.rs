//! Normalisation of heterogeneous failures into [`ApiError`] values.
//!
//! Remote and system failures are classified once at the boundary and then
//! treated as data; nothing in this module throws or re-throws after
//! classification.

use std::fmt;
use std::sync::Arc;
use std::sync::OnceLock;

use mockable::{Clock, DefaultClock};
use regex::Regex;
use serde_json::json;
use tracing::error;

use super::error::{ApiError, ErrorCode};

/// Transport-level failure observed before any response arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFailure {
    /// The connection could not be established.
    ConnectionFailed,
    /// The request was abandoned after the deadline elapsed.
    TimedOut,
}

/// Failure input accepted by [`ErrorClassifier::classify`].
///
/// Replaces duck-typed error probing with explicit arms: an envelope a lower
/// layer already classified, a transport sentinel, or any other caught
/// error reduced to its message.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// Structured error surfaced by a lower layer; passed through unchanged.
    Classified(ApiError),
    /// Connectivity or timeout sentinel from the transport.
    Transport(TransportFailure),
    /// Anything else, carried as display text.
    Other(String),
}

impl Failure {
    /// Wrap an arbitrary message as the default arm.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// Reduce a caught error to its display text.
    pub fn from_error(source: &(dyn std::error::Error + 'static)) -> Self {
        Self::Other(source.to_string())
    }
}

impl From<ApiError> for Failure {
    fn from(value: ApiError) -> Self {
        Self::Classified(value)
    }
}

impl From<TransportFailure> for Failure {
    fn from(value: TransportFailure) -> Self {
        Self::Transport(value)
    }
}

/// Boundary classifier producing canonical [`ApiError`] payloads.
///
/// Holds no state beyond an injected clock used to stamp the observation
/// time, so independent callers may share or clone it freely.
///
/// # Examples
/// ```
/// use forecourt::domain::{ErrorClassifier, ErrorCode, Failure};
///
/// let classifier = ErrorClassifier::new();
/// let err = classifier.classify(Failure::other("boom"));
/// assert_eq!(err.status(), 500);
/// assert_eq!(err.code(), ErrorCode::SYSTEM_INTERNAL_ERROR);
/// ```
#[derive(Clone)]
pub struct ErrorClassifier {
    clock: Arc<dyn Clock>,
}

impl ErrorClassifier {
    /// Classifier stamping timestamps from the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    /// Classifier with an injected clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Resolve any failure into a canonical error payload.
    ///
    /// Total over its input: already-classified errors pass through
    /// unchanged (classification is idempotent), transport sentinels map to
    /// fixed system errors, and everything else becomes a generic internal
    /// error with the original text preserved under `details.originalError`
    /// for the log sink only.
    pub fn classify(&self, failure: Failure) -> ApiError {
        match failure {
            Failure::Classified(err) => err,
            Failure::Transport(TransportFailure::ConnectionFailed) => ApiError::new(
                503,
                ErrorCode::SYSTEM_INTERNAL_ERROR,
                "Network connection failed. Please check your internet connection.",
                self.clock.utc(),
            ),
            Failure::Transport(TransportFailure::TimedOut) => ApiError::new(
                408,
                ErrorCode::SYSTEM_INTERNAL_ERROR,
                "Request timed out. Please try again.",
                self.clock.utc(),
            ),
            Failure::Other(message) => {
                error!(original = %message, "unclassified failure promoted to API error");
                let original = if message.trim().is_empty() {
                    "Unknown error".to_owned()
                } else {
                    message
                };
                ApiError::new(
                    500,
                    ErrorCode::SYSTEM_INTERNAL_ERROR,
                    "An unexpected error occurred. Please try again.",
                    self.clock.utc(),
                )
                .with_details(json!({ "originalError": original }))
            }
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ErrorClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorClassifier").finish_non_exhaustive()
    }
}

static CODE_RE: OnceLock<Regex> = OnceLock::new();

fn code_regex() -> &'static Regex {
    CODE_RE.get_or_init(|| {
        Regex::new(r"\b1[0-3]\d{2}\b")
            .unwrap_or_else(|error| panic!("code regex failed to compile: {error}"))
    })
}

/// Derive the string a UI should render for an error.
///
/// Catalogue lookup first, then the carried message, then a generic
/// fallback; the result is never empty.
pub fn user_message(error: &ApiError) -> String {
    if let Some(canned) = error.code().canned_message() {
        return canned.to_owned();
    }
    if error.message().trim().is_empty() {
        "An error occurred.".to_owned()
    } else {
        error.message().to_owned()
    }
}

/// Best-effort extraction of a taxonomy code embedded in message text.
///
/// Unmatched text resolves to [`ErrorCode::SYSTEM_UNCLASSIFIED`].
pub fn extract_code(message: &str) -> ErrorCode {
    code_regex()
        .find(message)
        .and_then(|m| m.as_str().parse::<u16>().ok())
        .and_then(|value| ErrorCode::try_new(value).ok())
        .unwrap_or(ErrorCode::SYSTEM_UNCLASSIFIED)
}

/// Emit a structured log event for a classified error.
///
/// Raw detail stays in the log sink; nothing here reaches the UI.
pub fn log_error(err: &ApiError, context: &str) {
    error!(
        context,
        code = err.code().value(),
        status = err.status(),
        category = ?err.code().category(),
        message = %err.message(),
        "api error",
    );
}
