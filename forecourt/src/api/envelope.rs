//! Conventional JSON response envelope.
//!
//! The library owns no wire protocol; this is the request/response shape
//! the surrounding HTTP handlers already exchange, typed so a failure arm
//! can feed [`crate::domain::Failure::Classified`] without re-inspection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::ApiError;

/// Success-or-failure envelope wrapping a response payload.
///
/// Successful acknowledgements may omit the payload (`data`) and carry only
/// a message; failures always carry a structured [`ApiError`].
///
/// # Examples
/// ```
/// use forecourt::api::ApiResponse;
///
/// let response = ApiResponse::success(7_u32);
/// assert_eq!(response.into_result().expect("success arm"), Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "ApiResponseDto<T>", into = "ApiResponseDto<T>")]
#[serde(bound(
    serialize = "T: Serialize + Clone",
    deserialize = "T: serde::Deserialize<'de>"
))]
pub enum ApiResponse<T> {
    /// The operation succeeded.
    Success {
        /// Response payload, absent for bare acknowledgements.
        data: Option<T>,
        /// Optional human readable note.
        message: Option<String>,
    },
    /// The operation failed.
    Failure {
        /// Structured failure payload.
        error: ApiError,
    },
}

impl<T> ApiResponse<T> {
    /// Success envelope carrying a payload.
    pub fn success(data: T) -> Self {
        Self::Success {
            data: Some(data),
            message: None,
        }
    }

    /// Success envelope carrying a payload and a note.
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self::Success {
            data: Some(data),
            message: Some(message.into()),
        }
    }

    /// Payload-free acknowledgement.
    pub fn acknowledgement(message: impl Into<String>) -> Self {
        Self::Success {
            data: None,
            message: Some(message.into()),
        }
    }

    /// Failure envelope.
    pub fn failure(error: ApiError) -> Self {
        Self::Failure { error }
    }

    /// True for the success arm.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Collapse into a result, handing the failure arm to the caller as
    /// already-classified data.
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        match self {
            Self::Success { data, .. } => Ok(data),
            Self::Failure { error } => Err(error),
        }
    }
}

/// Shape violations rejected when decoding an envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeValidationError {
    /// `success` was false but no error payload was attached.
    MissingError,
    /// `success` was true yet an error payload was attached.
    UnexpectedError,
}

impl fmt::Display for EnvelopeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingError => write!(f, "failure envelope must carry an error"),
            Self::UnexpectedError => write!(f, "success envelope must not carry an error"),
        }
    }
}

impl std::error::Error for EnvelopeValidationError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponseDto<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ApiError>,
}

impl<T> From<ApiResponse<T>> for ApiResponseDto<T> {
    fn from(value: ApiResponse<T>) -> Self {
        match value {
            ApiResponse::Success { data, message } => Self {
                success: true,
                data,
                message,
                error: None,
            },
            ApiResponse::Failure { error } => Self {
                success: false,
                data: None,
                message: None,
                error: Some(error),
            },
        }
    }
}

impl<T> TryFrom<ApiResponseDto<T>> for ApiResponse<T> {
    type Error = EnvelopeValidationError;

    fn try_from(value: ApiResponseDto<T>) -> Result<Self, Self::Error> {
        let ApiResponseDto {
            success,
            data,
            message,
            error,
        } = value;

        match (success, error) {
            (true, None) => Ok(Self::Success { data, message }),
            (true, Some(_)) => Err(EnvelopeValidationError::UnexpectedError),
            (false, Some(error)) => Ok(Self::Failure { error }),
            (false, None) => Err(EnvelopeValidationError::MissingError),
        }
    }
}

#[cfg(test)]
mod tests;
