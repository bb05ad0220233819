//! Domain-level error type reported by the screen services.
//!
//! These errors are transport agnostic. The terminal adapter turns them into
//! notifications and exit codes; the gateway adapter never sees them.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Form input is missing or malformed, or the gateway rejected it.
    InvalidRequest,
    /// The gateway does not know the addressed record.
    NotFound,
    /// The gateway could not be reached or was overloaded; retrying may help.
    ServiceUnavailable,
    /// Unexpected failure, such as an undecodable gateway response.
    InternalError,
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use ledger_client::domain::{DomainError, ErrorCode};
///
/// let err = DomainError::service_unavailable("gateway offline");
/// assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
/// assert!(err.is_retryable());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainError {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

/// Validation errors emitted by [`DomainError::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainErrorValidationError {
    /// The message was blank.
    #[error("error message must not be empty")]
    EmptyMessage,
}

impl DomainError {
    /// Create a new error, panicking if the message is blank.
    ///
    /// # Panics
    ///
    /// Panics when `message` is empty after trimming.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    ///
    /// # Errors
    ///
    /// Returns [`DomainErrorValidationError::EmptyMessage`] for blank messages.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, DomainErrorValidationError> {
        let text: String = message.into();
        if text.trim().is_empty() {
            return Err(DomainErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message: text,
            details: None,
        })
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message shown to the user.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary structured details.
    #[must_use]
    pub const fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Whether repeating the failed operation may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self.code, ErrorCode::ServiceUnavailable)
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use ledger_client::domain::DomainError;
    /// use serde_json::json;
    ///
    /// let err = DomainError::invalid_request("fill in every field")
    ///     .with_details(json!({ "fields": ["name"] }));
    /// assert!(err.details().is_some());
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    #[must_use]
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::blank("")]
    #[case::whitespace("   \t")]
    fn try_new_rejects_blank_messages(#[case] message: &str) {
        let result = DomainError::try_new(ErrorCode::InternalError, message);
        assert_eq!(result, Err(DomainErrorValidationError::EmptyMessage));
    }

    #[rstest]
    #[case::invalid(DomainError::invalid_request("bad"), ErrorCode::InvalidRequest, false)]
    #[case::missing(DomainError::not_found("gone"), ErrorCode::NotFound, false)]
    #[case::offline(DomainError::service_unavailable("down"), ErrorCode::ServiceUnavailable, true)]
    #[case::internal(DomainError::internal("boom"), ErrorCode::InternalError, false)]
    fn constructors_set_code_and_retryability(
        #[case] error: DomainError,
        #[case] code: ErrorCode,
        #[case] retryable: bool,
    ) {
        assert_eq!(error.code(), code);
        assert_eq!(error.is_retryable(), retryable);
    }

    #[test]
    fn serialises_with_snake_case_code_and_optional_details() {
        let plain = serde_json::to_value(DomainError::not_found("missing")).expect("serialise");
        assert_eq!(plain, json!({ "code": "not_found", "message": "missing" }));

        let detailed = DomainError::invalid_request("fill in every field")
            .with_details(json!({ "fields": ["age"] }));
        let value = serde_json::to_value(detailed).expect("serialise");
        assert_eq!(value["details"]["fields"][0], "age");
    }

    #[test]
    #[should_panic(expected = "error messages must satisfy validation")]
    fn new_panics_on_blank_message() {
        let _ = DomainError::new(ErrorCode::InternalError, " ");
    }
}
