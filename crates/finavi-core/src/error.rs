use thiserror::Error;

use crate::decode::DecodeFailure;
use crate::http_client::HttpError;
use crate::model::ErrorPayload;

/// Input validation errors raised before any request is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol list cannot be empty")]
    EmptySymbolList,
    #[error("symbol '{value}' at position {index} is invalid: use ASCII letters and digits only")]
    InvalidSymbol { value: String, index: usize },

    #[error("invalid chart range '{value}', expected one of 1d, 5d, 1m, 3m, 3y, 5y")]
    InvalidChartRange { value: String },

    #[error("timeout must be a positive integer of milliseconds: '{value}'")]
    InvalidTimeout { value: String },
}

/// Structural problems in a decoded [`HistorySeries`](crate::HistorySeries).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("history column '{field}' has {len} entries but '{reference}' has {expected}")]
    LengthMismatch {
        field: &'static str,
        len: usize,
        reference: &'static str,
        expected: usize,
    },
    #[error("history column '{field}' is missing")]
    MissingColumn { field: &'static str },
    #[error("history timestamp {value} is out of range")]
    InvalidTimestamp { value: i64 },
}

/// Failure of a client operation.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("transport returned status {status}, which is not an HTTP status code")]
    InvalidResponseType { status: u16 },

    #[error("unexpected HTTP status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("{}", application_message(.status, .payload))]
    Application {
        status: u16,
        payload: Option<ErrorPayload>,
    },

    #[error(transparent)]
    MalformedResponse(#[from] DecodeFailure),

    #[error("transport error: {0}")]
    Transport(#[from] HttpError),
}

fn application_message(status: &u16, payload: &Option<ErrorPayload>) -> String {
    match payload {
        Some(payload) => format!("request failed with status {status}: {payload}"),
        None => format!("request failed with status {status}"),
    }
}

impl ApiError {
    /// Stable machine-readable error code.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidUrl { .. } => "api.invalid_url",
            Self::InvalidResponseType { .. } => "api.invalid_response_type",
            Self::UnexpectedStatus { .. } => "api.unexpected_status",
            Self::Application { .. } => "api.application_error",
            Self::MalformedResponse(_) => "api.malformed_response",
            Self::Transport(_) => "api.transport",
        }
    }

    /// HTTP status attached to the failure, if a response was received.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::InvalidResponseType { status }
            | Self::UnexpectedStatus { status }
            | Self::Application { status, .. } => Some(*status),
            Self::InvalidUrl { .. } | Self::MalformedResponse(_) | Self::Transport(_) => None,
        }
    }

    pub fn payload(&self) -> Option<&ErrorPayload> {
        match self {
            Self::Application { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }
}

/// Status range a response fell into after [`validate_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    ClientError,
}

/// Accept 2xx and 4xx responses; their bodies are worth decoding.
///
/// Anything else fails without looking at the body.
pub fn validate_status(status: u16) -> Result<StatusClass, ApiError> {
    match status {
        200..=299 => Ok(StatusClass::Success),
        400..=499 => Ok(StatusClass::ClientError),
        100..=599 => Err(ApiError::UnexpectedStatus { status }),
        _ => Err(ApiError::InvalidResponseType { status }),
    }
}

/// Build the application error for an accepted status.
///
/// `payload` is the endpoint's error shape when the body decoded as one, and
/// `None` when the body matched no known shape.
pub fn classify(status: u16, payload: Option<ErrorPayload>) -> ApiError {
    ApiError::Application { status, payload }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ErrorResponse;

    #[test]
    fn accepts_success_and_client_error_ranges() {
        assert_eq!(validate_status(200).expect("2xx"), StatusClass::Success);
        assert_eq!(validate_status(299).expect("2xx"), StatusClass::Success);
        assert_eq!(validate_status(400).expect("4xx"), StatusClass::ClientError);
        assert_eq!(validate_status(499).expect("4xx"), StatusClass::ClientError);
    }

    #[test]
    fn other_ranges_are_unexpected() {
        for status in [100, 304, 399, 500, 503, 599] {
            let err = validate_status(status).expect_err("must fail");
            assert!(matches!(err, ApiError::UnexpectedStatus { status: s } if s == status));
            assert_eq!(err.payload(), None);
        }
    }

    #[test]
    fn non_http_status_is_an_invalid_response_type() {
        for status in [0, 99, 600, 999] {
            let err = validate_status(status).expect_err("must fail");
            assert_eq!(err.code(), "api.invalid_response_type");
        }
    }

    #[test]
    fn classified_error_keeps_status_and_payload() {
        let payload = ErrorPayload::from(ErrorResponse::new("SYMBOL_NOT_FOUND"));
        let err = classify(404, Some(payload.clone()));

        assert_eq!(err.status(), Some(404));
        assert_eq!(err.payload(), Some(&payload));
        assert_eq!(
            err.to_string(),
            "request failed with status 404: error response: SYMBOL_NOT_FOUND"
        );
    }

    #[test]
    fn classified_error_without_payload_still_reports_status() {
        let err = classify(418, None);
        assert_eq!(err.to_string(), "request failed with status 418");
        assert_eq!(err.code(), "api.application_error");
    }
}
