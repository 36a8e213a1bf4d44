use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::hash::hash_fields;

/// Generic application error body used by the quote and symbol endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: Option<String>,
    pub params: Option<String>,
    #[serde(rename = "isSystemError")]
    pub is_system_error: Option<bool>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.params.is_none() && self.is_system_error.is_none()
    }
}

impl Display for ErrorResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code.as_deref().unwrap_or("<no code>"))?;
        if let Some(params) = &self.params {
            write!(f, " (params: {params})")?;
        }
        if self.is_system_error == Some(true) {
            f.write_str(" [system]")?;
        }
        Ok(())
    }
}

/// Error body of the chart history endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryErrorResponse {
    pub s: Option<Vec<String>>,
    #[serde(rename = "nextTime")]
    pub next_time: Option<Vec<f64>>,
}

impl HistoryErrorResponse {
    pub fn is_empty(&self) -> bool {
        self.s.is_none() && self.next_time.is_none()
    }
}

// JSON numbers are never NaN.
impl Eq for HistoryErrorResponse {}

impl Hash for HistoryErrorResponse {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_fields!(state; &self.s, &self.next_time);
    }
}

impl Display for HistoryErrorResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.s {
            Some(statuses) if !statuses.is_empty() => f.write_str(&statuses.join(", "))?,
            _ => f.write_str("<no status>")?,
        }
        if let Some(next) = self.next_time.as_ref().and_then(|times| times.first()) {
            write!(f, " (next time: {next})")?;
        }
        Ok(())
    }
}

/// Application error body, in whichever shape the endpoint uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ErrorPayload {
    Generic(ErrorResponse),
    History(HistoryErrorResponse),
}

impl ErrorPayload {
    /// Upstream error code, when the payload carries one.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Generic(response) => response.code.as_deref(),
            Self::History(_) => None,
        }
    }
}

impl Display for ErrorPayload {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generic(response) => write!(f, "error response: {response}"),
            Self::History(response) => write!(f, "history error response: {response}"),
        }
    }
}

impl From<ErrorResponse> for ErrorPayload {
    fn from(value: ErrorResponse) -> Self {
        Self::Generic(value)
    }
}

impl From<HistoryErrorResponse> for ErrorPayload {
    fn from(value: HistoryErrorResponse) -> Self {
        Self::History(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_suitable_for_verbatim_output() {
        let payload = ErrorPayload::from(ErrorResponse {
            code: Some(String::from("SYMBOL_NOT_FOUND")),
            params: Some(String::from("XYZ")),
            is_system_error: Some(false),
        });
        assert_eq!(
            payload.to_string(),
            "error response: SYMBOL_NOT_FOUND (params: XYZ)"
        );

        let history = ErrorPayload::from(HistoryErrorResponse {
            s: Some(vec![String::from("error")]),
            next_time: Some(vec![1_717_372_800.0]),
        });
        assert_eq!(
            history.to_string(),
            "history error response: error (next time: 1717372800)"
        );
        assert_eq!(history.code(), None);
    }
}
