//! Trial decoding of untagged response bodies.
//!
//! The service answers each endpoint with either its success shape or an
//! error object, with no tag telling them apart. Each endpoint therefore owns
//! an ordered list of [`Candidate`] decoders; [`decode_untagged`] commits to
//! the first one that parses.
//!
//! | Endpoint | First candidate | Second candidate |
//! |----------|-----------------|------------------|
//! | Quotes | `[Quote]` | [`ErrorResponse`] |
//! | Symbols | `[Symbol]` | [`ErrorResponse`] |
//! | History | [`HistorySeries`] | [`HistoryErrorResponse`] |
//!
//! The order is part of the contract.

use std::fmt::{Display, Formatter};

use log::debug;
use serde::de::DeserializeOwned;

use crate::model::{
    ErrorPayload, ErrorResponse, HistoryErrorResponse, HistorySeries, Quote, Symbol,
};

const PREVIEW_CHARS: usize = 256;

/// Outcome of a successful trial decode.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<T> {
    Data(T),
    Error(ErrorPayload),
}

/// One named shape decoder.
pub struct Candidate<T> {
    pub name: &'static str,
    pub decode: fn(&[u8]) -> Result<T, serde_json::Error>,
}

impl<T> Clone for Candidate<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Candidate<T> {}

impl<T> std::fmt::Debug for Candidate<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Candidate").field("name", &self.name).finish()
    }
}

/// Try each candidate in order and return the first clean parse.
pub fn decode_untagged<T>(body: &[u8], candidates: &[Candidate<T>]) -> Result<T, DecodeFailure> {
    let mut attempts = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        match (candidate.decode)(body) {
            Ok(value) => return Ok(value),
            Err(error) => {
                debug!("response is not a {}: {error}", candidate.name);
                attempts.push((candidate.name, error));
            }
        }
    }

    Err(DecodeFailure::new(body, attempts))
}

pub fn quote_candidates() -> [Candidate<Decoded<Vec<Quote>>>; 2] {
    [
        Candidate {
            name: "quote list",
            decode: data::<Vec<Quote>>,
        },
        Candidate {
            name: "error response",
            decode: generic_error,
        },
    ]
}

pub fn symbol_candidates() -> [Candidate<Decoded<Vec<Symbol>>>; 2] {
    [
        Candidate {
            name: "symbol list",
            decode: data::<Vec<Symbol>>,
        },
        Candidate {
            name: "error response",
            decode: generic_error,
        },
    ]
}

pub fn history_candidates() -> [Candidate<Decoded<HistorySeries>>; 2] {
    [
        Candidate {
            name: "history series",
            decode: history_series,
        },
        Candidate {
            name: "history error response",
            decode: history_error,
        },
    ]
}

fn data<T: DeserializeOwned>(body: &[u8]) -> Result<Decoded<T>, serde_json::Error> {
    serde_json::from_slice(body).map(Decoded::Data)
}

fn generic_error<T>(body: &[u8]) -> Result<Decoded<T>, serde_json::Error> {
    populated(body, ErrorResponse::is_empty, "error response")
        .map(|response| Decoded::Error(ErrorPayload::Generic(response)))
}

fn history_series(body: &[u8]) -> Result<Decoded<HistorySeries>, serde_json::Error> {
    populated(body, HistorySeries::is_empty, "history series").map(Decoded::Data)
}

fn history_error(body: &[u8]) -> Result<Decoded<HistorySeries>, serde_json::Error> {
    populated(body, HistoryErrorResponse::is_empty, "history error response")
        .map(|response| Decoded::Error(ErrorPayload::History(response)))
}

/// Decode an all-optional object, rejecting one that set none of its keys.
/// Without this, `{}` would match every object-shaped candidate.
fn populated<T: DeserializeOwned>(
    body: &[u8],
    is_empty: fn(&T) -> bool,
    shape: &str,
) -> Result<T, serde_json::Error> {
    let value: T = serde_json::from_slice(body)?;
    if is_empty(&value) {
        return Err(<serde_json::Error as serde::de::Error>::custom(format!(
            "{shape} has none of its expected fields"
        )));
    }
    Ok(value)
}

/// Body matched none of an endpoint's candidate shapes.
#[derive(Debug)]
pub struct DecodeFailure {
    preview: String,
    attempts: Vec<(&'static str, serde_json::Error)>,
}

impl DecodeFailure {
    fn new(body: &[u8], attempts: Vec<(&'static str, serde_json::Error)>) -> Self {
        let text = String::from_utf8_lossy(body);
        let mut preview: String = text.chars().take(PREVIEW_CHARS).collect();
        if text.chars().nth(PREVIEW_CHARS).is_some() {
            preview.push('…');
        }
        Self { preview, attempts }
    }

    /// Lossy, truncated copy of the body.
    pub fn preview(&self) -> &str {
        &self.preview
    }

    /// Each rejected candidate with its structural error, in attempt order.
    pub fn attempts(&self) -> impl Iterator<Item = (&'static str, &serde_json::Error)> {
        self.attempts.iter().map(|(name, error)| (*name, error))
    }
}

impl Display for DecodeFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("malformed response: expected ")?;
        for (index, (name, error)) in self.attempts.iter().enumerate() {
            if index > 0 {
                f.write_str(" or ")?;
            }
            write!(f, "{name} ({error})")?;
        }
        write!(f, "; body: {}", self.preview)
    }
}

impl std::error::Error for DecodeFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.attempts
            .first()
            .map(|(_, error)| error as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_candidate_wins() {
        let decoded = decode_untagged(br#"[{"s":"AAA"},{"s":"ACB"}]"#, &quote_candidates())
            .expect("quote list");

        match decoded {
            Decoded::Data(quotes) => {
                let symbols: Vec<_> = quotes.iter().map(|q| q.symbol.as_deref()).collect();
                assert_eq!(symbols, vec![Some("AAA"), Some("ACB")]);
            }
            Decoded::Error(payload) => panic!("unexpected error branch: {payload}"),
        }
    }

    #[test]
    fn error_object_selects_error_branch() {
        let body = br#"{"code":"SYMBOL_NOT_FOUND","params":null,"isSystemError":false}"#;
        let decoded = decode_untagged(body, &symbol_candidates()).expect("error response");

        assert_eq!(
            decoded,
            Decoded::Error(ErrorPayload::Generic(ErrorResponse {
                code: Some(String::from("SYMBOL_NOT_FOUND")),
                params: None,
                is_system_error: Some(false),
            }))
        );
    }

    #[test]
    fn empty_object_matches_no_object_candidate() {
        let failure = decode_untagged(b"{}", &history_candidates()).expect_err("no match");
        let names: Vec<_> = failure.attempts().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["history series", "history error response"]);
    }

    #[test]
    fn failure_keeps_preview_and_first_cause() {
        let body = "x".repeat(PREVIEW_CHARS + 10);
        let failure = decode_untagged(body.as_bytes(), &quote_candidates()).expect_err("garbage");

        assert_eq!(failure.preview().chars().count(), PREVIEW_CHARS + 1);
        assert!(failure.preview().ends_with('…'));
        assert!(std::error::Error::source(&failure).is_some());
        assert!(failure.to_string().starts_with("malformed response: expected quote list ("));
    }
}
