use std::fmt::{Display, Formatter};

use crate::ValidationError;

/// Validated, comma-joined ticker list for the quotes endpoint.
///
/// Tokens are trimmed and uppercased. The joined form has no spaces, which
/// is the shape the service expects in `symbolList`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolList(String);

impl SymbolList {
    /// Parse a comma-separated list such as `"aaa, ACB,tcb"`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Self::from_symbols(input.split(','))
    }

    /// Build from individual tokens. Each token may itself hold a
    /// comma-separated list.
    pub fn from_symbols<I, S>(symbols: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let raw: Vec<String> = symbols
            .into_iter()
            .flat_map(|symbol| {
                symbol
                    .as_ref()
                    .split(',')
                    .map(str::to_owned)
                    .collect::<Vec<_>>()
            })
            .collect();

        if raw.iter().all(|token| token.trim().is_empty()) {
            return Err(ValidationError::EmptySymbolList);
        }

        let tickers = raw
            .iter()
            .enumerate()
            .map(|(index, token)| normalize(token, index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self(tickers.join(",")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.split(',')
    }
}

fn normalize(token: &str, index: usize) -> Result<String, ValidationError> {
    let trimmed = token.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidSymbol {
            value: trimmed.to_owned(),
            index,
        });
    }
    Ok(trimmed.to_ascii_uppercase())
}

impl Display for SymbolList {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SymbolList {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
