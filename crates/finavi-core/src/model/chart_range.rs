use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::ValidationError;

/// Charting window offered by the history endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartRange {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "3m")]
    ThreeMonths,
    #[serde(rename = "3y")]
    ThreeYears,
    #[serde(rename = "5y")]
    FiveYears,
}

impl ChartRange {
    pub const ALL: [Self; 6] = [
        Self::OneDay,
        Self::FiveDays,
        Self::OneMonth,
        Self::ThreeMonths,
        Self::ThreeYears,
        Self::FiveYears,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneDay => "1d",
            Self::FiveDays => "5d",
            Self::OneMonth => "1m",
            Self::ThreeMonths => "3m",
            Self::ThreeYears => "3y",
            Self::FiveYears => "5y",
        }
    }

    /// Bar resolution code the history endpoint expects for this window.
    pub const fn resolution(self) -> &'static str {
        match self {
            Self::OneDay | Self::FiveDays | Self::OneMonth => "1",
            Self::ThreeMonths => "1D",
            Self::ThreeYears | Self::FiveYears => "D",
        }
    }

    /// Calendar span covered by the window.
    pub const fn lookback(self) -> Duration {
        match self {
            Self::OneDay => Duration::days(1),
            Self::FiveDays => Duration::days(5),
            Self::OneMonth => Duration::days(30),
            Self::ThreeMonths => Duration::days(90),
            Self::ThreeYears => Duration::days(3 * 365),
            Self::FiveYears => Duration::days(5 * 365),
        }
    }

    /// `(from, to)` Unix-second bounds of the window ending at `end`.
    pub fn window_ending(self, end: OffsetDateTime) -> (i64, i64) {
        let start = end - self.lookback();
        (start.unix_timestamp(), end.unix_timestamp())
    }
}

impl Display for ChartRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartRange {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|range| range.as_str() == normalized)
            .ok_or(ValidationError::InvalidChartRange { value: normalized })
    }
}
